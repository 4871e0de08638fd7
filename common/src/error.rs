//! エラー型定義

use thiserror::Error;

use crate::upload::format_size;

const MIB: u64 = 1024 * 1024;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// アップロード入力の検証結果
///
/// Display文字列はそのままフィードバック欄に表示される。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please upload a PDF document.")]
    WrongFileType,

    #[error(
        "File exceeds the {} size limit. Please upload a smaller PDF.",
        size_limit_text(.limit_bytes)
    )]
    FileTooLarge { limit_bytes: u64 },

    #[error("Upload your PDF before starting the transformation.")]
    NoFileSelected,
}

/// 上限表示。MiB単位で割り切れるなら整数（`50 MB`）、それ以外は `format_size`
fn size_limit_text(limit_bytes: &u64) -> String {
    if *limit_bytes >= MIB && *limit_bytes % MIB == 0 {
        format!("{} MB", limit_bytes / MIB)
    } else {
        format_size(*limit_bytes)
    }
}
