//! アップロードドロップゾーンの状態機械
//!
//! 通信は行わない。確定後は一定時間待ってから完了扱いにする（疑似アップロード）。
//! DOM側は `DropzoneView` をそのまま反映する。

use crate::config::UploadConfig;
use crate::error::UploadError;

pub const DEFAULT_MESSAGE: &str = "Accepted file types: PDF";
pub const READY_MESSAGE: &str = "Ready when you are — start the transformation!";
pub const SUCCESS_MESSAGE: &str = "Upload received! Our animators will reach out shortly.";
pub const NO_FILE_LABEL: &str = "No file selected yet.";

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// 選択されたファイルの情報（ブラウザの `File` から取り出す）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }

    /// `name (size)` 形式の表示ラベル
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, format_size(self.size))
    }
}

/// バイト数を表示用に整形（1 MiB 未満は KB、以上は MB、小数1桁）
pub fn format_size(bytes: u64) -> String {
    let megabytes = bytes as f64 / MIB;
    if megabytes < 1.0 {
        format!("{:.1} KB", bytes as f64 / KIB)
    } else {
        format!("{:.1} MB", megabytes)
    }
}

/// 受け付け条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_size_bytes: u64,
    pub accepted_mime_type: String,
    pub accepted_extension: String,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::from(&UploadConfig::default())
    }
}

impl From<&UploadConfig> for UploadPolicy {
    fn from(config: &UploadConfig) -> Self {
        Self {
            max_size_bytes: config.max_file_size_bytes,
            accepted_mime_type: config.accepted_mime_type.clone(),
            accepted_extension: config.accepted_extension.to_ascii_lowercase(),
        }
    }
}

impl UploadPolicy {
    /// MIMEタイプ一致 または 拡張子一致（大文字小文字無視）
    pub fn accepts_type(&self, file: &FileCandidate) -> bool {
        file.mime_type == self.accepted_mime_type
            || file
                .name
                .to_ascii_lowercase()
                .ends_with(&self.accepted_extension)
    }

    /// 種類 → サイズの順に検証する。上限ちょうどは許可。
    pub fn validate(&self, file: &FileCandidate) -> Result<(), UploadError> {
        if !self.accepts_type(file) {
            return Err(UploadError::WrongFileType);
        }
        if file.size > self.max_size_bytes {
            return Err(UploadError::FileTooLarge {
                limit_bytes: self.max_size_bytes,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropzoneState {
    Empty,
    Invalid(UploadError),
    Valid(FileCandidate),
    Submitting(FileCandidate),
}

/// フィードバック欄の表示種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Neutral,
    Error,
    Success,
}

/// DOMへ反映する表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropzoneView {
    pub has_file: bool,
    pub file_label: String,
    pub message: String,
    pub feedback: Feedback,
    pub start_enabled: bool,
    /// ファイル入力をクリアする（同じファイルを選び直せるように）
    pub clear_input: bool,
}

impl DropzoneView {
    fn empty(message: impl Into<String>, feedback: Feedback) -> Self {
        Self {
            has_file: false,
            file_label: NO_FILE_LABEL.to_string(),
            message: message.into(),
            feedback,
            start_enabled: false,
            clear_input: true,
        }
    }
}

impl Default for DropzoneView {
    fn default() -> Self {
        Self::empty(DEFAULT_MESSAGE, Feedback::Neutral)
    }
}

#[derive(Debug, Clone)]
pub struct Dropzone {
    policy: UploadPolicy,
    state: DropzoneState,
    view: DropzoneView,
}

impl Dropzone {
    pub fn new(policy: UploadPolicy) -> Self {
        Self {
            policy,
            state: DropzoneState::Empty,
            view: DropzoneView::default(),
        }
    }

    pub fn state(&self) -> &DropzoneState {
        &self.state
    }

    pub fn view(&self) -> &DropzoneView {
        &self.view
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, DropzoneState::Submitting(_))
    }

    /// ドロップ・ファイル選択の結果を受け取る
    ///
    /// 送信中は選択をロックしているため何もしない。
    pub fn select(&mut self, file: Option<FileCandidate>) -> &DropzoneView {
        if self.is_submitting() {
            return &self.view;
        }

        let Some(file) = file else {
            self.state = DropzoneState::Empty;
            self.view = DropzoneView::default();
            return &self.view;
        };

        match self.policy.validate(&file) {
            Ok(()) => {
                self.view = DropzoneView {
                    has_file: true,
                    file_label: file.label(),
                    message: READY_MESSAGE.to_string(),
                    feedback: Feedback::Neutral,
                    start_enabled: true,
                    clear_input: false,
                };
                self.state = DropzoneState::Valid(file);
            }
            Err(err) => {
                self.view = DropzoneView::empty(err.to_string(), Feedback::Error);
                self.state = DropzoneState::Invalid(err);
            }
        }
        &self.view
    }

    /// 開始ボタン。有効なファイルがあれば送信中へ遷移しそのファイルを返す。
    ///
    /// ファイルが無い場合は状態を変えずにエラー表示だけ行う。
    pub fn confirm(&mut self) -> Result<FileCandidate, UploadError> {
        let file = match &self.state {
            DropzoneState::Valid(file) => file.clone(),
            DropzoneState::Submitting(_) => return Err(UploadError::NoFileSelected),
            DropzoneState::Empty | DropzoneState::Invalid(_) => {
                let err = UploadError::NoFileSelected;
                self.view.message = err.to_string();
                self.view.feedback = Feedback::Error;
                self.view.start_enabled = false;
                self.view.clear_input = false;
                return Err(err);
            }
        };

        self.view = DropzoneView {
            has_file: true,
            file_label: file.label(),
            message: format!("Uploading {}... (Simulation)", file.name),
            feedback: Feedback::Success,
            start_enabled: false,
            clear_input: false,
        };
        self.state = DropzoneState::Submitting(file.clone());
        Ok(file)
    }

    /// 疑似アップロード完了。送信中でなければ `false`。
    pub fn finish(&mut self) -> bool {
        if !self.is_submitting() {
            return false;
        }
        self.state = DropzoneState::Empty;
        self.view = DropzoneView::empty(SUCCESS_MESSAGE, Feedback::Success);
        true
    }
}

impl Default for Dropzone {
    fn default() -> Self {
        Self::new(UploadPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: u64 = 50 * 1024 * 1024;

    fn pdf(size: u64) -> FileCandidate {
        FileCandidate::new("storyboard.pdf", "application/pdf", size)
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024 - 1), "1024.0 KB");
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
    }

    #[test]
    fn test_type_accepts_mime_or_extension() {
        let policy = UploadPolicy::default();
        assert!(policy.accepts_type(&FileCandidate::new("a.bin", "application/pdf", 1)));
        assert!(policy.accepts_type(&FileCandidate::new("report.PDF", "", 1)));
        assert!(policy.accepts_type(&FileCandidate::new("scan.pdf", "image/png", 1)));
        assert!(!policy.accepts_type(&FileCandidate::new("photo.png", "image/png", 1)));
        assert!(!policy.accepts_type(&FileCandidate::new("pdf", "", 1)));
    }

    #[test]
    fn test_size_boundary() {
        let policy = UploadPolicy::default();
        assert_eq!(policy.validate(&pdf(LIMIT)), Ok(()));
        assert_eq!(
            policy.validate(&pdf(LIMIT + 1)),
            Err(UploadError::FileTooLarge { limit_bytes: LIMIT })
        );
    }

    #[test]
    fn test_type_checked_before_size() {
        let policy = UploadPolicy::default();
        let file = FileCandidate::new("huge.zip", "application/zip", LIMIT * 2);
        assert_eq!(policy.validate(&file), Err(UploadError::WrongFileType));
    }

    #[test]
    fn test_valid_file_enables_start() {
        let mut dropzone = Dropzone::default();
        let view = dropzone.select(Some(pdf(2048))).clone();
        assert!(view.start_enabled);
        assert!(view.has_file);
        assert_eq!(view.file_label, "storyboard.pdf (2.0 KB)");
        assert_eq!(view.message, READY_MESSAGE);
        assert_eq!(view.feedback, Feedback::Neutral);
        assert!(matches!(dropzone.state(), DropzoneState::Valid(_)));
    }

    #[test]
    fn test_invalid_file_discards_previous_selection() {
        let mut dropzone = Dropzone::default();
        dropzone.select(Some(pdf(2048)));
        let view = dropzone
            .select(Some(FileCandidate::new("cover.png", "image/png", 10)))
            .clone();
        assert!(!view.start_enabled);
        assert!(!view.has_file);
        assert!(view.clear_input);
        assert_eq!(view.file_label, NO_FILE_LABEL);
        assert_eq!(view.feedback, Feedback::Error);
        assert_eq!(view.message, "Please upload a PDF document.");
        assert_eq!(
            dropzone.state(),
            &DropzoneState::Invalid(UploadError::WrongFileType)
        );
    }

    #[test]
    fn test_select_none_resets() {
        let mut dropzone = Dropzone::default();
        dropzone.select(Some(pdf(10)));
        let view = dropzone.select(None).clone();
        assert_eq!(view, DropzoneView::default());
        assert_eq!(dropzone.state(), &DropzoneState::Empty);
    }

    #[test]
    fn test_confirm_without_file() {
        let mut dropzone = Dropzone::default();
        assert_eq!(dropzone.confirm(), Err(UploadError::NoFileSelected));
        assert_eq!(dropzone.state(), &DropzoneState::Empty);
        assert!(!dropzone.view().start_enabled);
        assert_eq!(dropzone.view().feedback, Feedback::Error);
        assert_eq!(
            dropzone.view().message,
            "Upload your PDF before starting the transformation."
        );
    }

    #[test]
    fn test_confirm_then_finish() {
        let mut dropzone = Dropzone::default();
        dropzone.select(Some(pdf(4096)));

        assert_eq!(dropzone.confirm(), Ok(pdf(4096)));
        assert!(dropzone.is_submitting());
        assert!(!dropzone.view().start_enabled);
        assert_eq!(dropzone.view().feedback, Feedback::Success);
        assert_eq!(
            dropzone.view().message,
            "Uploading storyboard.pdf... (Simulation)"
        );

        assert!(dropzone.finish());
        assert_eq!(dropzone.state(), &DropzoneState::Empty);
        let view = dropzone.view();
        assert_eq!(view.message, SUCCESS_MESSAGE);
        assert_eq!(view.feedback, Feedback::Success);
        assert!(view.clear_input);
        assert!(!view.start_enabled);
        assert!(!dropzone.finish());
    }

    #[test]
    fn test_selection_locked_while_submitting() {
        let mut dropzone = Dropzone::default();
        dropzone.select(Some(pdf(4096)));
        dropzone.confirm().ok();
        dropzone.select(Some(FileCandidate::new("other.pdf", "application/pdf", 1)));
        dropzone.select(None);
        assert_eq!(dropzone.state(), &DropzoneState::Submitting(pdf(4096)));
        assert_eq!(dropzone.confirm(), Err(UploadError::NoFileSelected));
    }

    #[test]
    fn test_custom_policy_from_config() {
        let config = UploadConfig {
            max_file_size_bytes: 1024,
            accepted_extension: ".PDF".into(),
            ..UploadConfig::default()
        };
        let policy = UploadPolicy::from(&config);
        assert_eq!(policy.accepted_extension, ".pdf");
        assert!(policy.validate(&FileCandidate::new("a.pdf", "", 1024)).is_ok());
        assert!(policy.validate(&FileCandidate::new("a.pdf", "", 1025)).is_err());
    }
}
