//! サイト設定
//!
//! ホストページの `<script type="application/json" data-site-config>` か
//! `boot_with_config` に渡されたオブジェクトから読み込む。
//! 省略されたキーは既定値になる。

use serde::Deserialize;
use crate::error::{Error, Result};

/// 既定のヘッダー高さ補正（現在セクション判定用）
pub const DEFAULT_HEADER_OFFSET: f64 = 160.0;
/// 既定のアンカースクロール補正
pub const DEFAULT_ANCHOR_OFFSET: f64 = 100.0;
/// 既定の最大ファイルサイズ（50 MiB）
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 50 * 1024 * 1024;
/// 既定の疑似アップロード待ち時間
pub const DEFAULT_SIMULATED_DELAY_MS: u32 = 2500;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub scroll: ScrollConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrollConfig {
    pub header_offset: f64,
    pub anchor_offset: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_offset: DEFAULT_HEADER_OFFSET,
            anchor_offset: DEFAULT_ANCHOR_OFFSET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadConfig {
    pub max_file_size_bytes: u64,
    pub simulated_delay_ms: u32,
    pub accepted_mime_type: String,
    pub accepted_extension: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            simulated_delay_ms: DEFAULT_SIMULATED_DELAY_MS,
            accepted_mime_type: "application/pdf".into(),
            accepted_extension: ".pdf".into(),
        }
    }
}

impl SiteConfig {
    /// JSON文字列から読み込み、検証する
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.scroll.header_offset.is_finite() || self.scroll.header_offset < 0.0 {
            return Err(Error::Config("headerOffset must be a non-negative number".into()));
        }
        if !self.scroll.anchor_offset.is_finite() || self.scroll.anchor_offset < 0.0 {
            return Err(Error::Config("anchorOffset must be a non-negative number".into()));
        }
        if self.upload.max_file_size_bytes == 0 {
            return Err(Error::Config("maxFileSizeBytes must be greater than zero".into()));
        }
        if !self.upload.accepted_extension.starts_with('.') {
            return Err(Error::Config(format!(
                "acceptedExtension must start with '.': {}",
                self.upload.accepted_extension
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = SiteConfig::default();
        assert_eq!(config.scroll.header_offset, 160.0);
        assert_eq!(config.scroll.anchor_offset, 100.0);
        assert_eq!(config.upload.max_file_size_bytes, 52_428_800);
        assert_eq!(config.upload.simulated_delay_ms, 2500);
        assert_eq!(config.upload.accepted_mime_type, "application/pdf");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{"scroll": {"headerOffset": 96}, "upload": {"simulatedDelayMs": 500}}"#;
        let config = SiteConfig::from_json(json).unwrap();
        assert_eq!(config.scroll.header_offset, 96.0);
        assert_eq!(config.scroll.anchor_offset, 100.0);
        assert_eq!(config.upload.simulated_delay_ms, 500);
        assert_eq!(config.upload.max_file_size_bytes, DEFAULT_MAX_FILE_SIZE_BYTES);
    }

    #[test]
    fn test_invalid_json() {
        let result = SiteConfig::from_json("{scroll:");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_rejects_zero_size_limit() {
        let json = r#"{"upload": {"maxFileSizeBytes": 0}}"#;
        assert!(matches!(SiteConfig::from_json(json), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_negative_offset() {
        let json = r#"{"scroll": {"anchorOffset": -4}}"#;
        assert!(matches!(SiteConfig::from_json(json), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_extension_without_dot() {
        let json = r#"{"upload": {"acceptedExtension": "pdf"}}"#;
        let err = SiteConfig::from_json(json).unwrap_err();
        assert!(err.to_string().contains("acceptedExtension"));
    }
}
