//! Studio Site Common Library
//!
//! ブラウザ側の振る舞い（ギャラリーフィルタ・モバイルメニュー・
//! スクロールナビ・アップロード）の状態と文言。DOMには依存しない。

pub mod config;
pub mod error;
pub mod gallery;
pub mod menu;
pub mod scroll;
pub mod upload;

pub use config::{ScrollConfig, SiteConfig, UploadConfig};
pub use error::{Error, Result, UploadError};
pub use gallery::{category_label, CardCategories, Filter, GalleryFilter, FILTER_ALL};
pub use menu::{ClickTarget, MenuCommand, MobileMenu};
pub use scroll::{
    anchor_target_top, current_section, fragment_from_href, FrameThrottle, ScrollMotion,
    SectionOffset,
};
pub use upload::{
    format_size, Dropzone, DropzoneState, DropzoneView, Feedback, FileCandidate, UploadPolicy,
};
