//! スクロール位置による現在セクション判定とアンカースクロール
//!
//! 判定はスクロール毎に位置から再計算する（状態として保持しない）。
//! 再計算はアニメーションフレーム単位に間引く。

/// ページ内セクションの位置
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOffset {
    pub id: String,
    pub top: f64,
}

impl SectionOffset {
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self { id: id.into(), top }
    }
}

/// 現在のセクションIDを返す
///
/// 文書順に走査し、`scroll_y + header_offset` 以下の位置にある最後の
/// セクションを選ぶ。該当なしなら先頭セクション。
pub fn current_section(
    sections: &[SectionOffset],
    scroll_y: f64,
    header_offset: f64,
) -> Option<&str> {
    let position = scroll_y + header_offset;
    let mut current = sections.first()?;
    for section in sections {
        if position >= section.top {
            current = section;
        } else {
            break;
        }
    }
    Some(current.id.as_str())
}

/// `href` からフラグメント部分を取り出す（`#` 単体や外部URLは `None`）
///
/// パーセントデコードは呼び出し側で行う。
pub fn fragment_from_href(href: &str) -> Option<&str> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() {
        None
    } else {
        Some(fragment)
    }
}

/// アンカークリック時のスクロール先
pub fn anchor_target_top(section_top: f64, anchor_offset: f64) -> f64 {
    section_top - anchor_offset
}

/// スクロール方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMotion {
    Instant,
    Smooth,
}

impl ScrollMotion {
    /// `prefers-reduced-motion: reduce` が有効なら即時移動
    pub fn for_reduced_motion(reduced: bool) -> Self {
        if reduced {
            ScrollMotion::Instant
        } else {
            ScrollMotion::Smooth
        }
    }
}

/// フレーム単位の再計算ガード
#[derive(Debug, Default)]
pub struct FrameThrottle {
    ticking: bool,
}

impl FrameThrottle {
    /// フレーム要求が必要なら `true`。既に要求済みなら `false`。
    pub fn request(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    /// フレームコールバック実行後に呼ぶ
    pub fn complete(&mut self) {
        self.ticking = false;
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionOffset> {
        vec![
            SectionOffset::new("intro", 0.0),
            SectionOffset::new("work", 800.0),
            SectionOffset::new("contact", 1600.0),
        ]
    }

    #[test]
    fn test_top_of_page_selects_first() {
        assert_eq!(current_section(&sections(), 0.0, 160.0), Some("intro"));
    }

    #[test]
    fn test_scrolled_past_second_section() {
        // 750 + 160 = 910 >= 800, < 1600
        assert_eq!(current_section(&sections(), 750.0, 160.0), Some("work"));
    }

    #[test]
    fn test_exact_boundary() {
        assert_eq!(current_section(&sections(), 640.0, 160.0), Some("work"));
        assert_eq!(current_section(&sections(), 639.0, 160.0), Some("intro"));
        assert_eq!(current_section(&sections(), 1440.0, 160.0), Some("contact"));
    }

    #[test]
    fn test_defaults_to_first_when_none_reached() {
        let sections = vec![
            SectionOffset::new("hero", 400.0),
            SectionOffset::new("about", 900.0),
        ];
        assert_eq!(current_section(&sections, 0.0, 160.0), Some("hero"));
    }

    #[test]
    fn test_empty_sections() {
        assert_eq!(current_section(&[], 500.0, 160.0), None);
    }

    #[test]
    fn test_fragment_from_href() {
        assert_eq!(fragment_from_href("#work"), Some("work"));
        assert_eq!(fragment_from_href("#"), None);
        assert_eq!(fragment_from_href(""), None);
        assert_eq!(fragment_from_href("/studio#work"), None);
        assert_eq!(fragment_from_href("#caf%C3%A9"), Some("caf%C3%A9"));
    }

    #[test]
    fn test_anchor_target_top() {
        assert_eq!(anchor_target_top(800.0, 100.0), 700.0);
        assert_eq!(anchor_target_top(40.0, 100.0), -60.0);
    }

    #[test]
    fn test_scroll_motion() {
        assert_eq!(ScrollMotion::for_reduced_motion(true), ScrollMotion::Instant);
        assert_eq!(ScrollMotion::for_reduced_motion(false), ScrollMotion::Smooth);
    }

    #[test]
    fn test_frame_throttle_coalesces() {
        let mut throttle = FrameThrottle::default();
        assert!(throttle.request());
        assert!(!throttle.request());
        assert!(!throttle.request());
        assert!(throttle.is_ticking());
        throttle.complete();
        assert!(throttle.request());
    }
}
