//! ギャラリーのカテゴリフィルタ
//!
//! カードごとのカテゴリ集合は構築時に一度だけ解析し、
//! フィルタ切替のたびに文字列を分割し直さない。

use std::collections::BTreeSet;

/// 全件表示を表すフィルタ値
pub const FILTER_ALL: &str = "all";

/// 選択中のフィルタ
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    /// `data-filter` の値から変換する（未指定・空は全件）
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(FILTER_ALL) => Filter::All,
            Some(tag) => Filter::Category(tag.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Filter::All => FILTER_ALL,
            Filter::Category(tag) => tag,
        }
    }
}

/// カテゴリ名を表示用ラベルにする（`motion-design` → `motion design`）
pub fn category_label(tag: &str) -> String {
    tag.replace('-', " ")
}

/// 1枚のカードが持つカテゴリ集合
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardCategories(BTreeSet<String>);

impl CardCategories {
    /// カンマ区切りの属性値から作る
    pub fn parse(attr: &str) -> Self {
        Self(
            attr.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn matches(&self, filter: &Filter) -> bool {
        match filter {
            Filter::All => true,
            Filter::Category(tag) => self.contains(tag),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// フィルタ状態とカード一覧
#[derive(Debug, Clone)]
pub struct GalleryFilter {
    active: Filter,
    cards: Vec<CardCategories>,
}

impl GalleryFilter {
    pub fn new(cards: Vec<CardCategories>) -> Self {
        Self {
            active: Filter::All,
            cards,
        }
    }

    pub fn active(&self) -> &Filter {
        &self.active
    }

    pub fn cards(&self) -> &[CardCategories] {
        &self.cards
    }

    /// フィルタを切り替える。既に選択中なら何もせず `false` を返す。
    pub fn select(&mut self, filter: Filter) -> bool {
        if self.active == filter {
            return false;
        }
        self.active = filter;
        true
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.cards
            .get(index)
            .is_some_and(|card| card.matches(&self.active))
    }

    /// カード順の表示フラグ
    pub fn visibility(&self) -> Vec<bool> {
        self.cards
            .iter()
            .map(|card| card.matches(&self.active))
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|card| card.matches(&self.active))
            .count()
    }

    /// 状態表示用の文言
    pub fn status_text(&self) -> String {
        match &self.active {
            Filter::All => format!(
                "Showing all {} {}.",
                self.cards.len(),
                project_noun(self.cards.len())
            ),
            Filter::Category(tag) => {
                let count = self.visible_count();
                format!(
                    "Filtered by {} – {} {} visible.",
                    category_label(tag),
                    count,
                    project_noun(count)
                )
            }
        }
    }
}

fn project_noun(count: usize) -> &'static str {
    if count == 1 {
        "project"
    } else {
        "projects"
    }
}
