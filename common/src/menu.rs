//! モバイルナビゲーションパネルの開閉状態

/// ドキュメント上のクリック位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Panel,
    Toggle,
    Outside,
}

/// DOM側で適用する操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// 表示してパネル内の最初の操作要素へフォーカス
    Open,
    /// 非表示にする。`restore_focus` ならトグルボタンへフォーカスを戻す
    Close { restore_focus: bool },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// トグルボタンのクリック
    pub fn toggle(&mut self) -> MenuCommand {
        self.open = !self.open;
        if self.open {
            MenuCommand::Open
        } else {
            MenuCommand::Close {
                restore_focus: false,
            }
        }
    }

    /// ドキュメント全体のクリック。パネル外かつトグル外のときだけ閉じる。
    pub fn document_click(&mut self, target: ClickTarget) -> Option<MenuCommand> {
        if !self.open || target != ClickTarget::Outside {
            return None;
        }
        self.open = false;
        Some(MenuCommand::Close {
            restore_focus: false,
        })
    }

    /// キー入力。開いている間の Escape で閉じる。
    pub fn key_down(&mut self, key: &str) -> Option<MenuCommand> {
        if !self.open || key != "Escape" {
            return None;
        }
        self.open = false;
        Some(MenuCommand::Close {
            restore_focus: true,
        })
    }
}
