//! ページ単位の起動・破棄
//!
//! 各コンポーネントは独立していて、対応する要素が無いページでは何もしない。

use std::rc::Rc;

use studio_site_common::SiteConfig;
use web_sys::{Document, Window};

use crate::dom;
use crate::dropzone::DropzoneController;
use crate::gallery::GalleryController;
use crate::mobile_menu::MobileMenuController;
use crate::scroll_nav::ScrollNavController;

const CONFIG_SELECTOR: &str = "script[data-site-config]";

/// 起動中のコンポーネント一式
///
/// 破棄するとイベントリスナー・アニメーションフレーム・タイマーがすべて解除される。
#[derive(Default)]
pub struct Site {
    pub gallery: Option<Rc<GalleryController>>,
    pub mobile_menu: Option<Rc<MobileMenuController>>,
    pub scroll_nav: Option<Rc<ScrollNavController>>,
    pub dropzone: Option<Rc<DropzoneController>>,
}

impl Site {
    pub fn boot(window: &Window, document: &Document, config: &SiteConfig) -> Self {
        if let Some(body) = document.body() {
            dom::toggle_class(&body, "js-enabled", true);
        }

        Self {
            gallery: installed("gallery", GalleryController::install(document)),
            mobile_menu: installed("mobile menu", MobileMenuController::install(window, document)),
            scroll_nav: installed(
                "scroll nav",
                ScrollNavController::install(window, document, &config.scroll),
            ),
            dropzone: installed("dropzone", DropzoneController::install(document, &config.upload)),
        }
    }
}

/// 取り付けたか、要素が無く飛ばしたかをdebugログに残す
fn installed<T>(name: &str, controller: Option<T>) -> Option<T> {
    if controller.is_some() {
        gloo::console::debug!(format!("studio-site: {} installed", name));
    } else {
        gloo::console::debug!(format!("studio-site: {} markup not found, skipped", name));
    }
    controller
}

/// ページ内の `<script type="application/json" data-site-config>` を読む
///
/// 無ければ既定値、壊れていれば警告を出して既定値。
pub fn load_page_config(document: &Document) -> SiteConfig {
    let Some(script) = dom::query(document, CONFIG_SELECTOR) else {
        return SiteConfig::default();
    };
    let text = script.text_content().unwrap_or_default();
    match SiteConfig::from_json(&text) {
        Ok(config) => config,
        Err(err) => {
            gloo::console::warn!(format!("studio-site: ignoring site config: {}", err));
            SiteConfig::default()
        }
    }
}
