//! Studio Site browser behaviours (WASM)
//!
//! ホストページのマークアップ（`data-*` 属性）に振る舞いを追加する。

pub mod dom;
pub mod dropzone;
pub mod gallery;
pub mod mobile_menu;
pub mod scroll_nav;
pub mod site;

use std::cell::RefCell;

use gloo::events::EventListener;
use studio_site_common::SiteConfig;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::site::Site;

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    when_dom_ready(&document, || {
        mount_from_page();
    });
}

/// ページ内の設定で起動する
///
/// `boot_with_config` で起動済みならその設定を優先し、何もせず `false` を返す。
pub fn mount_from_page() -> bool {
    if is_mounted() {
        return false;
    }
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return false;
    };
    mount(site::load_page_config(&document));
    true
}

/// 設定オブジェクトを指定して起動し直す
#[wasm_bindgen]
pub fn boot_with_config(config: JsValue) -> Result<(), JsValue> {
    let config: SiteConfig = serde_wasm_bindgen::from_value(config)?;
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    mount(config);
    Ok(())
}

/// すべてのコンポーネントを外す（保留中の疑似アップロードも取り消す）
#[wasm_bindgen]
pub fn teardown() {
    let previous = SITE.with(|site| site.borrow_mut().take());
    drop(previous);
}

/// 起動済みか
pub fn is_mounted() -> bool {
    SITE.with(|site| site.borrow().is_some())
}

fn mount(config: SiteConfig) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    teardown();
    let site = Site::boot(&window, &document, &config);
    SITE.with(|slot| *slot.borrow_mut() = Some(site));
}

fn when_dom_ready<F>(document: &Document, callback: F)
where
    F: FnOnce() + 'static,
{
    if document.ready_state() == "loading" {
        EventListener::once(document, "DOMContentLoaded", move |_| callback()).forget();
    } else {
        callback();
    }
}
