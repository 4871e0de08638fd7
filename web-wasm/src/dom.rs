//! DOM操作の小さなヘルパー
//!
//! 要素が見つからない・属性操作に失敗した場合は黙って無視する。

use gloo::events::EventListenerOptions;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, FocusOptions, HtmlElement, Node, NodeList};

/// NodeList を Element の Vec にする（Element以外は捨てる）
fn collect_elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    collect_elements(document.query_selector_all(selector))
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_in(parent: &Element, selector: &str) -> Option<Element> {
    parent.query_selector(selector).ok().flatten()
}

pub fn toggle_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

/// 値を持たない真偽属性（`hidden`, `data-open`, `disabled`）の付け外し
pub fn set_flag(element: &Element, name: &str, on: bool) {
    let _ = element.toggle_attribute_with_force(name, on);
}

/// `aria-*` のような "true"/"false" 文字列属性
pub fn set_bool_attr(element: &Element, name: &str, value: bool) {
    let _ = element.set_attribute(name, if value { "true" } else { "false" });
}

/// スクロールさせずにフォーカスを移す
pub fn focus_without_scroll(element: &Element) {
    let Some(element) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    let options = FocusOptions::new();
    options.set_prevent_scroll(true);
    let _ = element.focus_with_options(&options);
}

pub fn event_target_node(event: &Event) -> Option<Node> {
    event.target().and_then(|target| target.dyn_into::<Node>().ok())
}

/// `preventDefault()` を呼ぶリスナー用（gloo の既定は passive）
pub fn active_listener() -> EventListenerOptions {
    EventListenerOptions::enable_prevent_default()
}
