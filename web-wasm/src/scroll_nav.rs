//! スクロールナビゲーション
//!
//! - 現在表示中のセクションに対応するナビリンクを強調する
//! - ページ内アンカーをヘッダー分ずらしてスクロールする

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use studio_site_common::{
    anchor_target_top, current_section, fragment_from_href, FrameThrottle, ScrollConfig,
    ScrollMotion, SectionOffset,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::dom;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// ナビリンクと、その `href` が指すセクションID
struct NavLink {
    element: Element,
    target: Option<String>,
}

pub struct ScrollNavController {
    window: Window,
    document: Document,
    sections: Vec<HtmlElement>,
    links: Vec<NavLink>,
    header_offset: f64,
    anchor_offset: f64,
    motion: ScrollMotion,
    throttle: RefCell<FrameThrottle>,
    frame: RefCell<Option<AnimationFrame>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl ScrollNavController {
    pub fn install(
        window: &Window,
        document: &Document,
        config: &ScrollConfig,
    ) -> Option<Rc<Self>> {
        let sections: Vec<HtmlElement> = dom::query_all(document, "[data-section]")
            .into_iter()
            .filter_map(|section| section.dyn_into::<HtmlElement>().ok())
            .collect();
        let links: Vec<NavLink> = dom::query_all(document, "[data-nav-link]")
            .into_iter()
            .map(|element| {
                let target = element
                    .get_attribute("href")
                    .as_deref()
                    .and_then(fragment_from_href)
                    .map(decode_fragment);
                NavLink { element, target }
            })
            .collect();
        let triggers = dom::query_all(document, "[data-scroll-to]");
        if sections.is_empty() && links.is_empty() && triggers.is_empty() {
            return None;
        }

        let reduced_motion = window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .is_some_and(|query| query.matches());

        let controller = Rc::new(Self {
            window: window.clone(),
            document: document.clone(),
            sections,
            links,
            header_offset: config.header_offset,
            anchor_offset: config.anchor_offset,
            motion: ScrollMotion::for_reduced_motion(reduced_motion),
            throttle: RefCell::new(FrameThrottle::default()),
            frame: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });
        controller.install_listeners(&triggers);
        controller.update_active();
        Some(controller)
    }

    fn install_listeners(self: &Rc<Self>, triggers: &[Element]) {
        let mut listeners = Vec::new();

        // passive
        let controller = Rc::downgrade(self);
        listeners.push(EventListener::new(&self.window, "scroll", move |_| {
            if let Some(controller) = controller.upgrade() {
                controller.queue_update();
            }
        }));

        for link in &self.links {
            let Some(target) = link.target.clone() else {
                continue;
            };
            listeners.push(self.anchor_listener(&link.element, target));
        }

        for trigger in triggers {
            let Some(target) = trigger
                .get_attribute("data-scroll-to")
                .filter(|target| !target.is_empty())
            else {
                continue;
            };
            listeners.push(self.anchor_listener(trigger, target));
        }

        *self.listeners.borrow_mut() = listeners;
    }

    fn anchor_listener(self: &Rc<Self>, element: &Element, target: String) -> EventListener {
        let controller = Rc::downgrade(self);
        EventListener::new_with_options(element, "click", dom::active_listener(), move |event| {
            let Some(controller) = controller.upgrade() else {
                return;
            };
            let Some(section) = controller
                .document
                .get_element_by_id(&target)
                .and_then(|section| section.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };
            event.prevent_default();
            controller.scroll_to(&section);
        })
    }

    /// 1フレームに1回だけ再計算する
    fn queue_update(self: &Rc<Self>) {
        if !self.throttle.borrow_mut().request() {
            return;
        }
        let controller = Rc::downgrade(self);
        let handle = request_animation_frame(move |_| {
            let Some(controller) = controller.upgrade() else {
                return;
            };
            controller.frame.borrow_mut().take();
            controller.update_active();
            controller.throttle.borrow_mut().complete();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn section_offsets(&self) -> Vec<SectionOffset> {
        self.sections
            .iter()
            .map(|section| SectionOffset::new(section.id(), f64::from(section.offset_top())))
            .collect()
    }

    /// 現在のセクションに対応するリンクへ `is-active` と `aria-current` を付ける
    pub fn update_active(&self) {
        if self.sections.is_empty() || self.links.is_empty() {
            return;
        }
        let offsets = self.section_offsets();
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let current = current_section(&offsets, scroll_y, self.header_offset);

        for link in &self.links {
            let active = current.is_some() && link.target.as_deref() == current;
            dom::toggle_class(&link.element, "is-active", active);
            if active {
                let _ = link.element.set_attribute("aria-current", "page");
            } else {
                let _ = link.element.remove_attribute("aria-current");
            }
        }
    }

    fn scroll_to(&self, section: &HtmlElement) {
        let options = ScrollToOptions::new();
        options.set_top(anchor_target_top(
            f64::from(section.offset_top()),
            self.anchor_offset,
        ));
        options.set_behavior(match self.motion {
            ScrollMotion::Instant => ScrollBehavior::Instant,
            ScrollMotion::Smooth => ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

/// `#caf%C3%A9` のようなフラグメントをデコードする（失敗時はそのまま）
fn decode_fragment(fragment: &str) -> String {
    js_sys::decode_uri_component(fragment)
        .map(String::from)
        .unwrap_or_else(|_| fragment.to_string())
}
