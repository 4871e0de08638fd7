//! ギャラリーフィルタ（チップボタンでカードの表示を切り替える）

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use studio_site_common::{CardCategories, Filter, GalleryFilter};
use web_sys::{Document, Element};

use crate::dom;

pub struct GalleryController {
    buttons: Vec<(Element, Filter)>,
    cards: Vec<Element>,
    status: Option<Element>,
    state: RefCell<GalleryFilter>,
    listeners: RefCell<Vec<EventListener>>,
}

impl GalleryController {
    /// `[data-filter]` ボタンと `[data-category]` カードに接続する
    ///
    /// どちらも無いページでは `None`。
    pub fn install(document: &Document) -> Option<Rc<Self>> {
        let buttons: Vec<(Element, Filter)> = dom::query_all(document, "[data-filter]")
            .into_iter()
            .map(|button| {
                let filter = Filter::parse(button.get_attribute("data-filter").as_deref());
                (button, filter)
            })
            .collect();
        let cards = dom::query_all(document, "[data-category]");
        if buttons.is_empty() && cards.is_empty() {
            return None;
        }

        let categories = cards
            .iter()
            .map(|card| {
                CardCategories::parse(&card.get_attribute("data-category").unwrap_or_default())
            })
            .collect();

        let controller = Rc::new(Self {
            buttons,
            cards,
            status: dom::query(document, "[data-filter-status]"),
            state: RefCell::new(GalleryFilter::new(categories)),
            listeners: RefCell::new(Vec::new()),
        });
        controller.install_listeners();
        controller.render();
        Some(controller)
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::with_capacity(self.buttons.len());
        for (button, filter) in &self.buttons {
            dom::toggle_class(button, "filter-chip", true);

            let controller = Rc::downgrade(self);
            let filter = filter.clone();
            listeners.push(EventListener::new(button, "click", move |_| {
                if let Some(controller) = controller.upgrade() {
                    controller.select(filter.clone());
                }
            }));
        }
        *self.listeners.borrow_mut() = listeners;
    }

    /// フィルタを選択する。選択中と同じなら何もしない。
    pub fn select(&self, filter: Filter) {
        let changed = self.state.borrow_mut().select(filter);
        if changed {
            self.render();
        }
    }

    pub fn active_filter(&self) -> Filter {
        self.state.borrow().active().clone()
    }

    fn render(&self) {
        let state = self.state.borrow();

        for (button, filter) in &self.buttons {
            let active = filter == state.active();
            dom::toggle_class(button, "is-active", active);
            dom::set_bool_attr(button, "aria-pressed", active);
        }

        for (index, card) in self.cards.iter().enumerate() {
            let visible = state.is_visible(index);
            dom::toggle_class(card, "is-hidden", !visible);
            dom::set_bool_attr(card, "aria-hidden", !visible);
        }

        if let Some(status) = &self.status {
            status.set_text_content(Some(&state.status_text()));
        }
    }
}
