//! モバイルナビゲーションパネル

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use studio_site_common::{ClickTarget, MenuCommand, MobileMenu};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent, Window};

use crate::dom;

pub struct MobileMenuController {
    toggle: Element,
    panel: Element,
    state: RefCell<MobileMenu>,
    listeners: RefCell<Vec<EventListener>>,
}

impl MobileMenuController {
    /// `[data-mobile-toggle]` と `[data-mobile-menu]` が両方あるときだけ接続する
    pub fn install(window: &Window, document: &Document) -> Option<Rc<Self>> {
        let toggle = dom::query(document, "[data-mobile-toggle]")?;
        let panel = dom::query(document, "[data-mobile-menu]")?;
        let open = panel.has_attribute("data-open");

        let controller = Rc::new(Self {
            toggle,
            panel,
            state: RefCell::new(MobileMenu::new(open)),
            listeners: RefCell::new(Vec::new()),
        });
        controller.install_listeners(window, document);
        Some(controller)
    }

    fn install_listeners(self: &Rc<Self>, window: &Window, document: &Document) {
        let mut listeners = Vec::new();

        let controller = Rc::downgrade(self);
        listeners.push(EventListener::new(&self.toggle, "click", move |_| {
            if let Some(controller) = controller.upgrade() {
                let command = controller.state.borrow_mut().toggle();
                controller.apply(command);
            }
        }));

        let controller = Rc::downgrade(self);
        listeners.push(EventListener::new(document, "click", move |event| {
            let Some(controller) = controller.upgrade() else {
                return;
            };
            let target = controller.classify(dom::event_target_node(event));
            let command = controller.state.borrow_mut().document_click(target);
            if let Some(command) = command {
                controller.apply(command);
            }
        }));

        let controller = Rc::downgrade(self);
        listeners.push(EventListener::new_with_options(
            window,
            "keydown",
            dom::active_listener(),
            move |event| {
                let Some(controller) = controller.upgrade() else {
                    return;
                };
                let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let command = controller.state.borrow_mut().key_down(&key_event.key());
                if let Some(command) = command {
                    event.prevent_default();
                    controller.apply(command);
                }
            },
        ));

        *self.listeners.borrow_mut() = listeners;
    }

    fn classify(&self, node: Option<web_sys::Node>) -> ClickTarget {
        let node = node.as_ref();
        if self.panel.contains(node) {
            ClickTarget::Panel
        } else if self.toggle.contains(node) {
            ClickTarget::Toggle
        } else {
            ClickTarget::Outside
        }
    }

    fn apply(&self, command: MenuCommand) {
        match command {
            MenuCommand::Open => {
                dom::set_flag(&self.panel, "data-open", true);
                dom::set_flag(&self.panel, "hidden", false);
                dom::set_bool_attr(&self.toggle, "aria-expanded", true);
                if let Some(first) = dom::query_in(&self.panel, "a, button") {
                    dom::focus_without_scroll(&first);
                }
            }
            MenuCommand::Close { restore_focus } => {
                dom::set_flag(&self.panel, "data-open", false);
                dom::set_flag(&self.panel, "hidden", true);
                dom::set_bool_attr(&self.toggle, "aria-expanded", false);
                if restore_focus {
                    dom::focus_without_scroll(&self.toggle);
                }
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }
}
