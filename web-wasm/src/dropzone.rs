//! アップロードドロップゾーン
//!
//! PDFを1件だけ受け付け、検証して状態表示を更新する。
//! 開始ボタン後の「アップロード」は通信せず、タイマーで完了扱いにする。

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use studio_site_common::{Dropzone, Feedback, FileCandidate, UploadConfig, UploadPolicy};
use wasm_bindgen::JsCast;
use web_sys::{Document, DragEvent, Element, File, FileList, HtmlInputElement, KeyboardEvent};

use crate::dom;

const DRAG_ENTER_EVENTS: [&str; 2] = ["dragenter", "dragover"];
const DRAG_EXIT_EVENTS: [&str; 2] = ["dragleave", "dragend"];

pub struct DropzoneController {
    zone: Option<Element>,
    input: Option<HtmlInputElement>,
    file_label: Option<Element>,
    feedback: Option<Element>,
    start: Option<Element>,
    delay_ms: u32,
    state: RefCell<Dropzone>,
    /// 破棄されるとタイマーも解除される
    pending: RefCell<Option<Timeout>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl DropzoneController {
    /// `[data-dropzone]` と `[data-start-btn]` のどちらも無ければ `None`
    pub fn install(document: &Document, config: &UploadConfig) -> Option<Rc<Self>> {
        let zone = dom::query(document, "[data-dropzone]");
        let start = dom::query(document, "[data-start-btn]");
        if zone.is_none() && start.is_none() {
            return None;
        }
        let input = zone
            .as_ref()
            .and_then(|zone| dom::query_in(zone, "input[type=\"file\"]"))
            .and_then(|input| input.dyn_into::<HtmlInputElement>().ok());

        let controller = Rc::new(Self {
            zone,
            input,
            file_label: dom::query(document, "[data-file-name]"),
            feedback: dom::query(document, "[data-file-feedback]"),
            start,
            delay_ms: config.simulated_delay_ms,
            state: RefCell::new(Dropzone::new(UploadPolicy::from(config))),
            pending: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });
        controller.install_listeners();
        if let Some(start) = &controller.start {
            dom::set_flag(start, "disabled", true);
        }
        Some(controller)
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();

        if let (Some(zone), Some(input)) = (&self.zone, &self.input) {
            for name in DRAG_ENTER_EVENTS {
                let zone_for_event = zone.clone();
                listeners.push(EventListener::new_with_options(
                    zone,
                    name,
                    dom::active_listener(),
                    move |event| {
                        event.prevent_default();
                        dom::toggle_class(&zone_for_event, "is-dragover", true);
                    },
                ));
            }

            for name in DRAG_EXIT_EVENTS {
                let zone_for_event = zone.clone();
                listeners.push(EventListener::new(zone, name, move |_| {
                    dom::toggle_class(&zone_for_event, "is-dragover", false);
                }));
            }

            let controller = Rc::downgrade(self);
            listeners.push(EventListener::new_with_options(
                zone,
                "drop",
                dom::active_listener(),
                move |event| {
                    event.prevent_default();
                    let Some(controller) = controller.upgrade() else {
                        return;
                    };
                    if let Some(zone) = &controller.zone {
                        dom::toggle_class(zone, "is-dragover", false);
                    }
                    // 複数ドロップされても先頭の1件だけ使う
                    let first = event
                        .dyn_ref::<DragEvent>()
                        .and_then(DragEvent::data_transfer)
                        .and_then(|transfer| transfer.files())
                        .and_then(|files| first_file(&files));
                    if let Some(file) = first {
                        controller.select(Some(file));
                    }
                },
            ));

            let controller = Rc::downgrade(self);
            listeners.push(EventListener::new(input, "change", move |_| {
                let Some(controller) = controller.upgrade() else {
                    return;
                };
                let file = controller
                    .input
                    .as_ref()
                    .and_then(HtmlInputElement::files)
                    .and_then(|files| first_file(&files));
                controller.select(file);
            }));

            let input_for_key = input.clone();
            listeners.push(EventListener::new_with_options(
                zone,
                "keydown",
                dom::active_listener(),
                move |event| {
                    let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    let key = key_event.key();
                    if key == "Enter" || key == " " {
                        event.prevent_default();
                        input_for_key.click();
                    }
                },
            ));
        }

        if let Some(start) = &self.start {
            let controller = Rc::downgrade(self);
            listeners.push(EventListener::new_with_options(
                start,
                "click",
                dom::active_listener(),
                move |event| {
                    let Some(controller) = controller.upgrade() else {
                        return;
                    };
                    if !controller.confirm() {
                        event.prevent_default();
                    }
                },
            ));
        }

        *self.listeners.borrow_mut() = listeners;
    }

    /// ファイルを受け取り検証する（`None` は選択解除）
    pub fn select(&self, file: Option<FileCandidate>) {
        self.state.borrow_mut().select(file);
        self.render();
    }

    /// 開始操作。送信を始めたら `true`、ファイル未選択なら `false`。
    pub fn confirm(self: &Rc<Self>) -> bool {
        let result = self.state.borrow_mut().confirm();
        self.render();
        if result.is_err() {
            return false;
        }

        let controller = Rc::downgrade(self);
        let timeout = Timeout::new(self.delay_ms, move || {
            let Some(controller) = controller.upgrade() else {
                return;
            };
            controller.pending.borrow_mut().take();
            let finished = controller.state.borrow_mut().finish();
            if finished {
                controller.render();
            }
        });
        *self.pending.borrow_mut() = Some(timeout);
        true
    }

    pub fn is_submitting(&self) -> bool {
        self.state.borrow().is_submitting()
    }

    fn render(&self) {
        let state = self.state.borrow();
        let view = state.view();

        if let Some(zone) = &self.zone {
            dom::toggle_class(zone, "has-file", view.has_file);
        }
        if view.clear_input {
            if let Some(input) = &self.input {
                input.set_value("");
            }
        }
        if let Some(label) = &self.file_label {
            label.set_text_content(Some(&view.file_label));
        }
        if let Some(feedback) = &self.feedback {
            feedback.set_text_content(Some(&view.message));
            dom::toggle_class(feedback, "error", view.feedback == Feedback::Error);
            dom::toggle_class(feedback, "success", view.feedback == Feedback::Success);
            if view.feedback == Feedback::Success {
                let _ = feedback.set_attribute("role", "status");
                let _ = feedback.set_attribute("aria-live", "polite");
            }
        }
        if let Some(start) = &self.start {
            dom::set_flag(start, "disabled", !view.start_enabled);
        }
    }
}

fn first_file(files: &FileList) -> Option<FileCandidate> {
    files.get(0).map(|file| candidate_from(&file))
}

fn candidate_from(file: &File) -> FileCandidate {
    FileCandidate::new(file.name(), file.type_(), file.size() as u64)
}
