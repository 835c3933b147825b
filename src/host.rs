use crate::dom;
use crate::selectors;
use modal_core::markup::ACTIVE_MODAL_CLASS;
use modal_core::{Callback, Element, Host, OnceCallback};
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct WebElement(web::Element);

impl WebElement {
    #[inline]
    fn dialog(&self) -> Option<&web::HtmlDialogElement> {
        self.0.dyn_ref::<web::HtmlDialogElement>()
    }
}

impl Element for WebElement {
    fn id(&self) -> String {
        self.0.id()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.0.has_attribute(name)
    }

    fn is_same(&self, other: &Self) -> bool {
        let node: &web::Node = &other.0;
        self.0.is_same_node(Some(node))
    }

    fn is_connected(&self) -> bool {
        self.0.is_connected()
    }

    fn is_open(&self) -> bool {
        self.dialog().map(|d| d.open()).unwrap_or(false)
    }

    fn show_modal(&self) {
        match self.dialog() {
            Some(d) => {
                if let Err(e) = d.show_modal() {
                    log::warn!("[modals] showModal on #{} failed: {:?}", self.0.id(), e);
                }
            }
            None => log::warn!("[modals] #{} is not a <dialog>", self.0.id()),
        }
    }

    fn close(&self) {
        if let Some(d) = self.dialog() {
            d.close();
        }
    }
}

pub struct WebHost {
    document: web::Document,
}

impl WebHost {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }

    fn query(&self, selector: &str) -> Vec<WebElement> {
        dom::query_document(&self.document, selector)
            .into_iter()
            .map(WebElement)
            .collect()
    }
}

impl Host for WebHost {
    type Element = WebElement;

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        if id.is_empty() {
            return None;
        }
        self.document.get_element_by_id(id).map(WebElement)
    }

    fn triggers(&self) -> Vec<WebElement> {
        self.query(&selectors::trigger_selector())
    }

    fn timed_dialogs(&self) -> Vec<WebElement> {
        self.query(&selectors::timed_dialog_selector())
    }

    fn external_links(&self) -> Vec<WebElement> {
        self.query(&selectors::external_link_selector())
    }

    fn response_controls(&self, dialog: &WebElement) -> Vec<WebElement> {
        dom::query_within(&dialog.0, &selectors::response_control_selector())
            .into_iter()
            .map(WebElement)
            .collect()
    }

    fn on_activate(&self, target: &WebElement, prevent_default: bool, mut handler: Callback) {
        dom::add_click_listener(&target.0, prevent_default, move || handler());
    }

    fn schedule(&self, delay: Duration, callback: OnceCallback) {
        dom::set_timeout(delay, callback);
    }

    fn set_active_marker(&self, active: bool) {
        dom::set_body_class(&self.document, ACTIVE_MODAL_CLASS, active);
    }
}
