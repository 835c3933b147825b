//! The document environment the controller drives.
//!
//! The web frontend implements these traits over `web-sys`; tests implement
//! them over an in-memory tree.

use std::time::Duration;

pub type Callback = Box<dyn FnMut()>;
pub type OnceCallback = Box<dyn FnOnce()>;

/// A handle to one element of the hosting document.
pub trait Element: Clone + 'static {
    fn id(&self) -> String;
    fn attribute(&self, name: &str) -> Option<String>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// True when both handles refer to the same node.
    fn is_same(&self, other: &Self) -> bool;

    /// False once the element has been removed from the document.
    fn is_connected(&self) -> bool;

    // Dialog operations; no-ops for elements that are not dialogs.
    fn is_open(&self) -> bool;
    fn show_modal(&self);
    fn close(&self);
}

pub trait Host: 'static {
    type Element: Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Elements carrying the trigger attribute, in document order.
    fn triggers(&self) -> Vec<Self::Element>;
    /// Dialog elements carrying the timed attribute.
    fn timed_dialogs(&self) -> Vec<Self::Element>;
    /// Anchor links inside external trigger containers.
    fn external_links(&self) -> Vec<Self::Element>;
    /// Close/accept/cancel controls inside `dialog`.
    fn response_controls(&self, dialog: &Self::Element) -> Vec<Self::Element>;

    /// Run `handler` on every activation of `target`.
    fn on_activate(&self, target: &Self::Element, prevent_default: bool, handler: Callback);
    /// Run `callback` once after `delay`. Dropped with the page.
    fn schedule(&self, delay: Duration, callback: OnceCallback);

    fn set_active_marker(&self, active: bool);
}
