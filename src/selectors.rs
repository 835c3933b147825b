// CSS selectors for the markup contract. Pure string building so host tests
// can include this file directly.

use modal_core::markup::{
    ACCEPT_ATTR, CANCEL_ATTR, CLOSE_ATTR, EXTERNAL_CONTAINER_CLASS, TIMED_ATTR, TRIGGER_ATTR,
};

#[inline]
pub fn attr_selector(attr: &str) -> String {
    format!("[{attr}]")
}

pub fn trigger_selector() -> String {
    attr_selector(TRIGGER_ATTR)
}

pub fn timed_dialog_selector() -> String {
    format!("dialog{}", attr_selector(TIMED_ATTR))
}

pub fn response_control_selector() -> String {
    [CLOSE_ATTR, ACCEPT_ATTR, CANCEL_ATTR]
        .iter()
        .map(|a| attr_selector(a))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn external_link_selector() -> String {
    format!(".{EXTERNAL_CONTAINER_CLASS} a[href*=\"#\"]")
}
