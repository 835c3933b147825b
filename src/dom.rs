use gloo_timers::callback::Timeout;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Elements matching `selector` anywhere in `document`, in document order.
pub fn query_document(document: &web::Document, selector: &str) -> Vec<web::Element> {
    collect(selector, document.query_selector_all(selector))
}

/// Elements matching `selector` below `scope`.
pub fn query_within(scope: &web::Element, selector: &str) -> Vec<web::Element> {
    collect(selector, scope.query_selector_all(selector))
}

fn collect(
    selector: &str,
    list: Result<web::NodeList, wasm_bindgen::JsValue>,
) -> Vec<web::Element> {
    let list = match list {
        Ok(list) => list,
        Err(e) => {
            log::warn!("[dom] bad selector {selector:?}: {e:?}");
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}

#[inline]
pub fn add_click_listener(
    el: &web::Element,
    prevent_default: bool,
    mut handler: impl FnMut() + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if prevent_default {
            ev.prevent_default();
        }
        handler();
    }) as Box<dyn FnMut(_)>);
    _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn set_timeout(delay: Duration, callback: impl FnOnce() + 'static) {
    let ms = u32::try_from(delay.as_millis()).unwrap_or(i32::MAX as u32);
    // the page owns the timer from here; it dies with the document
    Timeout::new(ms, callback).forget();
}

/// Resolve once the document has finished parsing.
pub async fn document_ready(document: &web::Document) {
    if document.ready_state() != "loading" {
        return;
    }
    let doc = document.clone();
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let done = Closure::once_into_js(move || {
            _ = resolve.call0(&wasm_bindgen::JsValue::NULL);
        });
        _ = doc.add_event_listener_with_callback("DOMContentLoaded", done.unchecked_ref());
    });
    _ = JsFuture::from(promise).await;
}

/// Text of `<script type="application/json" id="{id}">`, if present.
pub fn json_island(document: &web::Document, id: &str) -> Option<String> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty())
}

pub fn set_body_class(document: &web::Document, class: &str, on: bool) {
    if let Some(body) = document.body() {
        let cl = body.class_list();
        _ = if on { cl.add_1(class) } else { cl.remove_1(class) };
    }
}
