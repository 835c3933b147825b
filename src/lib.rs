#![cfg(target_arch = "wasm32")]
use modal_core::{ConfigError, CookieStore, ModalConfig, ModalController};
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod cookies;
mod dom;
mod host;
mod selectors;

// Optional `<script type="application/json">` island holding a ModalConfig
const CONFIG_ELEMENT_ID: &str = "modal-config";

fn read_config(document: &web::Document) -> Result<ModalConfig, ConfigError> {
    match dom::json_island(document, CONFIG_ELEMENT_ID) {
        Some(json) => ModalConfig::from_json(&json),
        None => Ok(ModalConfig::default()),
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    dom::document_ready(&document).await;

    let config = read_config(&document);
    let level = config
        .as_ref()
        .map(ModalConfig::level)
        .unwrap_or(log::Level::Info);
    console_log::init_with_level(level).ok();
    log::info!("modal-web starting");
    let config = config.unwrap_or_else(|e| {
        log::warn!("[modals] ignoring #{CONFIG_ELEMENT_ID}: {e}");
        ModalConfig::default()
    });

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let html_document = document
        .clone()
        .dyn_into::<web::HtmlDocument>()
        .map_err(|e| anyhow::anyhow!(format!("not an HTML document: {:?}", e)))?;
    let store = CookieStore::new(cookies::DocumentCookies::new(html_document), cookies::JsClock);
    let controller = ModalController::new(host::WebHost::new(document), store, config);
    controller.init();

    Ok(())
}
