use modal_core::{Clock, CookieBackend, StoreError};
use web_sys as web;

/// `document.cookie` as a [`CookieBackend`].
pub struct DocumentCookies {
    document: web::HtmlDocument,
}

impl DocumentCookies {
    pub fn new(document: web::HtmlDocument) -> Self {
        Self { document }
    }
}

impl CookieBackend for DocumentCookies {
    fn read(&self) -> String {
        self.document.cookie().unwrap_or_default()
    }

    fn write(&self, set_cookie: &str) -> Result<(), StoreError> {
        self.document
            .set_cookie(set_cookie)
            .map_err(|e| StoreError::Rejected(format!("{:?}", e)))
    }
}

pub struct JsClock;

impl Clock for JsClock {
    #[inline]
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}
