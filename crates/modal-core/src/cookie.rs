//! Cookie-backed decision store.
//!
//! The browser exposes cookies as one flat `a=1; b=2` string, so reads go
//! through [`lookup`], which matches names exactly rather than by substring.

use crate::clock::Clock;
use crate::error::StoreError;
use crate::store::DecisionStore;
use chrono::{DateTime, Utc};
use std::cell::RefCell;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
const HTTP_DATE_FMT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Raw access to the document's cookie string.
pub trait CookieBackend {
    fn read(&self) -> String;
    fn write(&self, set_cookie: &str) -> Result<(), StoreError>;
}

impl<B: CookieBackend + ?Sized> CookieBackend for std::rc::Rc<B> {
    fn read(&self) -> String {
        (**self).read()
    }

    fn write(&self, set_cookie: &str) -> Result<(), StoreError> {
        (**self).write(set_cookie)
    }
}

/// Value of the cookie named exactly `name`, if present.
pub fn lookup<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim_start().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim_end())
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && !s
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, ';' | ',' | '=' | '"'))
}

/// Format a millisecond timestamp as an IMF-fixdate (`Thu, 01 Jan 1970 00:00:00 GMT`).
pub fn http_date(ms: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.format(HTTP_DATE_FMT).to_string())
}

pub fn format_set_cookie(name: &str, value: &str, expires_ms: i64) -> Result<String, StoreError> {
    if !is_token(name) {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    if !value.is_empty() && !is_token(value) {
        return Err(StoreError::InvalidValue(value.to_string()));
    }
    let expires = http_date(expires_ms).ok_or(StoreError::ExpiryOutOfRange(expires_ms))?;
    Ok(format!("{name}={value}; expires={expires}; path=/"))
}

/// [`DecisionStore`] over a cookie backend, expiring records after whole days.
pub struct CookieStore<B, C> {
    backend: B,
    clock: C,
}

impl<B: CookieBackend, C: Clock> CookieStore<B, C> {
    pub fn new(backend: B, clock: C) -> Self {
        Self { backend, clock }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: CookieBackend, C: Clock> DecisionStore for CookieStore<B, C> {
    fn get(&self, key: &str) -> Option<String> {
        let header = self.backend.read();
        lookup(&header, key).map(str::to_string)
    }

    fn set(&self, key: &str, value: &str, retention_days: i64) -> Result<(), StoreError> {
        let expires_ms = self
            .clock
            .now_ms()
            .saturating_add(retention_days.saturating_mul(MS_PER_DAY));
        let line = format_set_cookie(key, value, expires_ms)?;
        log::debug!("[cookie] {line}");
        self.backend.write(&line)
    }
}

#[derive(Clone, Debug)]
struct JarEntry {
    name: String,
    value: String,
    expires_ms: Option<i64>,
}

/// In-memory stand-in for `document.cookie`.
///
/// Accepts the same `Set-Cookie`-style lines the browser does, honours
/// `expires` and `max-age` against its clock and serialises live entries in
/// insertion order.
pub struct MemoryCookieJar<C> {
    clock: C,
    entries: RefCell<Vec<JarEntry>>,
}

impl<C: Clock> MemoryCookieJar<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Number of live cookies.
    pub fn len(&self) -> usize {
        self.purge();
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn purge(&self) {
        let now = self.clock.now_ms();
        self.entries
            .borrow_mut()
            .retain(|e| e.expires_ms.map_or(true, |t| t > now));
    }
}

impl<C: Clock> CookieBackend for MemoryCookieJar<C> {
    fn read(&self) -> String {
        self.purge();
        self.entries
            .borrow()
            .iter()
            .map(|e| format!("{}={}", e.name, e.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, set_cookie: &str) -> Result<(), StoreError> {
        let mut parts = set_cookie.split(';');
        let (name, value) = parts
            .next()
            .and_then(|p| p.trim().split_once('='))
            .ok_or_else(|| StoreError::Rejected(set_cookie.to_string()))?;
        if name.is_empty() {
            return Err(StoreError::Rejected(set_cookie.to_string()));
        }

        let now = self.clock.now_ms();
        let mut expires_ms = None;
        let mut max_age_ms = None;
        for attr in parts {
            let (k, v) = attr.trim().split_once('=').unwrap_or((attr.trim(), ""));
            if k.eq_ignore_ascii_case("expires") {
                expires_ms = DateTime::parse_from_rfc2822(v.trim())
                    .ok()
                    .map(|dt| dt.timestamp_millis());
            } else if k.eq_ignore_ascii_case("max-age") {
                max_age_ms = v
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .map(|secs| now.saturating_add(secs.saturating_mul(1000)));
            }
        }

        let entry = JarEntry {
            name: name.to_string(),
            value: value.to_string(),
            expires_ms: max_age_ms.or(expires_ms),
        };
        let mut entries = self.entries.borrow_mut();
        match entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
        drop(entries);
        self.purge();
        Ok(())
    }
}
