//! Attribute contract read from the hosting page, plus the defensive parsers
//! for the values those attributes carry.

use crate::host::Element;
use std::time::Duration;

// Trigger element; value is the target dialog id
pub const TRIGGER_ATTR: &str = "data-modal-trigger";
// Dialog element; value is the auto-open delay in seconds
pub const TIMED_ATTR: &str = "data-modal-timed";
// Dialog element; value is the decision retention in whole days
pub const RETENTION_ATTR: &str = "data-modal-cookie-expire";

// Response controls inside a dialog
pub const CLOSE_ATTR: &str = "data-modal-close";
pub const ACCEPT_ATTR: &str = "data-modal-accept";
pub const CANCEL_ATTR: &str = "data-modal-cancel";

// Container whose fragment links open dialogs
pub const EXTERNAL_CONTAINER_CLASS: &str = "trigger-modal";
// Marker class toggled on <body> while a dialog is shown
pub const ACTIVE_MODAL_CLASS: &str = "active-modal";

pub const DECISION_KEY_PREFIX: &str = "modalAction_";
pub const DEFAULT_RETENTION_DAYS: i64 = 7;
pub const MAX_RETENTION_DAYS: i64 = 36_500;

// Largest delay a browser timer honours without overflowing
pub const MAX_TIMER_MS: u64 = i32::MAX as u64;

/// Static description of one dialog, read once at scan time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalDescriptor {
    pub id: String,
    /// `None` when the dialog is not timed, `Some(None)` when the delay is malformed.
    pub delay: Option<Option<Duration>>,
    pub retention_days: i64,
}

impl ModalDescriptor {
    pub fn read<E: Element>(dialog: &E, default_retention_days: i64) -> Self {
        Self {
            id: dialog.id(),
            delay: dialog.attribute(TIMED_ATTR).map(|raw| parse_delay(&raw)),
            retention_days: parse_retention_days(
                dialog.attribute(RETENTION_ATTR).as_deref(),
                default_retention_days,
            ),
        }
    }

    #[inline]
    pub fn is_timed(&self) -> bool {
        self.delay.is_some()
    }
}

/// Integer-prefix parse of a retention attribute.
///
/// Leading whitespace and a sign are accepted and anything after the digits
/// is ignored, so `"30 days"` and `"2.5"` read as 30 and 2. Missing or
/// digit-less input falls back to `default`.
pub fn parse_retention_days(raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw else {
        return default;
    };
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return default;
    }
    let magnitude = rest[..digits]
        .parse::<i64>()
        .unwrap_or(MAX_RETENTION_DAYS)
        .min(MAX_RETENTION_DAYS);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Parse a delay in seconds into whole milliseconds.
///
/// Empty and negative values mean "now". Non-numeric or non-finite input
/// returns `None`.
pub fn parse_delay(raw: &str) -> Option<Duration> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(Duration::ZERO);
    }
    let secs = s.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if secs <= 0.0 {
        return Some(Duration::ZERO);
    }
    let ms = (secs * 1000.0).trunc().min(MAX_TIMER_MS as f64) as u64;
    Some(Duration::from_millis(ms))
}

/// Dialog id referenced by a link's fragment (`"/page#promo"` -> `"promo"`).
pub fn fragment_target(href: &str) -> Option<&str> {
    href.split_once('#')
        .map(|(_, frag)| frag)
        .filter(|frag| !frag.is_empty())
}

#[inline]
pub fn decision_key(prefix: &str, modal_id: &str) -> String {
    format!("{prefix}{modal_id}")
}
