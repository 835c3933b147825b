//! Platform-free modal wiring shared with the web frontend.
//!
//! Nothing in this crate touches browser APIs directly. The document and the
//! cookie string are reached through the [`Host`] and [`CookieBackend`]
//! traits so the whole flow can be driven from host-side tests.

pub mod action;
pub mod clock;
pub mod config;
pub mod controller;
pub mod cookie;
pub mod error;
pub mod host;
pub mod markup;
pub mod store;

pub use action::ModalAction;
pub use clock::{Clock, ManualClock};
pub use config::ModalConfig;
pub use controller::{ModalController, ScanReport};
pub use cookie::{CookieBackend, CookieStore, MemoryCookieJar};
pub use error::{ConfigError, StoreError, UnknownAction};
pub use host::{Callback, Element, Host, OnceCallback};
pub use markup::ModalDescriptor;
pub use store::DecisionStore;
