use crate::error::StoreError;
use std::rc::Rc;

/// Durable key/value store holding one decision record per modal.
///
/// Writes replace the whole value, so callers never read-modify-write.
pub trait DecisionStore {
    /// Stored value, or `None` when absent or expired.
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str, retention_days: i64) -> Result<(), StoreError>;
}

impl<S: DecisionStore + ?Sized> DecisionStore for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str, retention_days: i64) -> Result<(), StoreError> {
        (**self).set(key, value, retention_days)
    }
}
