use thiserror::Error;

/// Failures while persisting a decision record.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cookie name {0:?} contains separator, whitespace or control characters")]
    InvalidName(String),
    #[error("cookie value {0:?} contains separator, whitespace or control characters")]
    InvalidValue(String),
    #[error("expiry timestamp {0}ms is out of range")]
    ExpiryOutOfRange(i64),
    #[error("cookie write rejected by host: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid modal config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid decision key prefix {0:?}")]
    KeyPrefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown modal action {0:?}")]
pub struct UnknownAction(pub String);
