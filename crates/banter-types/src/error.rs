use thiserror::Error;

/// Errors from a single exchange with the chat backend.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedPayload(String),

    #[error("invalid turn: {0}")]
    InvalidTurn(String),
}

/// Local input rejections. These never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("phone number has {found} characters, need at least {required}")]
    PhoneTooShort { found: usize, required: usize },
}

/// Errors from loading widget configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid pacing: typing indicator ({indicator_ms}ms) must be shorter than the message interval ({interval_ms}ms)")]
    InvalidPacing { indicator_ms: u64, interval_ms: u64 },

    #[error("invalid backend url '{0}'")]
    InvalidBackendUrl(String),
}
