//! Span and field names for chat instrumentation.
//!
//! All constants are string slices usable as `tracing` span names and in
//! structured fields, so the stdout OpenTelemetry export and the fmt layer
//! agree on naming.

// --- Span names ---

/// One HTTP exchange with the chat backend.
pub const SPAN_BACKEND_REQUEST: &str = "banter.backend.request";

// --- Attributes ---

/// Which backend endpoint was called ("start", "message", "restart").
pub const CHAT_ENDPOINT: &str = "chat.endpoint";

/// Whether the request carried a session identifier.
pub const CHAT_HAS_SESSION: &str = "chat.has_session";

/// HTTP status code of the backend response.
pub const HTTP_RESPONSE_STATUS_CODE: &str = "http.response.status_code";

/// Number of messages in the returned turn.
pub const CHAT_TURN_MESSAGES: &str = "chat.turn.messages";

/// Input type requested by the returned turn.
pub const CHAT_TURN_INPUT_TYPE: &str = "chat.turn.input_type";

/// Tracer name registered with OpenTelemetry.
pub const TRACER_NAME: &str = "banter";
