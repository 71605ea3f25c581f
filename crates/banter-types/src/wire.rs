//! Request bodies and endpoint paths of the chat backend.
//!
//! Every endpoint answers with a [`crate::turn::BotTurn`].

use serde::{Deserialize, Serialize};

use std::fmt;

/// The three backend endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Message,
    Restart,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Start => "/api/start",
            Endpoint::Message => "/api/message",
            Endpoint::Restart => "/api/restart",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Message => write!(f, "message"),
            Endpoint::Restart => write!(f, "restart"),
        }
    }
}

/// Body of `POST /api/start` (serializes to `{}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartRequest {}

/// Body of `POST /api/message`.
///
/// `session_id` is sent as `null` when no session exists yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    pub session_id: Option<String>,
    pub message: String,
}

/// Body of `POST /api/restart`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestartRequest {
    pub session_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Start.path(), "/api/start");
        assert_eq!(Endpoint::Message.path(), "/api/message");
        assert_eq!(Endpoint::Restart.path(), "/api/restart");
        assert_eq!(Endpoint::Restart.to_string(), "restart");
    }

    #[test]
    fn test_start_request_is_empty_object() {
        assert_eq!(serde_json::to_string(&StartRequest::default()).unwrap(), "{}");
    }

    #[test]
    fn test_message_request_without_session_sends_null() {
        let body = MessageRequest {
            session_id: None,
            message: "Rohan".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"session_id":null,"message":"Rohan"}"#
        );
    }

    #[test]
    fn test_restart_request_with_session() {
        let body = RestartRequest {
            session_id: Some("s-1".to_string()),
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"session_id":"s-1"}"#);
    }
}
