//! HTTP implementation of the `TurnTransport` port.
//!
//! Every exchange is a JSON `POST` to `{base_url}/api/{start|message|restart}`
//! answered with a bot turn. Failures map onto [`TransportError`]:
//! connection problems to `Network`, non-2xx answers to `Status`, and bodies
//! that are not a valid turn to `MalformedPayload`.

use serde::Serialize;
use tracing::{Instrument, debug, info_span};

use banter_core::transport::TurnTransport;
use banter_observe::attrs;
use banter_types::error::TransportError;
use banter_types::turn::BotTurn;
use banter_types::wire::{Endpoint, MessageRequest, RestartRequest, StartRequest};

/// Chat backend reached over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the backend at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("banter/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for an endpoint.
    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    async fn post<B: Serialize + Sync>(
        &self,
        endpoint: Endpoint,
        has_session: bool,
        body: &B,
    ) -> Result<BotTurn, TransportError> {
        // Field names mirror banter_observe::attrs so `record` below finds them.
        let span = info_span!(
            "banter.backend.request",
            chat.endpoint = %endpoint,
            chat.has_session = has_session,
            http.response.status_code = tracing::field::Empty,
            chat.turn.messages = tracing::field::Empty,
            chat.turn.input_type = tracing::field::Empty,
        );

        async {
            let response = self
                .client
                .post(self.url(endpoint))
                .header("content-type", "application/json")
                .json(body)
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;

            let status = response.status();
            tracing::Span::current().record(attrs::HTTP_RESPONSE_STATUS_CODE, status.as_u16());
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            let turn: BotTurn = serde_json::from_slice(&bytes)
                .map_err(|e| TransportError::MalformedPayload(e.to_string()))?;

            let span = tracing::Span::current();
            span.record(attrs::CHAT_TURN_MESSAGES, turn.messages.len());
            span.record(attrs::CHAT_TURN_INPUT_TYPE, tracing::field::display(turn.input_type));
            debug!(
                messages = turn.messages.len(),
                input_type = %turn.input_type,
                "Received bot turn"
            );
            Ok(turn)
        }
        .instrument(span)
        .await
    }
}

impl TurnTransport for HttpTransport {
    async fn start(&self) -> Result<BotTurn, TransportError> {
        self.post(Endpoint::Start, false, &StartRequest::default()).await
    }

    async fn send_message(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<BotTurn, TransportError> {
        let body = MessageRequest {
            session_id: session_id.map(str::to_string),
            message: message.to_string(),
        };
        self.post(Endpoint::Message, session_id.is_some(), &body).await
    }

    async fn restart(&self, session_id: Option<&str>) -> Result<BotTurn, TransportError> {
        let body = RestartRequest {
            session_id: session_id.map(str::to_string),
        };
        self.post(Endpoint::Restart, session_id.is_some(), &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::Router;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use banter_types::turn::InputType;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    /// Request bodies received by the fake backend, keyed by path.
    type Received = Arc<Mutex<Vec<(String, Value)>>>;

    async fn start(State(received): State<Received>, Json(body): Json<Value>) -> Json<Value> {
        received.lock().unwrap().push(("start".to_string(), body));
        Json(json!({
            "session_id": "",
            "messages": ["Hello! I'm the admissions assistant."],
            "input_type": "text",
            "placeholder": "Your name",
        }))
    }

    async fn message(State(received): State<Received>, Json(body): Json<Value>) -> Json<Value> {
        received.lock().unwrap().push(("message".to_string(), body));
        Json(json!({
            "session_id": "s-42",
            "messages": ["Pick one:"],
            "input_type": "button",
            "buttons": [
                {"value": "flow_schools", "text": "Explore Schools & Courses"},
                {"value": "restart", "text": "Start Over"},
            ],
        }))
    }

    async fn restart(State(received): State<Received>, Json(body): Json<Value>) -> (StatusCode, String) {
        received.lock().unwrap().push(("restart".to_string(), body));
        (StatusCode::INTERNAL_SERVER_ERROR, "backend exploded".to_string())
    }

    /// Serve the fake backend on an ephemeral port.
    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn backend() -> (HttpTransport, Received) {
        let received: Received = Arc::default();
        let router = Router::new()
            .route("/api/start", post(start))
            .route("/api/message", post(message))
            .route("/api/restart", post(restart))
            .with_state(received.clone());
        (HttpTransport::new(spawn_backend(router).await), received)
    }

    #[tokio::test]
    async fn start_posts_empty_object_and_parses_turn() {
        let (transport, received) = backend().await;

        let turn = transport.start().await.unwrap();

        assert_eq!(turn.session_id, None);
        assert_eq!(turn.messages, vec!["Hello! I'm the admissions assistant.".to_string()]);
        assert_eq!(turn.input_type, InputType::Text);
        assert_eq!(turn.placeholder.as_deref(), Some("Your name"));
        assert_eq!(received.lock().unwrap()[0], ("start".to_string(), json!({})));
    }

    #[tokio::test]
    async fn message_sends_session_and_value() {
        let (transport, received) = backend().await;

        let turn = transport.send_message(None, "Rohan").await.unwrap();

        assert_eq!(turn.session_id.as_deref(), Some("s-42"));
        assert_eq!(turn.buttons.len(), 2);
        assert_eq!(turn.buttons[0].label, "Explore Schools & Courses");
        assert_eq!(
            received.lock().unwrap()[0].1,
            json!({"session_id": null, "message": "Rohan"})
        );

        transport.send_message(Some("s-42"), "flow_schools").await.unwrap();
        assert_eq!(
            received.lock().unwrap()[1].1,
            json!({"session_id": "s-42", "message": "flow_schools"})
        );
    }

    #[tokio::test]
    async fn non_success_status_is_reported_with_body() {
        let (transport, received) = backend().await;

        let err = transport.restart(Some("s-42")).await.unwrap_err();

        assert!(matches!(
            err,
            TransportError::Status { status: 500, ref body } if body == "backend exploded"
        ));
        assert_eq!(received.lock().unwrap()[0].1, json!({"session_id": "s-42"}));
    }

    #[tokio::test]
    async fn garbage_body_is_malformed_payload() {
        let router = Router::new().route("/api/start", post(|| async { "<html>oops</html>" }));
        let transport = HttpTransport::new(spawn_backend(router).await);

        let err = transport.start().await.unwrap_err();
        assert!(matches!(err, TransportError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn unknown_input_type_is_malformed_payload() {
        let router = Router::new().route(
            "/api/start",
            post(|| async { Json(json!({"messages": [], "input_type": "slider"})) }),
        );
        let transport = HttpTransport::new(spawn_backend(router).await);

        let err = transport.start().await.unwrap_err();
        assert!(matches!(err, TransportError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_network_error() {
        // Grab a free port, then close it so nothing is listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(format!("http://{addr}"));
        let err = transport.start().await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[test]
    fn test_url_joins_endpoint_path() {
        let transport = HttpTransport::new("http://127.0.0.1:8000");
        assert_eq!(transport.url(Endpoint::Message), "http://127.0.0.1:8000/api/message");
        assert_eq!(transport.base_url(), "http://127.0.0.1:8000");
    }
}
