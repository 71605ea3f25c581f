//! Transport port and the session-aware client wrapped around it.
//!
//! [`TurnTransport`] is the raw request/response abstraction that
//! infrastructure implements (e.g. `HttpTransport` in banter-infra). Uses
//! native async fn in traits (RPITIT). [`TransportClient`] layers the session
//! rules on top: adopting identifiers from turns and the clear-then-adopt
//! restart sequence.

use std::future::Future;

use banter_types::error::TransportError;
use banter_types::turn::BotTurn;

use crate::session::SessionState;

/// One network exchange per call, each answering with a [`BotTurn`].
pub trait TurnTransport: Send + Sync {
    /// Begin a conversation.
    fn start(&self) -> impl Future<Output = Result<BotTurn, TransportError>> + Send;

    /// Send a user message (free text or a button value).
    fn send_message(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> impl Future<Output = Result<BotTurn, TransportError>> + Send;

    /// Discard the given session and begin again.
    fn restart(
        &self,
        session_id: Option<&str>,
    ) -> impl Future<Output = Result<BotTurn, TransportError>> + Send;
}

/// Session-aware wrapper around a [`TurnTransport`].
///
/// Every successful turn is checked for structural validity and its
/// identifier (if any) is adopted into the caller's [`SessionState`] before
/// the turn is returned.
pub struct TransportClient<T> {
    transport: T,
}

impl<T: TurnTransport> TransportClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn start(&self, session: &mut SessionState) -> Result<BotTurn, TransportError> {
        let turn = checked(self.transport.start().await?)?;
        session.adopt(turn.session_id.as_deref());
        Ok(turn)
    }

    pub async fn send_message(
        &self,
        session: &mut SessionState,
        value: &str,
    ) -> Result<BotTurn, TransportError> {
        let turn = checked(self.transport.send_message(session.current(), value).await?)?;
        session.adopt(turn.session_id.as_deref());
        Ok(turn)
    }

    /// Restart the conversation.
    ///
    /// The session is cleared before the request goes out and is not restored
    /// if the request fails. On success the identifier carried by the restart
    /// turn is adopted; a turn without one leaves the session unset.
    pub async fn restart(&self, session: &mut SessionState) -> Result<BotTurn, TransportError> {
        let previous = session.clear();
        let turn = checked(self.transport.restart(previous.as_deref()).await?)?;
        session.adopt(turn.session_id.as_deref());
        Ok(turn)
    }
}

fn checked(turn: BotTurn) -> Result<BotTurn, TransportError> {
    turn.check().map_err(TransportError::InvalidTurn)?;
    Ok(turn)
}
