//! Session state for the current conversation.
//!
//! Holds the backend-assigned session identifier, if any. The controller owns
//! the single instance and lends it to the transport client, which is the
//! only writer.

/// The backend session identifier for this widget instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    session_id: Option<String>,
}

impl SessionState {
    /// A fresh state with no identifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current identifier, if one has been assigned.
    pub fn current(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.session_id.is_some()
    }

    /// Adopt the identifier carried by a turn. `None` leaves the state as is.
    pub fn adopt(&mut self, session_id: Option<&str>) {
        if let Some(id) = session_id {
            if self.current() != Some(id) {
                tracing::debug!(session_id = id, "Adopting session id");
            }
            self.session_id = Some(id.to_string());
        }
    }

    /// Drop the identifier, returning the one that was held.
    pub fn clear(&mut self) -> Option<String> {
        self.session_id.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let state = SessionState::new();
        assert!(state.current().is_none());
        assert!(!state.is_active());
    }

    #[test]
    fn test_adopt_replaces_identifier() {
        let mut state = SessionState::new();
        state.adopt(Some("first"));
        assert_eq!(state.current(), Some("first"));
        state.adopt(Some("second"));
        assert_eq!(state.current(), Some("second"));
    }

    #[test]
    fn test_adopt_none_keeps_identifier() {
        let mut state = SessionState::new();
        state.adopt(Some("keep"));
        state.adopt(None);
        assert_eq!(state.current(), Some("keep"));
    }

    #[test]
    fn test_clear_returns_previous() {
        let mut state = SessionState::new();
        state.adopt(Some("gone"));
        assert_eq!(state.clear().as_deref(), Some("gone"));
        assert!(!state.is_active());
        assert!(state.clear().is_none());
    }
}
