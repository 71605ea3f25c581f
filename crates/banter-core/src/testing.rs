//! Test doubles shared by the unit tests of this crate.

use std::collections::VecDeque;
use std::sync::Mutex;

use tokio::time::Instant;

use banter_types::error::TransportError;
use banter_types::input::InputConfig;
use banter_types::transcript::{ChatLogEntry, Sender};
use banter_types::turn::{BotTurn, InputType};

use crate::surface::ChatSurface;
use crate::transport::TurnTransport;

pub fn turn_with(session_id: Option<&str>, messages: &[&str], input_type: InputType) -> BotTurn {
    BotTurn {
        session_id: session_id.map(str::to_string),
        messages: messages.iter().map(|m| m.to_string()).collect(),
        input_type,
        placeholder: None,
        buttons: Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    Start,
    Message {
        session_id: Option<String>,
        message: String,
    },
    Restart {
        session_id: Option<String>,
    },
}

/// Answers requests from a queue of canned results and records every call.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<BotTurn, TransportError>>>,
    calls: Mutex<Vec<TransportCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, turn: BotTurn) {
        self.responses.lock().unwrap().push_back(Ok(turn));
    }

    pub fn push_err(&self, err: TransportError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, call: TransportCall) -> Result<BotTurn, TransportError> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".to_string())))
    }
}

impl TurnTransport for ScriptedTransport {
    async fn start(&self) -> Result<BotTurn, TransportError> {
        self.answer(TransportCall::Start)
    }

    async fn send_message(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<BotTurn, TransportError> {
        self.answer(TransportCall::Message {
            session_id: session_id.map(str::to_string),
            message: message.to_string(),
        })
    }

    async fn restart(&self, session_id: Option<&str>) -> Result<BotTurn, TransportError> {
        self.answer(TransportCall::Restart {
            session_id: session_id.map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    TypingShown,
    TypingHidden,
    Appended(ChatLogEntry),
    Cleared,
    InputConfigured(InputConfig),
}

/// Records every surface call with its (tokio) timestamp.
pub struct RecordingSurface {
    origin: Instant,
    pub events: Vec<(std::time::Duration, SurfaceEvent)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            events: Vec::new(),
        }
    }

    fn record(&mut self, event: SurfaceEvent) {
        self.events.push((Instant::now() - self.origin, event));
    }

    /// Plain text of every appended bot entry, in order.
    pub fn bot_texts(&self) -> Vec<String> {
        self.appended(Sender::Bot)
    }

    pub fn user_texts(&self) -> Vec<String> {
        self.appended(Sender::User)
    }

    fn appended(&self, sender: Sender) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|(_, e)| match e {
                SurfaceEvent::Appended(entry) if entry.sender == sender => {
                    Some(entry.content.plain_text())
                }
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&SurfaceEvent) -> bool) -> usize {
        self.events.iter().filter(|(_, e)| pred(e)).count()
    }

    pub fn last_input(&self) -> Option<&InputConfig> {
        self.events.iter().rev().find_map(|(_, e)| match e {
            SurfaceEvent::InputConfigured(config) => Some(config),
            _ => None,
        })
    }
}

impl ChatSurface for RecordingSurface {
    fn show_typing(&mut self) {
        self.record(SurfaceEvent::TypingShown);
    }

    fn hide_typing(&mut self) {
        self.record(SurfaceEvent::TypingHidden);
    }

    fn append(&mut self, entry: &ChatLogEntry) {
        self.record(SurfaceEvent::Appended(entry.clone()));
    }

    fn clear(&mut self) {
        self.record(SurfaceEvent::Cleared);
    }

    fn configure_input(&mut self, config: &InputConfig) {
        self.record(SurfaceEvent::InputConfigured(config.clone()));
    }
}
