//! Chat controller: the single owner of the widget's state.
//!
//! `ChatController` wires the pieces together. It holds the session, the
//! transcript, the input controller and the sequencer, lends the session to
//! the transport client, and is the only code that touches the surface.
//!
//! The front end drives it from one task:
//!
//! ```ignore
//! controller.start().await;
//! loop {
//!     tokio::select! {
//!         Some(event) = controller.next_event() => controller.apply(event),
//!         action = next_user_action() => controller.handle(action).await,
//!     }
//! }
//! ```

use tracing::{error, info, warn};

use banter_types::config::{PacingConfig, WidgetConfig};
use banter_types::error::{TransportError, ValidationError};
use banter_types::input::InputConfig;
use banter_types::transcript::{ChatLogEntry, Sender};
use banter_types::turn::BotTurn;
use banter_types::wire::Endpoint;

use crate::input::{InputController, Outgoing};
use crate::markdown;
use crate::sequencer::{Pacing, ResponseSequencer, SequencerEvent, SequencerState, Step};
use crate::session::SessionState;
use crate::surface::ChatSurface;
use crate::transcript::{ExportStyle, Transcript};
use crate::transport::{TransportClient, TurnTransport};

/// Bot-styled notice shown when a backend exchange fails.
pub const ERROR_MESSAGE: &str = "Sorry, something went wrong. Please try again.";

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Text typed into the entry control.
    SubmitText(String),
    /// The choice at this index of the active choice row.
    Choose(usize),
    /// Explicit restart request.
    Restart,
}

pub struct ChatController<T, S> {
    client: TransportClient<T>,
    session: SessionState,
    surface: S,
    transcript: Transcript,
    input: InputController,
    sequencer: ResponseSequencer,
    pacing: PacingConfig,
    export_style: ExportStyle,
}

impl<T: TurnTransport, S: ChatSurface> ChatController<T, S> {
    pub fn new(transport: T, surface: S, config: &WidgetConfig) -> Self {
        Self {
            client: TransportClient::new(transport),
            session: SessionState::new(),
            surface,
            transcript: Transcript::new(),
            input: InputController::new(config),
            sequencer: ResponseSequencer::new(),
            pacing: config.pacing,
            export_style: ExportStyle {
                bot_icon: config.bot_icon.clone(),
                icon_fallback_color: config.icon_fallback_color.clone(),
            },
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    pub fn input_config(&self) -> &InputConfig {
        self.input.config()
    }

    pub fn sequencer_state(&self) -> SequencerState {
        self.sequencer.state()
    }

    pub fn is_playing(&self) -> bool {
        self.sequencer.is_playing()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The transcript as exportable HTML.
    pub fn transcript_html(&self) -> String {
        self.transcript.to_html(&self.export_style)
    }

    /// Open the conversation (page load).
    pub async fn start(&mut self) {
        info!("Starting chat");
        match self.client.start(&mut self.session).await {
            Ok(turn) => self.play(turn, Pacing::Paced(self.pacing)),
            Err(err) => self.fail(Endpoint::Start, err),
        }
    }

    /// React to a user action.
    pub async fn handle(&mut self, action: UserAction) {
        let outgoing = match action {
            UserAction::SubmitText(raw) => match self.input.submit_text(&raw) {
                Ok(Some(outgoing)) => outgoing,
                Ok(None) => return,
                Err(err) => {
                    self.reject(err);
                    return;
                }
            },
            UserAction::Choose(index) => match self.input.choose(index) {
                Some(outgoing) => outgoing,
                None => return,
            },
            UserAction::Restart => Outgoing::Restart,
        };

        match outgoing {
            Outgoing::Restart => self.restart().await,
            Outgoing::Message { display, value } => self.send(display, value).await,
        }
    }

    /// Wipe the conversation and ask the backend for a fresh one.
    ///
    /// The restart turn is played back immediately, without pacing.
    pub async fn restart(&mut self) {
        info!(had_session = self.session.is_active(), "Restarting chat");
        if self.sequencer.cancel() {
            self.surface.hide_typing();
        }
        self.transcript.clear();
        self.surface.clear();
        self.input.lock();
        self.surface.configure_input(&InputConfig::Hidden);

        match self.client.restart(&mut self.session).await {
            Ok(turn) => self.play(turn, Pacing::Immediate),
            Err(err) => self.fail(Endpoint::Restart, err),
        }
    }

    /// Wait for the next due playback step.
    pub async fn next_event(&mut self) -> Option<SequencerEvent> {
        self.sequencer.next_event().await
    }

    /// Render a due playback step.
    pub fn apply(&mut self, event: SequencerEvent) {
        match self.sequencer.advance(event) {
            Some(Step::ShowTyping) => self.surface.show_typing(),
            Some(Step::Reveal { message, paced, .. }) => {
                if paced {
                    self.surface.hide_typing();
                }
                self.post(ChatLogEntry::new(Sender::Bot, markdown::render(&message)), true);
            }
            Some(Step::ConfigureInput(turn)) => {
                let config = self.input.configure(&turn).clone();
                self.surface.configure_input(&config);
                self.sequencer.finish();
            }
            None => {}
        }
    }

    /// Play the current turn to the end.
    pub async fn finish_playback(&mut self) {
        while self.sequencer.is_playing() {
            match self.next_event().await {
                Some(event) => self.apply(event),
                None => break,
            }
        }
    }

    async fn send(&mut self, display: String, value: String) {
        self.post(ChatLogEntry::new(Sender::User, markdown::render(&display)), true);
        let previous = self.input.lock();
        self.surface.configure_input(&InputConfig::Hidden);

        self.surface.show_typing();
        let result = self.client.send_message(&mut self.session, &value).await;
        self.surface.hide_typing();

        match result {
            Ok(turn) => self.play(turn, Pacing::Paced(self.pacing)),
            Err(err) => {
                self.fail(Endpoint::Message, err);
                self.surface.configure_input(&previous);
                self.input.restore(previous);
            }
        }
    }

    fn play(&mut self, turn: BotTurn, pacing: Pacing) {
        if self.sequencer.cancel() {
            self.surface.hide_typing();
        }
        self.sequencer.begin(turn, pacing);
        while let Some(event) = self.sequencer.try_next_event() {
            self.apply(event);
        }
    }

    fn post(&mut self, entry: ChatLogEntry, record: bool) {
        self.surface.append(&entry);
        if record {
            self.transcript.push(entry);
        }
    }

    fn fail(&mut self, endpoint: Endpoint, err: TransportError) {
        error!(endpoint = %endpoint, error = %err, "Chat request failed");
        self.surface.hide_typing();
        let entry = ChatLogEntry::new(Sender::Bot, markdown::render(ERROR_MESSAGE)).into_error();
        self.post(entry, true);
    }

    fn reject(&mut self, err: ValidationError) {
        warn!(error = %err, "Input rejected locally");
        let notice = match err {
            ValidationError::PhoneTooShort { required, .. } => {
                format!("Please enter a valid mobile number (at least {required} digits).")
            }
        };
        self.post(ChatLogEntry::new(Sender::Bot, markdown::render(&notice)), false);
    }
}
