//! Response sequencer: timed playback of a bot turn.
//!
//! A turn with N messages plays as
//! `Idle -> Announcing(0) -> Revealing(0) -> ... -> Revealing(N-1) -> ConfiguringInput -> Idle`.
//!
//! Steps are scheduled at absolute offsets from the turn's arrival, computed
//! up front by [`schedule`]. A spawned timer task posts each step into a
//! channel when its offset is reached; the owner of the sequencer pulls them
//! with [`ResponseSequencer::next_event`] and feeds them back through
//! [`ResponseSequencer::advance`], which validates the transition and hands
//! out the [`Step`] to render.
//!
//! Every turn gets a fresh [`TurnId`]. Beginning a new turn cancels the
//! previous turn's timer task, and steps already queued under an old id are
//! discarded by `advance`.

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use banter_types::config::PacingConfig;
use banter_types::turn::BotTurn;

/// Monotonically increasing identifier of a playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TurnId(pub u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn-{}", self.0)
    }
}

/// How a turn is played back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Typing indicator before every message, messages spaced out.
    Paced(PacingConfig),
    /// Everything at once, no indicator. Used for restart turns.
    Immediate,
}

/// A single scheduled action within a playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    ShowTyping(usize),
    Reveal(usize),
    ConfigureInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledStep {
    /// Offset from the turn's arrival.
    pub offset: Duration,
    pub action: StepAction,
}

/// A step that fell due, tagged with the turn it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerEvent {
    pub turn: TurnId,
    pub action: StepAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerState {
    #[default]
    Idle,
    Announcing(usize),
    Revealing(usize),
    ConfiguringInput,
}

/// What the owner must render for an accepted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    ShowTyping,
    /// Reveal a message. `paced` reveals replace a visible typing indicator.
    Reveal {
        index: usize,
        message: String,
        paced: bool,
    },
    /// Playback is over; configure input from this turn, then call
    /// [`ResponseSequencer::finish`].
    ConfigureInput(BotTurn),
}

/// Compute the playback schedule for a turn with `message_count` messages.
///
/// Offsets are non-decreasing and reveals are in message order. Message `i`
/// is announced at `i * message_interval` and revealed one indicator
/// duration later; input is configured together with the last reveal.
pub fn schedule(message_count: usize, pacing: &Pacing) -> Vec<ScheduledStep> {
    let mut steps = Vec::with_capacity(message_count * 2 + 1);
    let mut last = Duration::ZERO;

    match pacing {
        Pacing::Paced(config) => {
            for i in 0..message_count {
                // A misconfigured indicator longer than the interval must not
                // pull the next announcement ahead of this reveal.
                let announce = (config.message_interval() * i as u32).max(last);
                let reveal = announce + config.typing_indicator();
                steps.push(ScheduledStep {
                    offset: announce,
                    action: StepAction::ShowTyping(i),
                });
                steps.push(ScheduledStep {
                    offset: reveal,
                    action: StepAction::Reveal(i),
                });
                last = reveal;
            }
        }
        Pacing::Immediate => {
            for i in 0..message_count {
                steps.push(ScheduledStep {
                    offset: Duration::ZERO,
                    action: StepAction::Reveal(i),
                });
            }
        }
    }

    steps.push(ScheduledStep {
        offset: last,
        action: StepAction::ConfigureInput,
    });
    steps
}

struct Playback {
    id: TurnId,
    turn: BotTurn,
    paced: bool,
    revealed: usize,
    cancel: CancellationToken,
}

/// Plays bot turns back as timed steps. See the module docs.
pub struct ResponseSequencer {
    next_id: u64,
    active: Option<Playback>,
    state: SequencerState,
    tx: mpsc::UnboundedSender<SequencerEvent>,
    rx: mpsc::UnboundedReceiver<SequencerEvent>,
}

impl ResponseSequencer {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            next_id: 0,
            active: None,
            state: SequencerState::Idle,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Whether a turn is still being played back.
    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    /// Start playing `turn`, superseding any playback in progress.
    ///
    /// Steps due at offset zero are queued before this returns, so a silent
    /// turn or an immediate playback can be drained right away with
    /// [`try_next_event`](Self::try_next_event). Later steps come from a
    /// timer task and require a tokio runtime.
    pub fn begin(&mut self, turn: BotTurn, pacing: Pacing) -> TurnId {
        self.cancel();

        self.next_id += 1;
        let id = TurnId(self.next_id);
        let steps = schedule(turn.messages.len(), &pacing);
        let cancel = CancellationToken::new();

        tracing::debug!(
            turn = %id,
            messages = turn.messages.len(),
            input_type = %turn.input_type,
            paced = matches!(pacing, Pacing::Paced(_)),
            "Beginning playback"
        );

        let (due_now, later): (Vec<_>, Vec<_>) =
            steps.into_iter().partition(|s| s.offset.is_zero());
        for step in due_now {
            let _ = self.tx.send(SequencerEvent {
                turn: id,
                action: step.action,
            });
        }
        if !later.is_empty() {
            spawn_timers(id, later, self.tx.clone(), cancel.clone());
        }

        self.active = Some(Playback {
            id,
            turn,
            paced: matches!(pacing, Pacing::Paced(_)),
            revealed: 0,
            cancel,
        });
        id
    }

    /// Cancel the playback in progress, if any.
    ///
    /// Returns `true` when a typing indicator was left visible and must be
    /// removed by the caller.
    pub fn cancel(&mut self) -> bool {
        let was_announcing = matches!(self.state, SequencerState::Announcing(_));
        if let Some(playback) = self.active.take() {
            tracing::debug!(turn = %playback.id, "Cancelling playback");
            playback.cancel.cancel();
        }
        self.state = SequencerState::Idle;
        was_announcing
    }

    /// Wait for the next due step. Pending forever while nothing is scheduled.
    pub async fn next_event(&mut self) -> Option<SequencerEvent> {
        self.rx.recv().await
    }

    /// Take a step that is already due, without waiting.
    pub fn try_next_event(&mut self) -> Option<SequencerEvent> {
        self.rx.try_recv().ok()
    }

    /// Apply a due step to the state machine.
    ///
    /// Returns `None` for steps of a superseded turn and for transitions the
    /// state machine does not allow.
    pub fn advance(&mut self, event: SequencerEvent) -> Option<Step> {
        let Some(playback) = self.active.as_mut().filter(|p| p.id == event.turn) else {
            tracing::debug!(turn = %event.turn, action = ?event.action, "Discarding stale step");
            return None;
        };

        match (self.state, event.action) {
            (SequencerState::Idle | SequencerState::Revealing(_), StepAction::ShowTyping(i))
                if playback.paced && i == playback.revealed =>
            {
                self.state = SequencerState::Announcing(i);
                Some(Step::ShowTyping)
            }
            (state, StepAction::Reveal(i)) if i == playback.revealed => {
                let allowed = if playback.paced {
                    state == SequencerState::Announcing(i)
                } else {
                    !matches!(state, SequencerState::Announcing(_))
                };
                if !allowed {
                    return reject(state, event);
                }
                playback.revealed += 1;
                self.state = SequencerState::Revealing(i);
                Some(Step::Reveal {
                    index: i,
                    message: playback.turn.messages[i].clone(),
                    paced: playback.paced,
                })
            }
            (SequencerState::Idle | SequencerState::Revealing(_), StepAction::ConfigureInput)
                if playback.revealed == playback.turn.messages.len() =>
            {
                self.state = SequencerState::ConfiguringInput;
                let playback = self.active.take()?;
                Some(Step::ConfigureInput(playback.turn))
            }
            (state, _) => reject(state, event),
        }
    }

    /// Mark input configuration as done, returning to `Idle`.
    pub fn finish(&mut self) {
        if self.state == SequencerState::ConfiguringInput {
            self.state = SequencerState::Idle;
        }
    }
}

impl Default for ResponseSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ResponseSequencer {
    fn drop(&mut self) {
        if let Some(playback) = self.active.take() {
            playback.cancel.cancel();
        }
    }
}

fn reject(state: SequencerState, event: SequencerEvent) -> Option<Step> {
    tracing::warn!(turn = %event.turn, ?state, action = ?event.action, "Rejected out-of-order step");
    None
}

fn spawn_timers(
    id: TurnId,
    steps: Vec<ScheduledStep>,
    tx: mpsc::UnboundedSender<SequencerEvent>,
    cancel: CancellationToken,
) {
    let arrival = Instant::now();
    tokio::spawn(async move {
        for step in steps {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep_until(arrival + step.offset) => {}
            }
            if cancel.is_cancelled() {
                return;
            }
            if tx
                .send(SequencerEvent {
                    turn: id,
                    action: step.action,
                })
                .is_err()
            {
                return;
            }
        }
    });
}
