//! Input surface controller.
//!
//! Owns the single active [`InputConfig`] and turns raw user actions (typed
//! text, a picked choice) into [`Outgoing`] sends, applying the local rules:
//! trimming, the phone-number guard and restart-token interception.

use banter_types::config::WidgetConfig;
use banter_types::error::ValidationError;
use banter_types::input::{EntryDiscipline, InputConfig};
use banter_types::turn::BotTurn;

/// A user action that passed local checks and should leave the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// Send `value` to the backend, showing `display` as the user's entry.
    Message { display: String, value: String },
    /// The value was the restart token.
    Restart,
}

/// Rules and state for the interactive control area.
#[derive(Debug, Clone)]
pub struct InputController {
    config: InputConfig,
    default_placeholder: String,
    min_phone_digits: usize,
    restart_token: String,
}

impl InputController {
    pub fn new(widget: &WidgetConfig) -> Self {
        Self {
            config: InputConfig::Hidden,
            default_placeholder: widget.default_placeholder.clone(),
            min_phone_digits: widget.min_phone_digits,
            restart_token: widget.restart_token.clone(),
        }
    }

    /// The configuration currently rendered.
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Replace the configuration with the one `turn` asks for.
    pub fn configure(&mut self, turn: &BotTurn) -> &InputConfig {
        self.config = InputConfig::from_turn(turn, &self.default_placeholder);
        &self.config
    }

    /// Put back a configuration saved by [`lock`](Self::lock).
    pub fn restore(&mut self, config: InputConfig) {
        self.config = config;
    }

    /// Hide the control until the next turn configures it, returning what
    /// was active before.
    pub fn lock(&mut self) -> InputConfig {
        std::mem::take(&mut self.config)
    }

    /// Handle text submitted from the entry control.
    ///
    /// Returns `Ok(None)` when there is nothing to send: no entry control is
    /// active, or the text is blank.
    pub fn submit_text(&self, raw: &str) -> Result<Option<Outgoing>, ValidationError> {
        let InputConfig::Entry { discipline, .. } = &self.config else {
            return Ok(None);
        };

        let text = raw.trim();
        if text.is_empty() {
            return Ok(None);
        }

        if *discipline == EntryDiscipline::Tel {
            let found = text.chars().filter(|c| !c.is_whitespace()).count();
            if found < self.min_phone_digits {
                return Err(ValidationError::PhoneTooShort {
                    found,
                    required: self.min_phone_digits,
                });
            }
        }

        Ok(Some(self.route(text.to_string(), text.to_string())))
    }

    /// Handle the choice at `index` of the active choice row.
    pub fn choose(&self, index: usize) -> Option<Outgoing> {
        let InputConfig::Choices { buttons } = &self.config else {
            return None;
        };
        let button = buttons.get(index)?;
        Some(self.route(button.label.clone(), button.value.clone()))
    }

    /// Find a choice by 1-based position or by exact label (case-insensitive).
    pub fn find_choice(&self, input: &str) -> Option<usize> {
        let InputConfig::Choices { buttons } = &self.config else {
            return None;
        };
        let input = input.trim();
        if let Ok(n) = input.parse::<usize>() {
            return (1..=buttons.len()).contains(&n).then(|| n - 1);
        }
        buttons
            .iter()
            .position(|b| b.label.eq_ignore_ascii_case(input))
    }

    fn route(&self, display: String, value: String) -> Outgoing {
        if value == self.restart_token {
            Outgoing::Restart
        } else {
            Outgoing::Message { display, value }
        }
    }
}
