//! Input surface configuration derived from the latest bot turn.

use serde::{Deserialize, Serialize};

use crate::turn::{BotTurn, ChoiceButton, InputType};

/// Discipline applied to a single-line entry control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryDiscipline {
    Text,
    Tel,
}

/// What the input surface currently renders.
///
/// Exactly one rendering is active at a time. A new turn replaces the
/// configuration wholesale; nothing carries over from the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum InputConfig {
    /// Single-line entry, cleared and focused.
    Entry {
        discipline: EntryDiscipline,
        placeholder: String,
    },
    /// Ordered row of choices.
    Choices { buttons: Vec<ChoiceButton> },
    /// No interactive control.
    Hidden,
}

impl InputConfig {
    /// Derive the configuration a turn asks for.
    ///
    /// `default_placeholder` is used when an entry turn does not provide one.
    pub fn from_turn(turn: &BotTurn, default_placeholder: &str) -> Self {
        let placeholder = || {
            turn.placeholder
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| default_placeholder.to_string())
        };
        match turn.input_type {
            InputType::Text => InputConfig::Entry {
                discipline: EntryDiscipline::Text,
                placeholder: placeholder(),
            },
            InputType::Tel => InputConfig::Entry {
                discipline: EntryDiscipline::Tel,
                placeholder: placeholder(),
            },
            InputType::Button => InputConfig::Choices {
                buttons: turn.buttons.clone(),
            },
            InputType::None => InputConfig::Hidden,
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, InputConfig::Hidden)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(input_type: InputType) -> BotTurn {
        BotTurn {
            session_id: None,
            messages: Vec::new(),
            input_type,
            placeholder: None,
            buttons: Vec::new(),
        }
    }

    #[test]
    fn test_text_turn_uses_default_placeholder() {
        let config = InputConfig::from_turn(&turn(InputType::Text), "Type your message...");
        assert_eq!(
            config,
            InputConfig::Entry {
                discipline: EntryDiscipline::Text,
                placeholder: "Type your message...".to_string(),
            }
        );
    }

    #[test]
    fn test_tel_turn_keeps_its_placeholder() {
        let mut t = turn(InputType::Tel);
        t.placeholder = Some("Enter your mobile number".to_string());
        let config = InputConfig::from_turn(&t, "Type your message...");
        assert_eq!(
            config,
            InputConfig::Entry {
                discipline: EntryDiscipline::Tel,
                placeholder: "Enter your mobile number".to_string(),
            }
        );
    }

    #[test]
    fn test_button_turn_copies_choices_in_order() {
        let mut t = turn(InputType::Button);
        t.buttons = vec![ChoiceButton::new("a", "A"), ChoiceButton::new("b", "B")];
        match InputConfig::from_turn(&t, "") {
            InputConfig::Choices { buttons } => {
                assert_eq!(buttons[0].value, "a");
                assert_eq!(buttons[1].value, "b");
            }
            other => panic!("expected choices, got {other:?}"),
        }
    }

    #[test]
    fn test_none_turn_is_hidden() {
        assert!(InputConfig::from_turn(&turn(InputType::None), "x").is_hidden());
        assert!(InputConfig::default().is_hidden());
    }
}
