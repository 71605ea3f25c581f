//! Bot turn types: one complete backend response cycle.
//!
//! A [`BotTurn`] bundles zero or more bot messages with the descriptor of the
//! input the user should respond with next. The same shape is returned by
//! every backend endpoint.

use serde::{Deserialize, Deserializer, Serialize};

use std::fmt;
use std::str::FromStr;

/// Kind of input the backend expects for the next user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Tel,
    Button,
    None,
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputType::Text => write!(f, "text"),
            InputType::Tel => write!(f, "tel"),
            InputType::Button => write!(f, "button"),
            InputType::None => write!(f, "none"),
        }
    }
}

impl FromStr for InputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(InputType::Text),
            "tel" => Ok(InputType::Tel),
            "button" => Ok(InputType::Button),
            "none" => Ok(InputType::None),
            other => Err(format!("invalid input type: '{other}'")),
        }
    }
}

/// One selectable choice offered by a button turn.
///
/// `value` is what gets sent back to the backend; `label` is what the user
/// sees (wire field `text`). They may differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceButton {
    pub value: String,
    #[serde(rename = "text")]
    pub label: String,
}

impl ChoiceButton {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A complete bot response: messages to play back plus the next input descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotTurn {
    /// Session identifier assigned by the backend, if any.
    ///
    /// The backend sends `""` before a session exists; that is read as `None`.
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_id: Option<String>,
    pub messages: Vec<String>,
    pub input_type: InputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Choices for a button turn. Empty for every other input type.
    #[serde(default)]
    pub buttons: Vec<ChoiceButton>,
}

impl BotTurn {
    /// Check the structural invariants a well-formed turn must satisfy.
    ///
    /// A button turn must offer at least one choice.
    pub fn check(&self) -> Result<(), String> {
        if self.input_type == InputType::Button && self.buttons.is_empty() {
            return Err("button turn carries no buttons".to_string());
        }
        Ok(())
    }

    /// Whether this turn has nothing to play back.
    pub fn is_silent(&self) -> bool {
        self.messages.is_empty()
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_type_serde() {
        let json = serde_json::to_string(&InputType::Tel).unwrap();
        assert_eq!(json, "\"tel\"");
        let parsed: InputType = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(parsed, InputType::None);
    }

    #[test]
    fn test_input_type_from_str() {
        assert_eq!("BUTTON".parse::<InputType>().unwrap(), InputType::Button);
        assert!("radio".parse::<InputType>().is_err());
    }

    #[test]
    fn test_deserialize_start_payload() {
        let json = r#"{
            "session_id": "",
            "messages": ["Hello!", "May I know your name?"],
            "buttons": [],
            "input_type": "text"
        }"#;
        let turn: BotTurn = serde_json::from_str(json).unwrap();
        assert_eq!(turn.session_id, None);
        assert_eq!(turn.messages.len(), 2);
        assert_eq!(turn.input_type, InputType::Text);
        assert!(turn.placeholder.is_none());
        assert!(turn.check().is_ok());
    }

    #[test]
    fn test_deserialize_button_payload() {
        let json = r#"{
            "session_id": "abc-123",
            "messages": ["How can I help you today?"],
            "buttons": [
                {"text": "Explore Schools & Courses", "value": "flow_schools"},
                {"text": "Exit", "value": "exit"}
            ],
            "input_type": "button"
        }"#;
        let turn: BotTurn = serde_json::from_str(json).unwrap();
        assert_eq!(turn.session_id.as_deref(), Some("abc-123"));
        assert_eq!(turn.buttons[0].label, "Explore Schools & Courses");
        assert_eq!(turn.buttons[0].value, "flow_schools");
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{"messages": [], "input_type": "none"}"#;
        let turn: BotTurn = serde_json::from_str(json).unwrap();
        assert!(turn.session_id.is_none());
        assert!(turn.buttons.is_empty());
        assert!(turn.is_silent());
    }

    #[test]
    fn test_null_session_id() {
        let json = r#"{"session_id": null, "messages": ["x"], "input_type": "tel", "placeholder": "Mobile number"}"#;
        let turn: BotTurn = serde_json::from_str(json).unwrap();
        assert!(turn.session_id.is_none());
        assert_eq!(turn.placeholder.as_deref(), Some("Mobile number"));
    }

    #[test]
    fn test_unknown_input_type_is_rejected() {
        let json = r#"{"messages": [], "input_type": "slider"}"#;
        assert!(serde_json::from_str::<BotTurn>(json).is_err());
    }

    #[test]
    fn test_button_turn_without_buttons_fails_check() {
        let turn = BotTurn {
            session_id: None,
            messages: vec!["Pick one".to_string()],
            input_type: InputType::Button,
            placeholder: None,
            buttons: Vec::new(),
        };
        assert!(turn.check().unwrap_err().contains("no buttons"));
    }

    #[test]
    fn test_choice_button_serializes_label_as_text() {
        let json = serde_json::to_string(&ChoiceButton::new("restart", "Start Over")).unwrap();
        assert!(json.contains("\"text\":\"Start Over\""));
    }
}
