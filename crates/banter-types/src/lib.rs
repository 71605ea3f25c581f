//! Shared domain types for the Banter chat widget.
//!
//! This crate contains the data shapes exchanged between the widget and the
//! chat backend (turns, buttons, request bodies), the transcript and markup
//! model, the widget configuration, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod input;
pub mod markup;
pub mod transcript;
pub mod turn;
pub mod wire;
