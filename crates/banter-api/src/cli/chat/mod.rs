//! Interactive terminal chat for Banter.
//!
//! Implements the widget front end: a `ChatSurface` that draws on the
//! terminal, the event loop that feeds user input and playback steps into
//! the controller, slash commands and the welcome banner. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod surface;
