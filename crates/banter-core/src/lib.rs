//! Widget logic for the Banter chat client.
//!
//! This crate defines the "ports" the front end and infrastructure plug into
//! ([`transport::TurnTransport`] and [`surface::ChatSurface`]) and everything
//! in between: markdown-lite rendering, session state, the response
//! sequencer, the input surface controller, and the controller that owns
//! them. It depends only on `banter-types` -- never on `banter-infra` or any
//! HTTP/terminal crate.

pub mod controller;
pub mod input;
pub mod markdown;
pub mod sequencer;
pub mod session;
pub mod surface;
pub mod transcript;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;
