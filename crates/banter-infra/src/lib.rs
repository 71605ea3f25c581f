//! Infrastructure implementations for Banter.
//!
//! Provides the reqwest-backed [`http::HttpTransport`] that implements the
//! `TurnTransport` port from banter-core, and the config file loader.

pub mod config;
pub mod http;
