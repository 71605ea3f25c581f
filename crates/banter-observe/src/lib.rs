//! Observability for Banter: subscriber setup and the attribute names used
//! on chat spans.

pub mod attrs;
pub mod tracing_setup;
