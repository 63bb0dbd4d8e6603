//! Event Sink Implementations
//!
//! Provides concrete implementations of BuilderEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - ConsoleEventSink: Timestamped human-readable lines

mod console;
mod json;

pub use console::{render_event, ConsoleEventSink, ConsoleOptions};
pub use json::JsonEventSink;
