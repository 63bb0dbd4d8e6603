//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `services/` - Stage operations backed by shell commands
//! - `events/` - Event sinks (NDJSON, console)
//! - `watcher/` - Filesystem event source

pub mod events;
pub mod services;
pub mod watcher;

pub use events::{ConsoleEventSink, ConsoleOptions, JsonEventSink};
pub use services::CommandServices;
pub use watcher::{FileWatcher, WatchOptions};
