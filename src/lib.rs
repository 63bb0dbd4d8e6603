//! Stackloop - continuous build, synth and deploy loop for infrastructure stacks
//!
//! Stackloop watches a project's sources and keeps its cloud assembly fresh:
//! every change rebuilds and re-synthesizes, and when the synthesized stack
//! templates differ from what was last deployed the project becomes
//! deployable. Deploys run on demand or automatically.
//!
//! The orchestration lives in a small state machine (`domain::machine`)
//! driven by a single-consumer event queue (`application::StacksBuilder`).

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

// Re-exports for convenience
pub use application::{
    compute_fingerprint, BuilderHandle, BuilderOptions, Snapshot, StacksBuilder,
};
pub use config::Config;
pub use domain::machine::{Machine, MachineEvent, State};
pub use domain::ports::{BuilderEvent, BuilderEventSink, StackServices};
pub use domain::value_objects::{Fingerprint, Stage};
pub use error::{StackloopError, StackloopResult, StageFailure};
pub use infrastructure::{CommandServices, FileWatcher, WatchOptions};
