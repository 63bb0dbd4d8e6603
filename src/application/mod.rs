//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (machine, ports, value objects)
//! - Does NOT contain transition rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `StacksBuilder` - Dispatch loop that owns the machine and its event queue
//!
//! ## Services
//!
//! - `StageRunner` - Runs one stage on a worker thread, reports completion
//! - `compute_fingerprint` - Digest of the stack templates in a synth output directory

pub mod builder;
pub mod fingerprint;
pub mod runner;

pub use builder::{BuilderHandle, BuilderOptions, Snapshot, StacksBuilder};
pub use fingerprint::{compute_fingerprint, stack_templates, MANIFEST_FILE, STACK_ARTIFACT_TYPE};
pub use runner::StageRunner;
