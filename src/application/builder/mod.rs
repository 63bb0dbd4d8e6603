//! Stacks Builder
//!
//! The dispatch loop around the orchestration machine:
//! - `StacksBuilder` - Owns the machine, the event queue and the stage runner
//! - `BuilderHandle` - Cloneable sender used by event sources
//! - `BuilderOptions` - Output directory and deploy policy
//!
//! ## Usage
//!
//! ```ignore
//! let builder = StacksBuilder::new(options, services)?.with_sink(sink);
//! let handle = builder.handle();
//! std::thread::spawn(move || watch_sources(handle));
//! let snapshot = builder.run()?;
//! ```

mod handle;
mod options;
mod use_case;


pub use handle::BuilderHandle;
pub use options::BuilderOptions;
pub use use_case::{Snapshot, StacksBuilder};

use crate::domain::machine::MachineEvent;

/// Entry in the single-consumer queue drained by [`StacksBuilder::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Event(MachineEvent),
    Stop,
}
