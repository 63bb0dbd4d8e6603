//! Stack services port - the three external operations the machine drives

use crate::error::StackloopResult;

/// Build, synth and deploy for one project
///
/// Implementations:
/// - `CommandServices` - runs configured shell commands
/// - scripted fakes in tests
///
/// Each call blocks until the operation finishes. The machine guarantees at
/// most one call is in flight at a time, but calls arrive on worker threads,
/// hence `Send + Sync`.
pub trait StackServices: Send + Sync {
    /// Compile the project sources
    fn build(&self) -> StackloopResult<()>;

    /// Produce the cloud assembly in the synth output directory
    fn synth(&self) -> StackloopResult<()>;

    /// Deploy the most recently synthesized cloud assembly
    fn deploy(&self) -> StackloopResult<()>;
}
