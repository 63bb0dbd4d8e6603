//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod fingerprint;
mod stage;

pub use fingerprint::Fingerprint;
pub use stage::Stage;
