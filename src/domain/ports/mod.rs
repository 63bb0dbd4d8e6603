//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod builder_events;
pub mod stack_services;

pub use builder_events::{BuilderEvent, BuilderEventSink, NoopEventSink};
pub use stack_services::StackServices;
