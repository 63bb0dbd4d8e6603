//! Domain Layer
//!
//! The orchestration core of Stackloop: the state machine, its context and
//! the ports it talks to. Nothing in here spawns threads or touches the file
//! system directly.
//!
//! ## Structure
//!
//! - `machine/` - States, events, context and the transition table
//! - `value_objects/` - Immutable value types (Stage, Fingerprint)
//! - `ports/` - Interface definitions for infrastructure

pub mod machine;
pub mod ports;
pub mod value_objects;
