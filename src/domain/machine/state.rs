//! Machine states and context

use std::fmt;

use serde::Serialize;

use crate::domain::value_objects::{Fingerprint, Stage};

/// Machine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// Nothing to do until a file changes
    Idle,
    /// Build stage in flight
    Building,
    /// Synth stage in flight
    Synthing,
    /// Synth output differs from what is deployed; waiting for a trigger
    Deployable,
    /// Deploy stage in flight
    Deploying,
    /// A deploy failed; nothing runs until an operator restarts
    Halted,
}

impl State {
    /// The stage invoked on entry to this state, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            State::Building => Some(Stage::Build),
            State::Synthing => Some(Stage::Synth),
            State::Deploying => Some(Stage::Deploy),
            State::Idle | State::Deployable | State::Halted => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Halted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            State::Idle => "idle",
            State::Building => "building",
            State::Synthing => "synthing",
            State::Deployable => "deployable",
            State::Deploying => "deploying",
            State::Halted => "halted",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable record owned by a single machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Context {
    /// A change arrived that no build cycle has absorbed yet
    pub dirty: bool,
    /// Fingerprint of the artifacts believed deployed
    pub deployed_hash: Fingerprint,
    /// Fingerprint of the latest synth output that differs from `deployed_hash`
    pub pending_hash: Option<Fingerprint>,
}

impl Context {
    pub fn new(deployed_hash: Fingerprint) -> Self {
        Self {
            dirty: false,
            deployed_hash,
            pending_hash: None,
        }
    }
}
