//! Orchestration state machine
//!
//! A plain enum of states plus a `match` over `(state, event)`. The machine
//! never runs anything itself: entering a state that owns a stage reports that
//! stage in the returned [`Transition`], and the caller is responsible for
//! running it and feeding the completion event back through [`Machine::dispatch`].
//!
//! ## Event handling
//!
//! State-specific handlers are consulted first. `FILE_CHANGE` has a default
//! handler for every state (set `dirty`), so changes that arrive while a stage
//! is in flight are recorded without interrupting it. Every completion guard
//! checks `dirty` before anything else.

mod event;
mod state;

#[cfg(test)]
mod tests;

pub use event::{MachineEvent, StageResult};
pub use state::{Context, State};

use crate::domain::value_objects::{Fingerprint, Stage};

/// A state change produced by a dispatched event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: State,
    pub to: State,
    /// Stage the caller must start now
    pub invoke: Option<Stage>,
}

/// What dispatching an event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The machine entered a state (possibly the same one again)
    Transitioned(Transition),
    /// Only the context changed
    Recorded,
    /// No handler in the current state
    Ignored,
}

/// The orchestration machine: current state plus its context
#[derive(Debug, Clone)]
pub struct Machine {
    state: State,
    context: Context,
}

impl Machine {
    /// Create a machine whose deployed baseline is `deployed_hash`.
    ///
    /// The machine starts in `synthing` so the baseline is re-validated before
    /// anything else; call [`Machine::entry_stage`] to learn what to run first.
    pub fn new(deployed_hash: Fingerprint) -> Self {
        Self {
            state: State::Synthing,
            context: Context::new(deployed_hash),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Stage owned by the current state, if one should be in flight
    pub fn entry_stage(&self) -> Option<Stage> {
        self.state.stage()
    }

    /// Apply one event
    pub fn dispatch(&mut self, event: &MachineEvent) -> Dispatch {
        let dirty = self.context.dirty;

        let target = match (self.state, event) {
            (State::Idle | State::Deployable, MachineEvent::FileChange) => {
                self.context.dirty = true;
                State::Building
            }
            (_, MachineEvent::FileChange) => {
                self.context.dirty = true;
                return Dispatch::Recorded;
            }

            (State::Deployable, MachineEvent::TriggerDeploy) => State::Deploying,

            (State::Building, MachineEvent::BuildDone(result)) => {
                if dirty {
                    State::Building
                } else if result.is_ok() {
                    State::Synthing
                } else {
                    State::Idle
                }
            }

            (State::Synthing, MachineEvent::SynthDone(Ok(fingerprint))) => {
                if dirty {
                    State::Building
                } else if *fingerprint != self.context.deployed_hash {
                    self.context.pending_hash = Some(fingerprint.clone());
                    State::Deployable
                } else {
                    State::Idle
                }
            }
            (State::Synthing, MachineEvent::SynthDone(Err(_))) => {
                if dirty {
                    State::Building
                } else {
                    State::Idle
                }
            }

            (State::Deploying, MachineEvent::DeployDone(Ok(()))) => {
                if let Some(pending) = &self.context.pending_hash {
                    self.context.deployed_hash = pending.clone();
                }
                if dirty {
                    State::Building
                } else {
                    State::Idle
                }
            }
            (State::Deploying, MachineEvent::DeployDone(Err(_))) => State::Halted,

            _ => return Dispatch::Ignored,
        };

        Dispatch::Transitioned(self.enter(target))
    }

    fn enter(&mut self, to: State) -> Transition {
        let from = self.state;
        self.state = to;
        if to == State::Building {
            self.context.dirty = false;
        }
        Transition {
            from,
            to,
            invoke: to.stage(),
        }
    }
}
