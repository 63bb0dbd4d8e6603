//! Events accepted by the machine

use crate::domain::value_objects::{Fingerprint, Stage};
use crate::error::StageFailure;

/// Outcome of a stage, as delivered in its completion event
pub type StageResult<T> = Result<T, StageFailure>;

/// Event fed into [`super::Machine::dispatch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineEvent {
    /// Something under a watched path changed
    FileChange,
    /// The user asked for the pending artifacts to be deployed
    TriggerDeploy,
    /// Build stage finished
    BuildDone(StageResult<()>),
    /// Synth stage finished; success carries the output fingerprint
    SynthDone(StageResult<Fingerprint>),
    /// Deploy stage finished
    DeployDone(StageResult<()>),
}

impl MachineEvent {
    /// Failed completion event for `failure.stage`
    pub fn failed(failure: StageFailure) -> Self {
        match failure.stage {
            Stage::Build => MachineEvent::BuildDone(Err(failure)),
            Stage::Synth => MachineEvent::SynthDone(Err(failure)),
            Stage::Deploy => MachineEvent::DeployDone(Err(failure)),
        }
    }

    /// The stage this event completes, for completion events
    pub fn completed_stage(&self) -> Option<Stage> {
        match self {
            MachineEvent::BuildDone(_) => Some(Stage::Build),
            MachineEvent::SynthDone(_) => Some(Stage::Synth),
            MachineEvent::DeployDone(_) => Some(Stage::Deploy),
            MachineEvent::FileChange | MachineEvent::TriggerDeploy => None,
        }
    }

    /// The failure carried by a completion event
    pub fn failure(&self) -> Option<&StageFailure> {
        match self {
            MachineEvent::BuildDone(Err(e))
            | MachineEvent::SynthDone(Err(e))
            | MachineEvent::DeployDone(Err(e)) => Some(e),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MachineEvent::FileChange => "FILE_CHANGE",
            MachineEvent::TriggerDeploy => "TRIGGER_DEPLOY",
            MachineEvent::BuildDone(_) => "BUILD_DONE",
            MachineEvent::SynthDone(_) => "SYNTH_DONE",
            MachineEvent::DeployDone(_) => "DEPLOY_DONE",
        }
    }
}
