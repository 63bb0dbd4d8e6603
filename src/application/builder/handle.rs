//! Sender side of the builder queue

use std::sync::mpsc::Sender;

use crate::domain::machine::MachineEvent;
use crate::error::{StackloopError, StackloopResult};

use super::Message;

/// Cloneable handle for feeding events into a running [`super::StacksBuilder`]
///
/// Sends never block and never wait for the in-flight stage.
#[derive(Debug, Clone)]
pub struct BuilderHandle {
    tx: Sender<Message>,
}

impl BuilderHandle {
    pub(crate) fn new(tx: Sender<Message>) -> Self {
        Self { tx }
    }

    /// Report that something under a watched path changed
    pub fn file_change(&self) -> StackloopResult<()> {
        self.send(Message::Event(MachineEvent::FileChange))
    }

    /// Ask for the pending artifacts to be deployed
    pub fn trigger_deploy(&self) -> StackloopResult<()> {
        self.send(Message::Event(MachineEvent::TriggerDeploy))
    }

    /// Stop the loop once the in-flight stage (if any) has completed
    pub fn stop(&self) -> StackloopResult<()> {
        self.send(Message::Stop)
    }

    fn send(&self, message: Message) -> StackloopResult<()> {
        self.tx
            .send(message)
            .map_err(|_| StackloopError::QueueClosed)
    }
}
