//! Stage runner
//!
//! Runs one stage operation on its own worker thread and posts exactly one
//! completion event to the machine's queue. There is no timeout, retry or
//! cancellation; the dispatch loop simply keeps receiving while it runs.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Instant;

use crate::domain::machine::{MachineEvent, StageResult};
use crate::domain::value_objects::Stage;
use crate::error::{StackloopError, StackloopResult, StageFailure};

use super::builder::Message;

/// Spawns stage operations and reports their completion as machine events
#[derive(Debug, Clone)]
pub struct StageRunner {
    tx: Sender<Message>,
}

impl StageRunner {
    pub(crate) fn new(tx: Sender<Message>) -> Self {
        Self { tx }
    }

    /// Run `op` for `stage` and post `complete(result)` when it finishes.
    ///
    /// Returns an error only if the worker thread could not be started, in
    /// which case nothing will be posted.
    pub fn spawn<T, F, C>(&self, stage: Stage, op: F, complete: C) -> StackloopResult<()>
    where
        T: Send + 'static,
        F: FnOnce() -> StackloopResult<T> + Send + 'static,
        C: FnOnce(StageResult<T>) -> MachineEvent + Send + 'static,
    {
        let tx = self.tx.clone();
        thread::Builder::new()
            .name(format!("stackloop-{stage}"))
            .spawn(move || {
                let span = tracing::info_span!("stage", %stage);
                let _guard = span.enter();

                let started = Instant::now();
                let result = run_to_completion(stage, op);
                let elapsed_ms = started.elapsed().as_millis() as u64;
                match &result {
                    Ok(_) => tracing::info!(elapsed_ms, "stage succeeded"),
                    Err(failure) => {
                        tracing::warn!(elapsed_ms, error = %failure.message, "stage failed")
                    }
                }

                if tx.send(Message::Event(complete(result))).is_err() {
                    tracing::debug!("queue closed before stage completed");
                }
            })?;
        Ok(())
    }
}

/// Run `op`, folding errors and panics into a [`StageFailure`] for `stage`
pub fn run_to_completion<T, F>(stage: Stage, op: F) -> StageResult<T>
where
    F: FnOnce() -> StackloopResult<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(op)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(StackloopError::Stage(failure))) => Err(failure),
        Ok(Err(e)) => Err(StageFailure::new(stage, e.to_string())),
        Err(payload) => Err(StageFailure::new(
            stage,
            format!("panicked: {}", panic_message(payload.as_ref())),
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
