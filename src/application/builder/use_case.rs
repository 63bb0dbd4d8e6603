//! Stacks Builder implementation

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use crate::application::fingerprint::compute_fingerprint;
use crate::application::runner::StageRunner;
use crate::domain::machine::{Context, Dispatch, Machine, MachineEvent, State, Transition};
use crate::domain::ports::{BuilderEvent, BuilderEventSink, NoopEventSink, StackServices};
use crate::domain::value_objects::{Fingerprint, Stage};
use crate::error::{StackloopError, StackloopResult, StageFailure};

use super::{BuilderHandle, BuilderOptions, Message};

/// Machine state and context when the loop returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub state: State,
    pub context: Context,
}

/// Stacks Builder
///
/// Owns the orchestration machine and drains its queue on the calling thread.
/// Event sources talk to it through [`BuilderHandle`]; stages run on worker
/// threads and only ever reply through the same queue.
pub struct StacksBuilder {
    machine: Machine,
    options: BuilderOptions,
    services: Arc<dyn StackServices>,
    sink: Arc<dyn BuilderEventSink>,
    runner: StageRunner,
    tx: Sender<Message>,
    rx: Receiver<Message>,
}

impl StacksBuilder {
    /// Create a builder whose baseline is the synth output already on disk.
    ///
    /// Fails if the output directory has no readable cloud assembly.
    pub fn new(options: BuilderOptions, services: Arc<dyn StackServices>) -> StackloopResult<Self> {
        let baseline = compute_fingerprint(&options.output_dir)?;
        Ok(Self::with_baseline(options, services, baseline))
    }

    /// Create a builder with an explicit baseline fingerprint
    pub fn with_baseline(
        options: BuilderOptions,
        services: Arc<dyn StackServices>,
        baseline: Fingerprint,
    ) -> Self {
        let (tx, rx) = channel();
        Self {
            machine: Machine::new(baseline),
            options,
            services,
            sink: Arc::new(NoopEventSink),
            runner: StageRunner::new(tx.clone()),
            tx,
            rx,
        }
    }

    /// Set the event sink
    pub fn with_sink(mut self, sink: Arc<dyn BuilderEventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Handle for event sources
    pub fn handle(&self) -> BuilderHandle {
        BuilderHandle::new(self.tx.clone())
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Run the loop until stopped (blocking)
    ///
    /// Starts with the initial synth, then processes queued events one at a
    /// time. Returns the final snapshot after [`BuilderHandle::stop`], or
    /// [`StackloopError::DeployFailed`] if a deploy fails.
    pub fn run(mut self) -> StackloopResult<Snapshot> {
        self.emit(BuilderEvent::Started {
            output: self.options.output_dir.display().to_string(),
            deployed_hash: self.machine.context().deployed_hash.clone(),
        });
        tracing::info!(
            output = %self.options.output_dir.display(),
            baseline = %self.machine.context().deployed_hash.short(),
            "stacks builder started"
        );

        let mut in_flight = None;
        if let Some(stage) = self.machine.entry_stage() {
            self.start_stage(stage);
            in_flight = Some(stage);
        }

        let mut stopping = false;
        while !(stopping && in_flight.is_none()) {
            let message = self.rx.recv().map_err(|_| StackloopError::QueueClosed)?;
            let event = match message {
                Message::Stop => {
                    if let Some(stage) = in_flight {
                        tracing::info!(%stage, "stop requested, waiting for stage to finish");
                    }
                    stopping = true;
                    continue;
                }
                Message::Event(event) => event,
            };

            if let Some(stage) = event.completed_stage() {
                if in_flight == Some(stage) {
                    in_flight = None;
                }
                self.report_completion(stage, &event);
            }

            match self.machine.dispatch(&event) {
                Dispatch::Recorded => {
                    tracing::debug!(state = %self.machine.state(), "change recorded while stage in flight");
                }
                Dispatch::Ignored => {
                    tracing::debug!(event = event.name(), state = %self.machine.state(), "event ignored");
                    self.emit(BuilderEvent::Ignored {
                        ignored: event.name().to_string(),
                        state: self.machine.state(),
                    });
                }
                Dispatch::Transitioned(transition) => {
                    self.report_transition(&transition, &event)?;
                    if let Some(stage) = transition.invoke {
                        if stopping {
                            tracing::debug!(%stage, "stopping, stage not started");
                        } else {
                            self.start_stage(stage);
                            in_flight = Some(stage);
                        }
                    }
                }
            }
        }

        let snapshot = self.snapshot();
        self.emit(BuilderEvent::Shutdown {
            state: snapshot.state,
        });
        Ok(snapshot)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.machine.state(),
            context: self.machine.context().clone(),
        }
    }

    fn emit(&self, event: BuilderEvent) {
        self.sink.on_event(event);
    }

    fn report_completion(&self, stage: Stage, event: &MachineEvent) {
        match event.failure() {
            Some(failure) => self.emit(BuilderEvent::StageFailed {
                stage,
                message: failure.message.clone(),
            }),
            None => self.emit(BuilderEvent::StageSucceeded { stage }),
        }
    }

    fn report_transition(
        &self,
        transition: &Transition,
        event: &MachineEvent,
    ) -> StackloopResult<()> {
        if matches!(event, MachineEvent::DeployDone(Ok(()))) {
            self.emit(BuilderEvent::Deployed {
                deployed_hash: self.machine.context().deployed_hash.clone(),
            });
        }

        tracing::info!(from = %transition.from, to = %transition.to, "transition");
        self.emit(BuilderEvent::Transition {
            from: transition.from,
            to: transition.to,
        });

        match transition.to {
            State::Deployable => {
                if let Some(pending) = &self.machine.context().pending_hash {
                    self.emit(BuilderEvent::Deployable {
                        pending_hash: pending.clone(),
                    });
                }
                if self.options.auto_deploy {
                    self.post(MachineEvent::TriggerDeploy);
                }
            }
            State::Halted => {
                let message = event
                    .failure()
                    .map(|f| f.message.clone())
                    .unwrap_or_else(|| "deploy failed".to_string());
                tracing::error!(%message, "deploy failed, halting");
                self.emit(BuilderEvent::Halted {
                    message: message.clone(),
                });
                self.emit(BuilderEvent::Shutdown {
                    state: State::Halted,
                });
                return Err(StackloopError::DeployFailed { message });
            }
            _ => {}
        }

        Ok(())
    }

    fn start_stage(&self, stage: Stage) {
        self.emit(BuilderEvent::StageStarted { stage });

        let services = Arc::clone(&self.services);
        let spawned = match stage {
            Stage::Build => self
                .runner
                .spawn(stage, move || services.build(), MachineEvent::BuildDone),
            Stage::Synth => {
                let output_dir = self.options.output_dir.clone();
                self.runner.spawn(
                    stage,
                    move || {
                        services.synth()?;
                        compute_fingerprint(&output_dir)
                    },
                    MachineEvent::SynthDone,
                )
            }
            Stage::Deploy => self
                .runner
                .spawn(stage, move || services.deploy(), MachineEvent::DeployDone),
        };

        // The machine still expects a completion, so report the spawn error as one
        if let Err(e) = spawned {
            tracing::error!(%stage, error = %e, "could not start stage");
            self.post(MachineEvent::failed(StageFailure::new(stage, e.to_string())));
        }
    }

    fn post(&self, event: MachineEvent) {
        // `self.rx` lives as long as `self`, so this send cannot fail
        let _ = self.tx.send(Message::Event(event));
    }
}
