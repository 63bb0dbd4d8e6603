//! Builder Event Port
//!
//! Provides an observable interface for the orchestration loop.
//! Enables console progress, NDJSON event streams and test recording.

use serde::Serialize;

use crate::domain::machine::State;
use crate::domain::value_objects::{Fingerprint, Stage};

/// Event emitted by the dispatch loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BuilderEvent {
    /// Loop started with the baseline read from disk
    Started {
        output: String,
        deployed_hash: Fingerprint,
    },

    /// The machine entered a state
    Transition { from: State, to: State },

    /// A stage began running
    StageStarted { stage: Stage },

    /// A stage finished successfully
    StageSucceeded { stage: Stage },

    /// A stage failed
    StageFailed { stage: Stage, message: String },

    /// Synth output differs from the deployed artifacts
    Deployable { pending_hash: Fingerprint },

    /// Deploy completed and the baseline moved
    Deployed { deployed_hash: Fingerprint },

    /// An event had no handler in the current state
    ///
    /// `ignored` names the machine event; `event` is taken by the record tag.
    Ignored { ignored: String, state: State },

    /// A deploy failed; the loop stops
    Halted { message: String },

    /// Loop stopped
    Shutdown { state: State },
}

impl BuilderEvent {
    /// Convert to JSON string with "command": "start" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("start"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Trait for receiving builder events
///
/// Implementations can be:
/// - ConsoleEventSink: Timestamped lines in the terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait BuilderEventSink: Send + Sync {
    /// Handle a builder event
    fn on_event(&self, event: BuilderEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl BuilderEventSink for NoopEventSink {
    fn on_event(&self, _event: BuilderEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingEventSink {
        events: Arc<Mutex<Vec<BuilderEvent>>>,
    }

    impl BuilderEventSink for RecordingEventSink {
        fn on_event(&self, event: BuilderEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn recording_sink_captures_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingEventSink {
            events: events.clone(),
        };

        sink.on_event(BuilderEvent::StageStarted {
            stage: Stage::Synth,
        });
        sink.on_event(BuilderEvent::Transition {
            from: State::Synthing,
            to: State::Idle,
        });

        assert_eq!(events.lock().unwrap().len(), 2);
    }

    #[test]
    fn to_json_includes_command_and_tag() {
        let event = BuilderEvent::Transition {
            from: State::Idle,
            to: State::Building,
        };
        insta::assert_snapshot!(
            event.to_json(),
            @r#"{"event":"transition","from":"idle","to":"building","command":"start"}"#
        );
    }

    #[test]
    fn to_json_ignored_keeps_tag_and_event_name() {
        let event = BuilderEvent::Ignored {
            ignored: "TRIGGER_DEPLOY".to_string(),
            state: State::Idle,
        };
        insta::assert_snapshot!(
            event.to_json(),
            @r#"{"event":"ignored","ignored":"TRIGGER_DEPLOY","state":"idle","command":"start"}"#
        );
    }

    #[test]
    fn to_json_stage_failed() {
        let json = BuilderEvent::StageFailed {
            stage: Stage::Deploy,
            message: "exit \"1\"".to_string(),
        }
        .to_json();
        assert!(json.contains("\"event\":\"stage_failed\""));
        assert!(json.contains("\"stage\":\"deploy\""));
        assert!(json.contains("\\\"1\\\""));
    }
}
