//! Console Event Sink
//!
//! Timestamped, human-readable progress lines.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::machine::State;
use crate::domain::ports::{BuilderEvent, BuilderEventSink};

/// How console lines are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleOptions {
    /// Use unicode icons instead of ascii
    pub unicode: bool,
    /// Also show transitions and ignored events
    pub verbose: bool,
    /// Deploys are triggered automatically, so don't prompt for Enter
    pub auto_deploy: bool,
}

/// Event sink that prints progress lines
pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    options: ConsoleOptions,
}

impl ConsoleEventSink {
    /// Console sink writing to stdout
    pub fn stdout(options: ConsoleOptions) -> Self {
        Self::with_writer(io::stdout(), options)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, options: ConsoleOptions) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            options,
        }
    }
}

impl BuilderEventSink for ConsoleEventSink {
    fn on_event(&self, event: BuilderEvent) {
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        let Some(line) = render_event(&timestamp, &event, &self.options) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = write!(writer, "{line}");
            let _ = writer.flush();
        }
    }
}

struct Icons {
    run: &'static str,
    ok: &'static str,
    fail: &'static str,
    ready: &'static str,
    info: &'static str,
}

const UNICODE: Icons = Icons {
    run: "▶",
    ok: "✓",
    fail: "✗",
    ready: "●",
    info: "·",
};

const ASCII: Icons = Icons {
    run: ">",
    ok: "+",
    fail: "x",
    ready: "*",
    info: "-",
};

/// Render one event as a line, or `None` if it is not shown with `options`
pub fn render_event(timestamp: &str, event: &BuilderEvent, options: &ConsoleOptions) -> Option<String> {
    let icons = if options.unicode { &UNICODE } else { &ASCII };
    let verbose = options.verbose;
    let prefix = format!("[{timestamp}]");

    let line = match event {
        BuilderEvent::Started {
            output,
            deployed_hash,
        } => format!(
            "{prefix} {} Watching for changes (output: {output}, deployed: {})\n",
            icons.info,
            deployed_hash.short()
        ),
        BuilderEvent::StageStarted { stage } => format!("{prefix} {} Running {stage}...\n", icons.run),
        BuilderEvent::StageSucceeded { stage } => format!("{prefix} {} {stage} finished\n", icons.ok),
        BuilderEvent::StageFailed { stage, message } => {
            format!("{prefix} {} {stage} failed: {message}\n", icons.fail)
        }
        BuilderEvent::Deployable { pending_hash } => {
            let next = if options.auto_deploy {
                "Deploying."
            } else {
                "Press Enter to deploy."
            };
            format!(
                "{prefix} {} Stacks changed ({}). {next}\n",
                icons.ready,
                pending_hash.short()
            )
        }
        BuilderEvent::Deployed { deployed_hash } => format!(
            "{prefix} {} Deployed {}\n",
            icons.ok,
            deployed_hash.short()
        ),
        BuilderEvent::Halted { message } => format!(
            "{prefix} {} Deploy failed: {message}\n{prefix} {} Fix the problem and restart to continue.\n",
            icons.fail, icons.info
        ),
        BuilderEvent::Shutdown { state } if *state != State::Halted => {
            format!("\n{prefix} {} Stopped.\n", icons.info)
        }
        BuilderEvent::Shutdown { .. } => return None,
        BuilderEvent::Transition { from, to } if verbose => {
            format!("{prefix} {} {from} -> {to}\n", icons.info)
        }
        BuilderEvent::Ignored { ignored, state } if verbose => {
            format!("{prefix} {} Ignored {ignored} while {state}\n", icons.info)
        }
        BuilderEvent::Transition { .. } | BuilderEvent::Ignored { .. } => return None,
    };

    Some(line)
}
