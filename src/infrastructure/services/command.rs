//! Shell-command stage services
//!
//! Each stage runs a configured command line in the project root. Child
//! stdout is redirected to our stderr so the NDJSON stream on stdout stays
//! clean.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::Config;
use crate::domain::ports::StackServices;
use crate::domain::value_objects::Stage;
use crate::error::{StackloopResult, StageFailure};

/// Stage services backed by shell commands
#[derive(Debug, Clone, Default)]
pub struct CommandServices {
    root: PathBuf,
    build: Option<String>,
    synth: Option<String>,
    deploy: Option<String>,
}

impl CommandServices {
    /// Create services with no commands (every stage succeeds immediately)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Take the stage commands from config
    pub fn from_config(root: &Path, config: &Config) -> Self {
        Self::new(root)
            .with_command(Stage::Build, config.build.command.clone())
            .with_command(Stage::Synth, config.synth.command.clone())
            .with_command(Stage::Deploy, config.deploy.command.clone())
    }

    /// Set (or clear) the command for a stage
    pub fn with_command(mut self, stage: Stage, command: Option<String>) -> Self {
        let command = command.filter(|c| !c.trim().is_empty());
        match stage {
            Stage::Build => self.build = command,
            Stage::Synth => self.synth = command,
            Stage::Deploy => self.deploy = command,
        }
        self
    }

    pub fn command(&self, stage: Stage) -> Option<&str> {
        match stage {
            Stage::Build => self.build.as_deref(),
            Stage::Synth => self.synth.as_deref(),
            Stage::Deploy => self.deploy.as_deref(),
        }
    }

    fn run(&self, stage: Stage) -> StackloopResult<()> {
        let Some(command_line) = self.command(stage) else {
            tracing::debug!(%stage, "no command configured, skipping");
            return Ok(());
        };

        tracing::info!(%stage, command = command_line, "running");
        let status = shell(command_line)
            .current_dir(&self.root)
            .env("STACKLOOP_STAGE", stage.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::from(io::stderr()))
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| StageFailure::new(stage, format!("could not run '{command_line}': {e}")))?;

        if status.success() {
            Ok(())
        } else {
            let code = status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            Err(StageFailure::new(stage, format!("'{command_line}' exited with {code}")).into())
        }
    }
}

#[cfg(windows)]
fn shell(command_line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(command_line);
    command
}

#[cfg(not(windows))]
fn shell(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line);
    command
}

impl StackServices for CommandServices {
    fn build(&self) -> StackloopResult<()> {
        self.run(Stage::Build)
    }

    fn synth(&self) -> StackloopResult<()> {
        self.run(Stage::Synth)
    }

    fn deploy(&self) -> StackloopResult<()> {
        self.run(Stage::Deploy)
    }
}
