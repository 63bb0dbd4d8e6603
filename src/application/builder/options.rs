//! Builder options

use std::path::PathBuf;

/// Options for a [`super::StacksBuilder`]
#[derive(Debug, Clone)]
pub struct BuilderOptions {
    /// Synth output directory (the cloud assembly)
    pub output_dir: PathBuf,
    /// Deploy as soon as the machine becomes deployable
    pub auto_deploy: bool,
}

impl BuilderOptions {
    /// Create options with manual deploy triggering
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            auto_deploy: false,
        }
    }

    /// Set automatic deploy
    pub fn with_auto_deploy(mut self, auto_deploy: bool) -> Self {
        self.auto_deploy = auto_deploy;
        self
    }
}
