//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default synth output directory
pub const DEFAULT_OUTPUT: &str = "cdk.out";

/// Default debounce window for file change bursts
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Build stage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BuildConfig {
    /// Command compiling the project; no command means build always succeeds
    #[serde(default)]
    pub command: Option<String>,
}

/// Synth stage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthConfig {
    #[serde(default = "default_synth_command")]
    pub command: Option<String>,

    /// Cloud assembly directory, relative to the project root
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            command: default_synth_command(),
            output: default_output(),
        }
    }
}

fn default_synth_command() -> Option<String> {
    Some("npx cdk synth --quiet".to_string())
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

/// Deploy stage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    #[serde(default = "default_deploy_command")]
    pub command: Option<String>,

    /// Deploy as soon as synth output changes, without waiting for a trigger
    #[serde(default)]
    pub auto: bool,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            command: default_deploy_command(),
            auto: false,
        }
    }
}

fn default_deploy_command() -> Option<String> {
    Some("npx cdk deploy --all --app cdk.out --require-approval never".to_string())
}

/// File watcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Paths to watch, relative to the project root
    #[serde(default = "default_watch_paths")]
    pub paths: Vec<PathBuf>,

    /// Gitignore-style patterns that never count as changes
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            paths: default_watch_paths(),
            ignore: default_ignore(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

fn default_watch_paths() -> Vec<PathBuf> {
    vec![PathBuf::from(".")]
}

/// Build outputs and CLI-managed files that land inside the project root.
/// A change there while a build runs would otherwise trigger the next build.
fn default_ignore() -> Vec<String> {
    [
        "node_modules/",
        ".git/",
        "dist/",
        "build/",
        ".cdk.staging/",
        "cdk.context.json",
        "*.d.ts",
        "*.js.map",
        "*.tsbuildinfo",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub synth: SynthConfig,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

impl Config {
    /// Synth output directory resolved against the project root
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.synth.output)
    }
}
