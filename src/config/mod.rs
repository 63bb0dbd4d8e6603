//! Configuration module for Stackloop
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (STACKLOOP_*)
//! 3. Project config (stackloop.toml)
//! 4. User config (~/.config/stackloop/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{discover, ConfigWarning, LoadedConfig, PROJECT_CONFIG};
pub use types::{
    BuildConfig, Config, DeployConfig, SynthConfig, WatchConfig, DEFAULT_DEBOUNCE_MS,
    DEFAULT_OUTPUT,
};
