//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StackloopError, StackloopResult};

use super::types::Config;

/// Project config file name
pub const PROJECT_CONFIG: &str = "stackloop.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Result of config discovery
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    /// File the config came from; `None` means built-in defaults
    pub source: Option<PathBuf>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> StackloopResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StackloopError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Discover and load configuration for a project.
///
/// Priority: explicit `--config` file, `<root>/stackloop.toml`,
/// `~/.config/stackloop/config.toml`, built-in defaults. Environment
/// overrides are applied on top of whichever was found. An explicit file
/// that does not exist is an error; the other locations are optional.
pub fn discover(root: &Path, explicit: Option<&Path>) -> StackloopResult<LoadedConfig> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => [Some(root.join(PROJECT_CONFIG)), user_config_path()]
            .into_iter()
            .flatten()
            .find(|p| p.is_file()),
    };

    let (config, warnings) = match &candidate {
        Some(path) => load_with_warnings(path)?,
        None => (Config::default(), Vec::new()),
    };

    Ok(LoadedConfig {
        config: with_env_overrides(config),
        warnings,
        source: candidate,
    })
}

/// Apply environment variable overrides (STACKLOOP_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    if let Ok(output) = std::env::var("STACKLOOP_OUTPUT") {
        if !output.trim().is_empty() {
            config.synth.output = PathBuf::from(output);
        }
    }

    if let Ok(command) = std::env::var("STACKLOOP_BUILD_COMMAND") {
        config.build.command = non_empty(command);
    }
    if let Ok(command) = std::env::var("STACKLOOP_SYNTH_COMMAND") {
        config.synth.command = non_empty(command);
    }
    if let Ok(command) = std::env::var("STACKLOOP_DEPLOY_COMMAND") {
        config.deploy.command = non_empty(command);
    }

    if let Ok(val) = std::env::var("STACKLOOP_DEBOUNCE_MS") {
        match val.trim().parse() {
            Ok(ms) => config.watch.debounce_ms = ms,
            Err(_) => tracing::warn!(value = %val, "ignoring invalid STACKLOOP_DEBOUNCE_MS"),
        }
    }

    if let Ok(val) = std::env::var("STACKLOOP_AUTO_DEPLOY") {
        config.deploy.auto = val.to_lowercase() == "true" || val == "1";
    }

    config
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stackloop").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "build",
        "synth",
        "deploy",
        "watch",
        "command",
        "output",
        "auto",
        "paths",
        "ignore",
        "debounce_ms",
    ];

    let mut best: Option<(&str, usize)> = None;
    for &candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
