//! Subcommand implementations

pub mod fingerprint;
pub mod start;

use stackloop::config::ConfigWarning;

/// Render an unknown-key warning for stderr
pub fn format_warning(warning: &ConfigWarning) -> String {
    let location = match warning.line {
        Some(line) => format!("{}:{line}", warning.file.display()),
        None => warning.file.display().to_string(),
    };
    let mut message = format!("warning: unknown config key '{}' in {location}", warning.key);
    if let Some(suggestion) = &warning.suggestion {
        message.push_str(&format!(" (did you mean '{suggestion}'?)"));
    }
    message
}
