//! Stage value object

use std::fmt;

use serde::Serialize;

/// One of the three long-running operations the machine drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Build,
    Synth,
    Deploy,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Build, Stage::Synth, Stage::Deploy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Build => "build",
            Stage::Synth => "synth",
            Stage::Deploy => "deploy",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
