//! Fingerprint Value Object
//!
//! A digest over the deployable artifacts of a synth output directory.
//! Used to decide whether a synth produced anything worth deploying.

use std::fmt;

use serde::Serialize;

/// Fingerprint value object
///
/// Wraps a lower-case hex SHA-256 digest. Two fingerprints are equal exactly
/// when the artifact bytes and their manifest order were equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Width of a hex-encoded SHA-256 digest
    pub const HEX_LEN: usize = 64;

    /// Compute the fingerprint of raw bytes
    pub fn of_bytes(bytes: &[u8]) -> Self {
        use sha2::{Digest, Sha256};
        Self(format!("{:x}", Sha256::digest(bytes)))
    }

    /// Wrap an already computed hex digest
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Get the hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for log lines
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Fingerprint {
    fn from(s: &str) -> Self {
        Self::from_hex(s)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
