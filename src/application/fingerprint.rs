//! Content fingerprint of a synth output directory
//!
//! Only the CloudFormation stack templates listed in the cloud assembly
//! manifest take part, in manifest order. Assets, tree metadata and the
//! manifest itself are ignored, so a synth that rewrites them without
//! changing any template yields the same fingerprint.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::value_objects::Fingerprint;
use crate::error::{StackloopError, StackloopResult};

/// Manifest file name inside the synth output directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Artifact type tag of a deployable stack template
pub const STACK_ARTIFACT_TYPE: &str = "aws:cloudformation:stack";

/// Suffix appended to a stack's display name to get its template file
pub const TEMPLATE_SUFFIX: &str = ".template.json";

#[derive(Debug, Deserialize)]
struct AssemblyManifest {
    // serde_json is built with `preserve_order`, so this keeps file order
    artifacts: serde_json::Map<String, serde_json::Value>,
}

/// Fields read from a stack artifact
#[derive(Debug, Deserialize)]
struct StackArtifact {
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

/// Template files of every stack artifact, in manifest order.
///
/// Fails if the manifest is missing or malformed. Template existence is not
/// checked here; [`compute_fingerprint`] reports missing templates.
pub fn stack_templates(out_dir: &Path) -> StackloopResult<Vec<PathBuf>> {
    let manifest_path = out_dir.join(MANIFEST_FILE);
    let content = match fs::read_to_string(&manifest_path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(StackloopError::ManifestNotFound {
                path: manifest_path,
            })
        }
        Err(e) => return Err(e.into()),
    };

    let invalid = |message: String| StackloopError::InvalidManifest {
        path: manifest_path.clone(),
        message,
    };

    let manifest: AssemblyManifest =
        serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;

    let mut templates = Vec::new();
    for (name, value) in manifest.artifacts {
        // Other artifact kinds are skipped without looking at their shape
        if value.get("type").and_then(serde_json::Value::as_str) != Some(STACK_ARTIFACT_TYPE) {
            continue;
        }

        let entry: StackArtifact = serde_json::from_value(value)
            .map_err(|e| invalid(format!("stack artifact '{name}': {e}")))?;
        let display_name = entry
            .display_name
            .ok_or_else(|| invalid(format!("stack artifact '{name}' has no displayName")))?;
        templates.push(out_dir.join(format!("{display_name}{TEMPLATE_SUFFIX}")));
    }

    Ok(templates)
}

/// Fingerprint the stack templates of a synth output directory.
///
/// Template bytes are joined with a single `\n` and hashed with SHA-256.
/// A directory whose manifest lists no stacks fingerprints the empty input.
pub fn compute_fingerprint(out_dir: &Path) -> StackloopResult<Fingerprint> {
    let mut data = Vec::new();

    for (index, template) in stack_templates(out_dir)?.into_iter().enumerate() {
        let bytes = match fs::read(&template) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StackloopError::TemplateNotFound { path: template })
            }
            Err(e) => return Err(e.into()),
        };
        if index > 0 {
            data.push(b'\n');
        }
        data.extend_from_slice(&bytes);
    }

    Ok(Fingerprint::of_bytes(&data))
}
