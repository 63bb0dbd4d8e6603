//! Change filter
//!
//! Decides whether a notified path counts as a source change.

use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::{StackloopError, StackloopResult};

/// Filter for notified paths
#[derive(Debug)]
pub struct ChangeFilter {
    root: PathBuf,
    output_dir: PathBuf,
    matcher: Gitignore,
}

impl ChangeFilter {
    /// Build a filter from gitignore-style `patterns` relative to `root`
    pub fn new(root: &Path, output_dir: &Path, patterns: &[String]) -> StackloopResult<Self> {
        let root = canonical(root);
        let mut builder = GitignoreBuilder::new(&root);
        for pattern in patterns {
            let trimmed = pattern.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            builder.add_line(None, trimmed).map_err(|e| {
                StackloopError::Watch(format!("invalid ignore pattern '{trimmed}': {e}"))
            })?;
        }
        let matcher = builder
            .build()
            .map_err(|e| StackloopError::Watch(e.to_string()))?;

        Ok(Self {
            output_dir: canonical(output_dir),
            root,
            matcher,
        })
    }

    /// True if a change at `path` should trigger a rebuild
    pub fn is_relevant(&self, path: &Path) -> bool {
        let path = canonical(path);
        if path.starts_with(&self.output_dir) {
            return false;
        }

        // Paths outside the root were watched explicitly; patterns don't apply
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return true;
        };
        if relative.as_os_str().is_empty() {
            return true;
        }

        !self
            .matcher
            .matched_path_or_any_parents(relative, path.is_dir())
            .is_ignore()
    }
}

/// Canonicalize the longest existing prefix, so deleted files still compare
/// against canonical roots
fn canonical(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            canonical(parent).join(name)
        }
        _ => path.to_path_buf(),
    }
}
