//! Debounce state for change bursts

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Watcher state for debouncing
///
/// Editors and compilers touch many files at once; a burst only counts as one
/// change once it has been quiet for the debounce window.
#[derive(Debug)]
pub struct WatcherState {
    pending_changes: HashSet<PathBuf>,
    last_change: Option<Instant>,
    debounce: Duration,
}

impl WatcherState {
    /// Create a new watcher state
    pub fn new(debounce: Duration) -> Self {
        Self {
            pending_changes: HashSet::new(),
            last_change: None,
            debounce,
        }
    }

    /// Add a file change to pending changes
    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// Check if debounce period has passed and we have pending changes
    pub fn should_flush(&self) -> bool {
        match self.last_change {
            Some(last) => !self.pending_changes.is_empty() && last.elapsed() >= self.debounce,
            None => false,
        }
    }

    /// Take all pending changes, resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        let mut changes: Vec<_> = self.pending_changes.drain().collect();
        changes.sort();
        self.last_change = None;
        changes
    }

    /// Check if there are pending changes
    #[cfg(test)]
    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }
}
