//! File watcher event source
//!
//! Turns filesystem notifications into `FILE_CHANGE` events:
//! - Recursive `notify` watch on the configured paths
//! - Paths under the synth output directory are dropped (synth writes there)
//! - Gitignore-style ignore patterns (via the `ignore` crate)
//! - Debouncing, one event per quiet burst

mod filter;
mod state;


pub use filter::ChangeFilter;
pub use state::WatcherState;

use std::path::PathBuf;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::BuilderHandle;
use crate::config::Config;
use crate::error::{StackloopError, StackloopResult};

/// Poll interval of the debounce loop
const POLL_MS: u64 = 50;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Project root; relative paths and ignore patterns are resolved against it
    pub root: PathBuf,
    /// Paths to watch recursively
    pub paths: Vec<PathBuf>,
    /// Gitignore-style patterns
    pub ignore: Vec<String>,
    /// Synth output directory, never reported as a change
    pub output_dir: PathBuf,
    /// Quiet period before a burst is reported
    pub debounce: Duration,
}

impl WatchOptions {
    pub fn from_config(root: PathBuf, config: &Config) -> Self {
        Self {
            paths: config.watch.paths.iter().map(|p| root.join(p)).collect(),
            ignore: config.watch.ignore.clone(),
            output_dir: config.output_dir(&root),
            debounce: Duration::from_millis(config.watch.debounce_ms),
            root,
        }
    }
}

/// Running watcher; dropping it (or calling [`FileWatcher::stop`]) ends the thread
pub struct FileWatcher {
    watcher: Option<RecommendedWatcher>,
    join: Option<JoinHandle<()>>,
    watching: Vec<PathBuf>,
}

impl FileWatcher {
    /// Start watching and feed debounced changes into `handle`
    pub fn start(options: WatchOptions, handle: BuilderHandle) -> StackloopResult<Self> {
        let filter = ChangeFilter::new(&options.root, &options.output_dir, &options.ignore)?;

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) if !matches!(event.kind, EventKind::Access(_)) => {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "watch error"),
            },
            NotifyConfig::default(),
        )
        .map_err(|e| StackloopError::Watch(e.to_string()))?;

        let mut watching = Vec::new();
        for path in &options.paths {
            if !path.exists() {
                tracing::warn!(path = %path.display(), "watch path does not exist, skipping");
                continue;
            }
            watcher
                .watch(path, RecursiveMode::Recursive)
                .map_err(|e| StackloopError::Watch(format!("{}: {e}", path.display())))?;
            watching.push(path.clone());
        }
        if watching.is_empty() {
            return Err(StackloopError::Watch("none of the watch paths exist".to_string()));
        }

        let debounce = options.debounce;
        let join = thread::Builder::new()
            .name("stackloop-watch".to_string())
            .spawn(move || {
                let mut state = WatcherState::new(debounce);
                loop {
                    match rx.recv_timeout(Duration::from_millis(POLL_MS)) {
                        Ok(path) => {
                            if filter.is_relevant(&path) {
                                state.add_change(path);
                            }
                        }
                        Err(RecvTimeoutError::Timeout) => {}
                        Err(RecvTimeoutError::Disconnected) => break,
                    }

                    if state.should_flush() {
                        let changes = state.take_changes();
                        tracing::debug!(count = changes.len(), "files changed");
                        if handle.file_change().is_err() {
                            break;
                        }
                    }
                }
                tracing::debug!("watch thread stopped");
            })?;

        Ok(Self {
            watcher: Some(watcher),
            join: Some(join),
            watching,
        })
    }

    /// Paths actually being watched
    pub fn watching(&self) -> &[PathBuf] {
        &self.watching
    }

    /// Stop watching and wait for the thread to exit
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the watcher drops its sender, which ends the thread
        self.watcher.take();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
