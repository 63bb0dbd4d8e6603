use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};

use stackloop::application::{BuilderHandle, BuilderOptions, StacksBuilder};
use stackloop::config;
use stackloop::domain::ports::BuilderEventSink;
use stackloop::infrastructure::{
    CommandServices, ConsoleEventSink, ConsoleOptions, FileWatcher, JsonEventSink, WatchOptions,
};

use super::format_warning;

pub fn cmd_start(
    root: &Path,
    config_path: Option<&Path>,
    auto_deploy: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let root = root
        .canonicalize()
        .with_context(|| format!("project root not found: {}", root.display()))?;

    let loaded = config::discover(&root, config_path)?;
    for warning in &loaded.warnings {
        eprintln!("{}", format_warning(warning));
    }
    if let Some(source) = &loaded.source {
        tracing::info!(config = %source.display(), "loaded config");
    }
    let config = loaded.config;

    let auto_deploy = auto_deploy || config.deploy.auto;
    let options = BuilderOptions::new(config.output_dir(&root)).with_auto_deploy(auto_deploy);
    let services = Arc::new(CommandServices::from_config(&root, &config));

    let builder = match StacksBuilder::new(options, services) {
        Ok(builder) => builder,
        Err(e) if e.is_fingerprint_failure() => {
            return Err(anyhow::Error::new(e).context(
                "no synthesized cloud assembly to compare against; run synth once (e.g. `npx cdk synth`) and start again",
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let sink: Arc<dyn BuilderEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout(ConsoleOptions {
            unicode: crate::terminal::supports_unicode(),
            verbose: verbose > 0,
            auto_deploy,
        }))
    };
    let builder = builder.with_sink(sink);
    let handle = builder.handle();

    let watcher = FileWatcher::start(WatchOptions::from_config(root.clone(), &config), handle.clone())?;
    tracing::debug!(paths = ?watcher.watching(), "watching");

    let stop_handle = handle.clone();
    ctrlc::set_handler(move || {
        let _ = stop_handle.stop();
    })
    .context("failed to install Ctrl+C handler")?;

    spawn_deploy_trigger(handle)?;

    let result = builder.run();
    watcher.stop();

    let snapshot = result?;
    tracing::info!(state = %snapshot.state, "stopped");
    Ok(())
}

/// Every line on stdin asks for a deploy. The thread is left blocked on
/// stdin when the loop ends; process exit reaps it.
fn spawn_deploy_trigger(handle: BuilderHandle) -> Result<()> {
    thread::Builder::new()
        .name("stackloop-stdin".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                if line.is_err() || handle.trigger_deploy().is_err() {
                    break;
                }
            }
            tracing::debug!("stdin closed, deploy trigger stopped");
        })
        .context("failed to start stdin reader")?;
    Ok(())
}
