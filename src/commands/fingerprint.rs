use std::path::Path;

use anyhow::{Context, Result};

use stackloop::application::compute_fingerprint;
use stackloop::config;

pub fn cmd_fingerprint(out: Option<&Path>, json: bool) -> Result<()> {
    let out_dir = match out {
        Some(dir) => dir.to_path_buf(),
        None => {
            let root = std::env::current_dir().context("cannot determine current directory")?;
            let loaded = config::discover(&root, None)?;
            loaded.config.output_dir(&root)
        }
    };

    let fingerprint = compute_fingerprint(&out_dir)
        .with_context(|| format!("cannot fingerprint {}", out_dir.display()))?;

    if json {
        let value = serde_json::json!({
            "command": "fingerprint",
            "output": out_dir.display().to_string(),
            "fingerprint": fingerprint,
        });
        println!("{value}");
    } else {
        println!("{fingerprint}");
    }

    Ok(())
}
