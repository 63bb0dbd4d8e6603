//! Stackloop CLI
//!
//! Usage: stackloop <COMMAND>
//!
//! Commands:
//!   start        Watch, build, synth and deploy continuously
//!   fingerprint  Print the fingerprint of a synth output directory

mod cli;
mod commands;
mod terminal;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    stackloop::logging::init(cli.verbose);

    match cli.command {
        Commands::Start {
            root,
            config,
            auto_deploy,
        } => commands::start::cmd_start(&root, config.as_deref(), auto_deploy, cli.json, cli.verbose),
        Commands::Fingerprint { out } => commands::fingerprint::cmd_fingerprint(out.as_deref(), cli.json),
    }
}
