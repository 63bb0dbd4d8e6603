use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Stackloop - continuous build, synth and deploy loop for infrastructure stacks
#[derive(Parser, Debug)]
#[command(name = "stackloop")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events for CI/automation
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch sources and keep the cloud assembly built, synthesized and deployable
    Start {
        /// Project root
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Config file (defaults to <root>/stackloop.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Deploy automatically whenever synth output changes
        #[arg(long)]
        auto_deploy: bool,
    },

    /// Print the fingerprint of a synth output directory
    Fingerprint {
        /// Synth output directory (defaults to the configured output)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
