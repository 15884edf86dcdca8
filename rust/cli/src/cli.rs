//! Command-line argument definitions for the `hilo` binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "hilo",
    version,
    about = "Single-player blackjack with a Hi-Lo running count"
)]
pub struct HiloCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play an interactive session against the dealer
    Play {
        /// Starting chips (overrides configuration)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        chips: Option<u32>,
        /// Shuffle seed for a reproducible shoe
        #[arg(long)]
        seed: Option<u64>,
        /// Append each resolved round to this JSONL file
        #[arg(long)]
        history: Option<String>,
        /// Show the running count after every action
        #[arg(long)]
        show_count: bool,
    },
    /// Deal one round with a minimum bet and show the table
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        chips: Option<u32>,
    },
    /// Summarize a round history file (.jsonl or .jsonl.zst) or directory
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}
