//! # Hi-Lo Blackjack CLI Library
//!
//! Command-line front end for the `hilo-engine` blackjack table. It exposes
//! subcommands for playing a session, inspecting a deal, summarizing round
//! histories and showing configuration.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Available Subcommands
//!
//! - `play`: Interactive session against the dealer on stdin
//! - `deal`: Deal a single round for inspection
//! - `stats`: Aggregate statistics from JSONL round history files
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, HiloCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_play_command, handle_stats_command,
};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when input ends mid-round
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["hilo", "deal", "--seed", "42"];
/// let code = hilo_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "deal", "stats", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HiloCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Usage: hilo <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: hilo --help");
            return exit_code::ERROR;
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Play {
            chips,
            seed,
            history,
            show_count,
        } => {
            let cfg = match config::load() {
                Ok(c) => c,
                Err(e) => {
                    write_or_exit!(err, "Error: Invalid configuration: {}", e);
                    return exit_code::ERROR;
                }
            };
            // Use stdin for real input (supports both TTY and piped stdin)
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(
                chips.unwrap_or(cfg.starting_chips),
                seed.or(cfg.seed),
                history.or(cfg.history),
                show_count || cfg.show_count,
                out,
                err,
                &mut stdin_lock,
            )
        }
        Commands::Deal { seed, chips } => {
            let cfg = match config::load() {
                Ok(c) => c,
                Err(e) => {
                    write_or_exit!(err, "Error: Invalid configuration: {}", e);
                    return exit_code::ERROR;
                }
            };
            handle_deal_command(
                seed.or(cfg.seed),
                chips.unwrap_or(cfg.starting_chips),
                out,
            )
        }
        Commands::Stats { input } => handle_stats_command(input, out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            write_or_exit!(err, "Interrupted: {}", msg);
            exit_code::INTERRUPTED
        }
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
