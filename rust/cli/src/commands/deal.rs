//! Deal command handler for a single inspected round.
//!
//! Opens one round with the minimum bet and prints the initial deal as the
//! player sees it, plus the running count. With a seed the output is
//! deterministic.

use crate::error::CliError;
use crate::formatters::{format_count, format_table};
use crate::ui;
use hilo_engine::engine::RoundEngine;
use std::io::Write;

/// Smallest wager the engine accepts.
const MIN_BET: u32 = 1;

/// Handle the deal command.
///
/// # Arguments
///
/// * `seed` - Optional shuffle seed for deterministic dealing
/// * `chips` - Bankroll for the table
/// * `out` - Output stream for command results
///
/// # Returns
///
/// Returns `Ok(())` on success, or `CliError` on engine or I/O errors.
pub fn handle_deal_command(
    seed: Option<u64>,
    chips: u32,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut eng = RoundEngine::new(chips, Some(seed))?;
    let events = eng.start_round(MIN_BET)?;

    writeln!(out, "Seed: {}", seed)?;
    ui::write_events(out, &events)?;
    writeln!(out, "{}", format_table(&eng.snapshot(), false))?;
    writeln!(
        out,
        "Running count: {} ({} cards left)",
        format_count(eng.running_count()),
        eng.cards_remaining()
    )?;
    Ok(())
}
