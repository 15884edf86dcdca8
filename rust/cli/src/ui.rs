//! UI helper functions for terminal output formatting.
//!
//! Shared by the commands so errors, warnings and narration look the same
//! everywhere.

use crate::formatters::format_event;
use hilo_engine::events::GameEvent;
use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Narrates events one per line, so each dealer draw gets its own line.
pub fn write_events(out: &mut dyn Write, events: &[GameEvent]) -> std::io::Result<()> {
    for event in events {
        writeln!(out, "{}", format_event(event))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hilo_engine::cards::{Card, Rank, Suit};

    #[test]
    fn test_write_error_prefix() {
        let mut err = Vec::new();
        write_error(&mut err, "bad bet").unwrap();
        assert_eq!(String::from_utf8(err).unwrap(), "Error: bad bet\n");
    }

    #[test]
    fn test_write_events_one_per_line() {
        let mut out = Vec::new();
        let events = vec![
            GameEvent::DealerTurnStarted,
            GameEvent::DealerDraw {
                card: Card::new(Rank::Five, Suit::Diamonds),
                total: 21,
            },
        ];
        write_events(&mut out, &events).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Dealer drew: 5"));
    }
}
