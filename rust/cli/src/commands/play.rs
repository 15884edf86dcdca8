//! # Play Command
//!
//! Interactive blackjack session against the dealer, read line by line from
//! stdin. The session owns one [`RoundEngine`] and renders each operation's
//! events as narration followed by the table view.
//!
//! ## Features
//!
//! - Betting with `bet N`, or `same` to repeat the previous wager
//! - Hit, stand, double down and insurance during the player's turn
//! - `count` shows the running Hi-Lo count with an explanation
//! - `new [chips]` abandons the session and starts over
//! - Engine rejections are printed and the session continues
//! - Optional JSONL history of every resolved round

use crate::error::CliError;
use crate::formatters::{format_actions, format_count_explanation, format_table};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{COMMAND_HELP, ParseResult, TableCommand, parse_table_command};
use hilo_engine::engine::RoundEngine;
use hilo_engine::errors::GameError;
use hilo_engine::events::GameEvent;
use hilo_engine::logger::RoundLogger;
use std::io::{BufRead, Write};

/// Handle the play command: interactive blackjack session
///
/// # Arguments
///
/// * `chips` - Starting chips (must be >= 1)
/// * `seed` - Shuffle seed for reproducibility (default: random)
/// * `history` - Optional JSONL path receiving one record per resolved round
/// * `show_count` - Print the running count under the table
/// * `out` - Output stream for game display
/// * `err` - Error stream for warnings and errors
/// * `stdin` - Input stream for table commands
///
/// # Returns
///
/// * `Ok(())` when the player quits or input ends between rounds
/// * `Err(CliError::Interrupted)` when input ends in the middle of a round
/// * `Err(CliError)` for invalid chips, history file or output errors
pub fn handle_play_command(
    chips: u32,
    seed: Option<u64>,
    history: Option<String>,
    show_count: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if chips == 0 {
        ui::write_error(err, "chips must be >= 1")?;
        return Err(CliError::InvalidInput("chips must be >= 1".to_string()));
    }
    let seed = seed.unwrap_or_else(rand::random);

    let mut logger = match history.as_deref() {
        Some(path) => match RoundLogger::create(path) {
            Ok(l) => Some(l),
            Err(e) => {
                ui::write_error(err, &format!("Failed to open history {}: {}", path, e))?;
                return Err(CliError::Io(e));
            }
        },
        None => None,
    };

    let mut session = Session {
        engine: RoundEngine::new(chips, Some(seed))?,
        starting_chips: chips,
        show_count,
        rounds: 0,
    };
    tracing::info!(chips, seed, history = ?history, "session started");

    writeln!(out, "play: chips={} seed={}", chips, seed)?;
    writeln!(out, "{}", COMMAND_HELP)?;

    loop {
        write!(out, "{}", session.prompt())?;
        out.flush()?;

        let Some(input) = read_stdin_line(stdin) else {
            if session.engine.round_in_progress() {
                writeln!(out)?;
                return Err(CliError::Interrupted(
                    "input ended during a round; the wager is forfeited".to_string(),
                ));
            }
            break;
        };
        if input.is_empty() {
            continue;
        }

        match parse_table_command(&input) {
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
            ParseResult::Command(cmd) => match session.execute(cmd, out) {
                Ok(Some(events)) => {
                    let resolved = session.render(&events, out)?;
                    if resolved {
                        if let Some(logger) = logger.as_mut() {
                            let id = logger.next_id();
                            if let Some(record) = session.engine.round_record(id) {
                                logger.write(&record)?;
                            }
                        }
                    }
                }
                Ok(None) => {}
                Err(SessionError::Game(e)) => ui::write_error(err, &e.to_string())?,
                Err(SessionError::Io(e)) => return Err(CliError::Io(e)),
            },
        }
    }

    writeln!(
        out,
        "Rounds played: {}  Final chips: {}",
        session.rounds,
        session.engine.chips()
    )?;
    Ok(())
}

struct Session {
    engine: RoundEngine,
    starting_chips: u32,
    show_count: bool,
    rounds: u32,
}

impl Session {
    fn prompt(&self) -> String {
        if self.engine.round_in_progress() {
            format!("Action ({}): ", format_actions(&self.engine.legal_actions()))
        } else {
            "Bet (bet <amount>/same/q): ".to_string()
        }
    }

    /// Runs one table command. Informational commands print directly and
    /// yield `None`; engine operations yield their events.
    fn execute(
        &mut self,
        cmd: TableCommand,
        out: &mut dyn Write,
    ) -> Result<Option<Vec<GameEvent>>, SessionError> {
        let events = match cmd {
            TableCommand::Bet(amount) => self.engine.start_round(amount)?,
            TableCommand::Same => self.engine.rebet()?,
            TableCommand::Action(action) => self.engine.apply(action)?,
            TableCommand::Count => {
                writeln!(
                    out,
                    "{}",
                    format_count_explanation(
                        self.engine.running_count(),
                        self.engine.cards_remaining()
                    )
                )?;
                return Ok(None);
            }
            TableCommand::NewGame(chips) => {
                let chips = chips.unwrap_or(self.starting_chips);
                self.engine.new_game(chips)?;
                self.rounds = 0;
                writeln!(out, "New game with {} chips. Shoe reshuffled.", chips)?;
                return Ok(None);
            }
            TableCommand::Help => {
                writeln!(out, "{}", COMMAND_HELP)?;
                return Ok(None);
            }
        };
        Ok(Some(events))
    }

    /// Narrates `events` then shows the table. Returns whether they settled a round.
    fn render(&mut self, events: &[GameEvent], out: &mut dyn Write) -> Result<bool, CliError> {
        ui::write_events(out, events)?;
        let snapshot = self.engine.snapshot();
        writeln!(out, "{}", format_table(&snapshot, self.show_count))?;

        let resolved = events
            .iter()
            .any(|e| matches!(e, GameEvent::RoundResolved { .. }));
        if resolved {
            self.rounds += 1;
            if let Some(outcome) = snapshot.outcome {
                writeln!(out, "{}", outcome.status())?;
            }
            if snapshot.chips == 0 {
                writeln!(out, "You are out of chips. Type 'new' to start over.")?;
            }
        }
        Ok(resolved)
    }
}

/// Failure of a single table command; engine rejections keep the session alive.
enum SessionError {
    Game(GameError),
    Io(std::io::Error),
}

impl From<GameError> for SessionError {
    fn from(e: GameError) -> Self {
        SessionError::Game(e)
    }
}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        SessionError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn play(input: &str, chips: u32, seed: u64) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let result = handle_play_command(
            chips,
            Some(seed),
            None,
            false,
            &mut out,
            &mut err,
            &mut stdin,
        );
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_quit_immediately() {
        let (result, out, err) = play("q\n", 1000, 42);
        assert!(result.is_ok());
        assert!(out.contains("play: chips=1000 seed=42"));
        assert!(out.contains("Rounds played: 0  Final chips: 1000"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_zero_chips_error() {
        let (result, _, err) = play("q\n", 0, 1);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(err.contains("chips must be >= 1"));
    }

    #[test]
    fn test_round_is_played_and_settled() {
        let (result, out, _) = play("bet 100\nstand\nq\n", 1000, 7);
        assert!(result.is_ok());
        assert!(out.contains("Bet placed: 100 chips"));
        assert!(out.contains("Dealer's facedown card is revealed"));
        assert!(out.contains("Rounds played: 1"));
    }

    #[test]
    fn test_engine_errors_do_not_end_session() {
        let (result, out, err) = play("hit\nbet 5000\nbet 10\ns\nq\n", 1000, 3);
        assert!(result.is_ok());
        assert!(err.contains("Cannot hit"));
        assert!(err.contains("Insufficient chips"));
        assert!(out.contains("Rounds played: 1"));
    }

    #[test]
    fn test_invalid_input_reports_and_continues() {
        let (result, out, err) = play("split\nbet abc\nq\n", 1000, 3);
        assert!(result.is_ok());
        assert!(err.contains("Unrecognized command 'split'"));
        assert!(err.contains("not a whole number"));
        assert!(out.contains("Rounds played: 0"));
    }

    #[test]
    fn test_same_repeats_bet() {
        let (result, out, err) = play("same\nbet 20\ns\nsame\ns\nq\n", 1000, 11);
        assert!(result.is_ok());
        assert!(err.contains("no previous bet to repeat"));
        assert_eq!(out.matches("Bet placed: 20 chips").count(), 2);
        assert!(out.contains("Rounds played: 2"));
    }

    #[test]
    fn test_count_command_explains_hi_lo() {
        let (result, out, _) = play("count\nq\n", 1000, 5);
        assert!(result.is_ok());
        assert!(out.contains("Running count: 0 (52 cards left in the shoe)"));
        assert!(out.contains("Hi-Lo"));
    }

    #[test]
    fn test_new_game_resets_chips() {
        let (result, out, _) = play("bet 100\ns\nnew 300\nq\n", 1000, 5);
        assert!(result.is_ok());
        assert!(out.contains("New game with 300 chips."));
        assert!(out.contains("Final chips: 300"));
    }

    #[test]
    fn test_eof_between_rounds_ends_cleanly() {
        let (result, out, _) = play("", 1000, 5);
        assert!(result.is_ok());
        assert!(out.contains("Rounds played: 0"));
    }

    #[test]
    fn test_eof_mid_round_is_interrupted() {
        let (result, _, _) = play("bet 10\n", 1000, 5);
        assert!(matches!(result, Err(CliError::Interrupted(_))));
    }

    #[test]
    fn test_history_records_each_resolved_round() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history").join("rounds.jsonl");
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(b"bet 10\ns\nbet 10\ns\nq\n".to_vec());

        handle_play_command(
            500,
            Some(8),
            Some(path.to_string_lossy().into_owned()),
            false,
            &mut out,
            &mut err,
            &mut stdin,
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let rec: hilo_engine::logger::RoundRecord = serde_json::from_str(line).unwrap();
            assert_eq!(rec.bet, 10);
            assert_eq!(rec.seed, Some(8));
            assert!(rec.ts.is_some());
        }
    }

    #[test]
    fn test_show_count_adds_count_line() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(b"bet 10\ns\nq\n".to_vec());
        handle_play_command(500, Some(2), None, true, &mut out, &mut err, &mut stdin).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Count: "));
    }
}
