//! Input parsing for the interactive `play` session.
//!
//! Each line typed at the table is parsed into a [`ParseResult`]: a table
//! command, a quit request, or an error message to show before prompting
//! again. Bet amounts go through [`hilo_engine::rules::parse_bet`] so the
//! session and the engine agree on what a valid wager is.

use hilo_engine::game::PlayerAction;
use hilo_engine::rules::parse_bet;

/// A command entered at the table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableCommand {
    /// Place a bet and deal a round
    Bet(u32),
    /// Repeat the previous bet
    Same,
    /// A decision during the player's turn
    Action(PlayerAction),
    /// Show the running count
    Count,
    /// Start over with a fresh bankroll; `None` uses the session default
    NewGame(Option<u32>),
    Help,
}

/// Result of parsing one line of user input.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Command(TableCommand),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

pub const COMMAND_HELP: &str = "Commands: bet <amount>, same, hit (h), stand (s), double (d), \
insurance (i), count, new [chips], help, q";

/// Parse user input into a table command.
///
/// Accepts the following input formats (case-insensitive):
/// - "bet X" → bet X chips and deal
/// - "same" or "rebet" → repeat the previous bet
/// - "h"/"hit", "s"/"stand", "d"/"double", "i"/"insurance" → player actions
/// - "count" → show the running count
/// - "new" or "new X" → new game
/// - "q" or "quit" → quit
///
/// # Example
///
/// ```rust
/// # use hilo_cli::validation::{parse_table_command, ParseResult, TableCommand};
/// use hilo_engine::game::PlayerAction;
///
/// assert_eq!(
///     parse_table_command("bet 100"),
///     ParseResult::Command(TableCommand::Bet(100))
/// );
/// assert_eq!(
///     parse_table_command("H"),
///     ParseResult::Command(TableCommand::Action(PlayerAction::Hit))
/// );
/// assert_eq!(parse_table_command("q"), ParseResult::Quit);
///
/// match parse_table_command("split") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_table_command(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&head) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };
    if head == "q" || head == "quit" {
        return ParseResult::Quit;
    }

    let command = match head {
        "bet" | "b" => {
            let Some(amount) = parts.get(1) else {
                return ParseResult::Invalid(
                    "Bet requires an amount (e.g., 'bet 100')".to_string(),
                );
            };
            match parse_bet(amount) {
                Ok(amount) => TableCommand::Bet(amount),
                Err(e) => return ParseResult::Invalid(e.to_string()),
            }
        }
        "same" | "rebet" => TableCommand::Same,
        "hit" | "h" => TableCommand::Action(PlayerAction::Hit),
        "stand" | "s" => TableCommand::Action(PlayerAction::Stand),
        "double" | "d" => TableCommand::Action(PlayerAction::DoubleDown),
        "insurance" | "i" => TableCommand::Action(PlayerAction::Insurance),
        "count" | "c" => TableCommand::Count,
        "new" => match parts.get(1) {
            None => TableCommand::NewGame(None),
            Some(chips) => match chips.parse::<u32>() {
                Ok(n) if n > 0 => TableCommand::NewGame(Some(n)),
                _ => {
                    return ParseResult::Invalid(
                        "New game requires a positive chip count (e.g., 'new 1000')".to_string(),
                    );
                }
            },
        },
        "help" | "?" => TableCommand::Help,
        other => {
            return ParseResult::Invalid(format!(
                "Unrecognized command '{}'. {}",
                other, COMMAND_HELP
            ));
        }
    };
    ParseResult::Command(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions_and_aliases() {
        for (input, action) in [
            ("hit", PlayerAction::Hit),
            ("h", PlayerAction::Hit),
            ("Stand", PlayerAction::Stand),
            ("s", PlayerAction::Stand),
            ("double", PlayerAction::DoubleDown),
            ("d", PlayerAction::DoubleDown),
            ("insurance", PlayerAction::Insurance),
            ("  i  ", PlayerAction::Insurance),
        ] {
            assert_eq!(
                parse_table_command(input),
                ParseResult::Command(TableCommand::Action(action)),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_bet_requires_positive_amount() {
        assert_eq!(
            parse_table_command("bet 25"),
            ParseResult::Command(TableCommand::Bet(25))
        );
        assert!(matches!(parse_table_command("bet"), ParseResult::Invalid(_)));
        assert!(matches!(parse_table_command("bet 0"), ParseResult::Invalid(_)));
        assert!(matches!(parse_table_command("bet -5"), ParseResult::Invalid(_)));
        assert!(matches!(parse_table_command("bet lots"), ParseResult::Invalid(_)));
    }

    #[test]
    fn test_parse_same_and_count() {
        assert_eq!(
            parse_table_command("same"),
            ParseResult::Command(TableCommand::Same)
        );
        assert_eq!(
            parse_table_command("count"),
            ParseResult::Command(TableCommand::Count)
        );
    }

    #[test]
    fn test_parse_new_game() {
        assert_eq!(
            parse_table_command("new"),
            ParseResult::Command(TableCommand::NewGame(None))
        );
        assert_eq!(
            parse_table_command("new 500"),
            ParseResult::Command(TableCommand::NewGame(Some(500)))
        );
        assert!(matches!(parse_table_command("new 0"), ParseResult::Invalid(_)));
    }

    #[test]
    fn test_parse_quit_and_empty() {
        assert_eq!(parse_table_command("q"), ParseResult::Quit);
        assert_eq!(parse_table_command("QUIT"), ParseResult::Quit);
        assert_eq!(
            parse_table_command("   "),
            ParseResult::Invalid("Empty input".to_string())
        );
    }
}
