//! Card, hand, and table formatters for terminal display.
//!
//! Pure functions turning engine values into the strings the `play` and
//! `deal` commands print. Suits use Unicode symbols with an ASCII fallback
//! for terminals that cannot render them.
//!
//! - **Unicode mode**: ♥ ♦ ♣ ♠
//! - **ASCII mode**: h d c s
//!
//! ## Example
//!
//! ```rust
//! use hilo_engine::cards::{Card, Rank, Suit};
//! use hilo_cli::formatters::{format_card, format_hand};
//!
//! let ten = Card::new(Rank::Ten, Suit::Spades);
//! assert!(format_card(&ten) == "10♠" || format_card(&ten) == "10s");
//! assert!(format_hand(&[ten]).starts_with("[10"));
//! ```

use hilo_engine::cards::{Card, Suit};
use hilo_engine::events::GameEvent;
use hilo_engine::game::{PlayerAction, RoundSnapshot};

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM) or VS Code (VSCODE_INJECTION). Unix-like systems are
/// assumed to support Unicode.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

const SUITS: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

fn ascii_suit(suit: Suit) -> &'static str {
    match suit {
        Suit::Hearts => "h",
        Suit::Diamonds => "d",
        Suit::Clubs => "c",
        Suit::Spades => "s",
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        ascii_suit(*suit).to_string()
    }
}

/// Format a card as its printed rank followed by its suit, e.g. "10♠" or "10s".
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.label(), format_suit(&card.suit))
}

/// Format a hand in bracket notation, e.g. "[A♠ K♦]" or "[]" if empty.
pub fn format_hand(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Dealer hand as seen from the table: the hole card shows as "??" until revealed.
pub fn format_dealer_hand(snapshot: &RoundSnapshot) -> String {
    let visible = snapshot.visible_dealer_cards();
    let mut parts: Vec<String> = visible.iter().map(format_card).collect();
    let hidden = snapshot.dealer_hand.len() - visible.len();
    parts.extend(std::iter::repeat_n("??".to_string(), hidden));
    format!("[{}]", parts.join(" "))
}

/// Event narration with suits rendered the same way as [`format_card`].
pub fn format_event(event: &GameEvent) -> String {
    render_event(event, supports_unicode())
}

fn render_event(event: &GameEvent, unicode: bool) -> String {
    let text = event.to_string();
    if unicode {
        return text;
    }
    SUITS
        .iter()
        .fold(text, |t, suit| t.replace(suit.symbol(), ascii_suit(*suit)))
}

/// Signed running count, e.g. "+3", "0", "-2".
pub fn format_count(running: i32) -> String {
    if running > 0 {
        format!("+{}", running)
    } else {
        running.to_string()
    }
}

/// Running count with a short Hi-Lo explanation for the `count` command.
pub fn format_count_explanation(running: i32, cards_remaining: usize) -> String {
    let reading = match running {
        r if r > 0 => "more low cards have been seen, so the rest of the shoe favors the player",
        r if r < 0 => "more tens and aces have been seen, so the rest of the shoe favors the dealer",
        _ => "low and high cards are balanced so far",
    };
    format!(
        "Running count: {} ({} cards left in the shoe)\n\
         Hi-Lo: 2-6 count +1, 7-9 count 0, 10-A count -1; {}.",
        format_count(running),
        cards_remaining,
        reading
    )
}

pub fn format_action(action: &PlayerAction) -> &'static str {
    match action {
        PlayerAction::Hit => "hit",
        PlayerAction::Stand => "stand",
        PlayerAction::DoubleDown => "double",
        PlayerAction::Insurance => "insurance",
    }
}

/// Prompt hint listing the actions currently on offer, e.g. "hit/stand/double".
pub fn format_actions(actions: &[PlayerAction]) -> String {
    actions
        .iter()
        .map(format_action)
        .collect::<Vec<_>>()
        .join("/")
}

/// Multi-line table view: dealer, player, chips and (optionally) the count.
pub fn format_table(snapshot: &RoundSnapshot, show_count: bool) -> String {
    let dealer_total = match snapshot.dealer_total {
        Some(total) => format!(" ({})", total),
        None => String::new(),
    };
    let mut lines = vec![
        format!("Dealer: {}{}", format_dealer_hand(snapshot), dealer_total),
        format!(
            "You:    {} ({})",
            format_hand(&snapshot.player_hand),
            snapshot.player_total
        ),
    ];
    let mut wager = format!("Chips: {}  Bet: {}", snapshot.chips, snapshot.bet);
    if snapshot.insurance_bet > 0 {
        wager.push_str(&format!("  Insurance: {}", snapshot.insurance_bet));
    }
    lines.push(wager);
    if show_count {
        lines.push(format!("Count: {}", format_count(snapshot.running_count)));
    }
    lines.join("\n")
}
