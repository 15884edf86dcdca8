use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::Card;
use crate::events::GameEvent;

/// Where the engine is within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    /// No round open: before the first bet or after a new game
    Idle,
    /// Wager taken, cards not dealt yet
    BetPlaced,
    /// Waiting on the player's decisions
    PlayerTurn,
    /// Dealer drawing to 17; only observable from inside a stand
    DealerTurn,
    /// Outcome settled, chips paid out
    Resolved,
}

impl RoundState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundState::Idle => "idle",
            RoundState::BetPlaced => "bet placed",
            RoundState::PlayerTurn => "player turn",
            RoundState::DealerTurn => "dealer turn",
            RoundState::Resolved => "resolved",
        }
    }
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerBust,
    DealerBust,
    PlayerWins,
    DealerWins,
    Push,
    DealerBlackjack,
    /// Dealer blackjack met by a player 21
    BlackjackPush,
}

impl Outcome {
    /// Chips returned to the player for a settled main wager.
    /// Losing wagers were already deducted when placed.
    pub fn payout(&self, bet: u32) -> u32 {
        match self {
            Outcome::PlayerWins | Outcome::DealerBust => bet.saturating_mul(2),
            Outcome::Push | Outcome::BlackjackPush => bet,
            Outcome::PlayerBust | Outcome::DealerWins | Outcome::DealerBlackjack => 0,
        }
    }

    pub fn is_player_win(&self) -> bool {
        matches!(self, Outcome::PlayerWins | Outcome::DealerBust)
    }

    pub fn is_push(&self) -> bool {
        matches!(self, Outcome::Push | Outcome::BlackjackPush)
    }

    pub fn status(&self) -> &'static str {
        match self {
            Outcome::PlayerBust => "Bust! Dealer wins!",
            Outcome::DealerBust => "Dealer busts! You win!",
            Outcome::PlayerWins => "You win!",
            Outcome::DealerWins => "Dealer wins!",
            Outcome::Push => "Push!",
            Outcome::DealerBlackjack => "Dealer blackjack! You lose.",
            Outcome::BlackjackPush => "Push! Both have 21.",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status())
    }
}

/// A decision the player can make during their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    Hit,
    Stand,
    DoubleDown,
    Insurance,
}

impl PlayerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAction::Hit => "hit",
            PlayerAction::Stand => "stand",
            PlayerAction::DoubleDown => "double down",
            PlayerAction::Insurance => "take insurance",
        }
    }
}

/// Immutable view of the engine after an operation, for presentation layers.
///
/// `dealer_hand` holds every dealer card including an unrevealed hole card;
/// renderers should show only `dealer_up_card` until `dealer_revealed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub state: RoundState,
    pub chips: u32,
    pub bet: u32,
    pub insurance_bet: u32,
    pub doubled_down: bool,
    pub last_bet: u32,
    pub running_count: i32,
    pub cards_remaining: usize,
    pub player_hand: Vec<Card>,
    pub player_total: u8,
    pub dealer_hand: Vec<Card>,
    pub dealer_up_card: Option<Card>,
    /// Only present once the hole card is revealed
    pub dealer_total: Option<u8>,
    pub dealer_revealed: bool,
    pub outcome: Option<Outcome>,
    pub log: Vec<GameEvent>,
}

impl RoundSnapshot {
    pub fn round_in_progress(&self) -> bool {
        matches!(self.state, RoundState::PlayerTurn | RoundState::DealerTurn)
    }

    /// Dealer cards a player at the table can currently see.
    pub fn visible_dealer_cards(&self) -> &[Card] {
        if self.dealer_revealed {
            &self.dealer_hand
        } else {
            let n = self.dealer_hand.len().min(1);
            &self.dealer_hand[..n]
        }
    }
}
