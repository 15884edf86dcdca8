//! Narrated record of what happened during a round.
//!
//! Every state-changing engine operation returns the events it produced and
//! appends them to the round log. Presentation layers replay them with their
//! own pacing (for example one dealer draw at a time).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::Card;
use crate::game::Outcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    BetPlaced {
        amount: u32,
        chips: u32,
    },
    InitialDeal {
        player: [Card; 2],
        dealer_up: Card,
        player_total: u8,
    },
    PlayerHit {
        card: Card,
        total: u8,
    },
    DoubledDown {
        bet: u32,
        card: Card,
        total: u8,
    },
    InsuranceTaken {
        amount: u32,
    },
    HoleCardRevealed {
        card: Card,
        dealer_total: u8,
    },
    DealerBlackjack,
    InsurancePaid {
        payout: u32,
    },
    InsuranceLost {
        amount: u32,
    },
    DealerTurnStarted,
    DealerDraw {
        card: Card,
        total: u8,
    },
    DealerStands {
        total: u8,
    },
    /// The shoe could not supply a card even after a reset
    ShoeExhausted,
    /// The shoe ran out and was reshuffled; the running count restarts at zero
    Reshuffled,
    RoundResolved {
        outcome: Outcome,
        player_total: u8,
        dealer_total: u8,
        payout: u32,
        chips: u32,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::BetPlaced { amount, chips } => {
                write!(f, "Bet placed: {} chips ({} left).", amount, chips)
            }
            GameEvent::InitialDeal {
                player,
                dealer_up,
                player_total,
            } => write!(
                f,
                "You were dealt {} {} ({}). Dealer shows {}.",
                player[0], player[1], player_total, dealer_up
            ),
            GameEvent::PlayerHit { card, total } => {
                write!(f, "You drew: {} (total {})", card, total)
            }
            GameEvent::DoubledDown { bet, card, total } => write!(
                f,
                "Doubled down to {} chips and drew: {} (total {})",
                bet, card, total
            ),
            GameEvent::InsuranceTaken { amount } => {
                write!(f, "Insurance taken: {} chips.", amount)
            }
            GameEvent::HoleCardRevealed { card, dealer_total } => write!(
                f,
                "Dealer's facedown card is revealed: {} (dealer {})",
                card, dealer_total
            ),
            GameEvent::DealerBlackjack => f.write_str("Dealer has blackjack!"),
            GameEvent::InsurancePaid { payout } => {
                write!(f, "Insurance pays out {} chips.", payout)
            }
            GameEvent::InsuranceLost { amount } => {
                write!(f, "Insurance lost: {} chips.", amount)
            }
            GameEvent::DealerTurnStarted => f.write_str("Dealer's turn to play..."),
            GameEvent::DealerDraw { card, total } => {
                write!(f, "Dealer drew: {} (total {})", card, total)
            }
            GameEvent::DealerStands { total } => {
                write!(f, "Final dealer hand value: {}", total)
            }
            GameEvent::ShoeExhausted => f.write_str("No more cards in deck."),
            GameEvent::Reshuffled => f.write_str("Deck was automatically reshuffled."),
            GameEvent::RoundResolved {
                outcome,
                player_total,
                dealer_total,
                payout,
                chips,
            } => write!(
                f,
                "{} (you {}, dealer {}; paid {}, chips {})",
                outcome, player_total, dealer_total, payout, chips
            ),
        }
    }
}
