use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Value at which a hand busts once exceeded.
pub const BLACKJACK: u8 = 21;

/// Best blackjack total for a slice of cards.
///
/// Every ace starts at 11; while the total is over 21 and an ace is still
/// counted high, one ace is demoted to 1.
pub fn hand_value(cards: &[Card]) -> u8 {
    let (total, _) = total_and_soft_aces(cards);
    u8::try_from(total).unwrap_or(u8::MAX)
}

fn total_and_soft_aces(cards: &[Card]) -> (u32, u32) {
    let mut total: u32 = 0;
    let mut aces: u32 = 0;
    for card in cards {
        total += u32::from(card.game_value());
        if card.is_ace() {
            aces += 1;
        }
    }
    while total > u32::from(BLACKJACK) && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    (total, aces)
}

/// Cards held by one participant for the current round.
/// Hands only grow; they are cleared between rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn first(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn value(&self) -> u8 {
        hand_value(&self.cards)
    }

    /// True while at least one ace is still counted as 11.
    pub fn is_soft(&self) -> bool {
        let (_, soft_aces) = total_and_soft_aces(&self.cards);
        soft_aces > 0
    }

    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// Exactly two cards totalling 21.
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == BLACKJACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn c(rank: Rank) -> Card {
        Card::new(rank, Suit::Clubs)
    }

    #[test]
    fn empty_hand_is_zero() {
        assert_eq!(Hand::new().value(), 0);
    }

    #[test]
    fn soft_seventeen_is_soft() {
        let hand = Hand::from_cards(vec![c(Rank::Ace), c(Rank::Six)]);
        assert_eq!(hand.value(), 17);
        assert!(hand.is_soft());
    }

    #[test]
    fn hard_hand_after_demotion_is_not_soft() {
        let hand = Hand::from_cards(vec![c(Rank::Ace), c(Rank::Six), c(Rank::Nine)]);
        assert_eq!(hand.value(), 16);
        assert!(!hand.is_soft());
    }

    #[test]
    fn three_card_twenty_one_is_not_blackjack() {
        let hand = Hand::from_cards(vec![c(Rank::Seven), c(Rank::Seven), c(Rank::Seven)]);
        assert_eq!(hand.value(), 21);
        assert!(!hand.is_blackjack());
    }

    #[test]
    fn bust_detection() {
        let hand = Hand::from_cards(vec![c(Rank::King), c(Rank::Queen), c(Rank::Two)]);
        assert!(hand.is_bust());
    }
}
