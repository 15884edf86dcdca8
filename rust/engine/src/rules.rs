use crate::cards::Rank;
use crate::errors::GameError;
use crate::game::{PlayerAction, RoundSnapshot, RoundState};
use crate::hand::Hand;

/// The dealer draws on anything below this total and stands on it or above,
/// soft totals included.
pub const DEALER_STANDS_ON: u8 = 17;

pub fn dealer_should_draw(dealer: &Hand) -> bool {
    dealer.value() < DEALER_STANDS_ON
}

/// Insurance costs half the main bet, rounded down.
pub fn insurance_stake(bet: u32) -> u32 {
    bet / 2
}

/// Parses a textual bet amount as typed by a player.
///
/// # Errors
///
/// Returns [`GameError::InvalidBet`] when the input is empty, not a whole
/// number, zero or negative, or does not fit a chip amount.
///
/// # Examples
///
/// ```
/// use hilo_engine::rules::parse_bet;
/// use hilo_engine::errors::GameError;
///
/// assert_eq!(parse_bet(" 25 "), Ok(25));
/// assert!(matches!(parse_bet("0"), Err(GameError::InvalidBet { .. })));
/// assert!(matches!(parse_bet("-5"), Err(GameError::InvalidBet { .. })));
/// assert!(matches!(parse_bet("ten"), Err(GameError::InvalidBet { .. })));
/// ```
pub fn parse_bet(input: &str) -> Result<u32, GameError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(GameError::invalid_bet("amount is required"));
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| GameError::invalid_bet(format!("'{}' is not a whole number", trimmed)))?;
    if value <= 0 {
        return Err(GameError::invalid_bet("amount must be positive"));
    }
    u32::try_from(value).map_err(|_| GameError::invalid_bet("amount is too large"))
}

/// Checks an opening bet against the bankroll.
///
/// # Errors
///
/// - [`GameError::InvalidBet`] for a zero amount
/// - [`GameError::InsufficientChips`] when the amount exceeds `chips`
pub fn validate_bet(amount: u32, chips: u32) -> Result<u32, GameError> {
    if amount == 0 {
        return Err(GameError::invalid_bet("amount must be positive"));
    }
    if amount > chips {
        return Err(GameError::InsufficientChips {
            needed: amount,
            available: chips,
        });
    }
    Ok(amount)
}

/// Player decisions whose table preconditions currently hold.
///
/// Affordability is not checked here: a double down or insurance the player
/// cannot cover is offered and then rejected with `InsufficientChips`.
/// Insurance is withheld when half the bet rounds down to nothing.
pub fn legal_actions(snapshot: &RoundSnapshot) -> Vec<PlayerAction> {
    if snapshot.state != RoundState::PlayerTurn {
        return Vec::new();
    }
    let mut actions = vec![PlayerAction::Hit, PlayerAction::Stand];
    let two_cards = snapshot.player_hand.len() == 2;
    if two_cards && !snapshot.doubled_down {
        actions.push(PlayerAction::DoubleDown);
    }
    let ace_up = snapshot
        .dealer_up_card
        .is_some_and(|c| c.rank == Rank::Ace);
    if two_cards
        && ace_up
        && snapshot.insurance_bet == 0
        && insurance_stake(snapshot.bet) > 0
    {
        actions.push(PlayerAction::Insurance);
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Suit};

    #[test]
    fn parse_bet_rejects_overflow() {
        assert!(matches!(
            parse_bet("99999999999"),
            Err(GameError::InvalidBet { .. })
        ));
    }

    #[test]
    fn validate_bet_allows_whole_bankroll() {
        assert_eq!(validate_bet(100, 100), Ok(100));
        assert_eq!(
            validate_bet(101, 100),
            Err(GameError::InsufficientChips {
                needed: 101,
                available: 100
            })
        );
    }

    #[test]
    fn dealer_draws_below_seventeen_only() {
        let sixteen = Hand::from_cards(vec![
            Card::new(Rank::Ten, Suit::Clubs),
            Card::new(Rank::Six, Suit::Clubs),
        ]);
        let soft_seventeen = Hand::from_cards(vec![
            Card::new(Rank::Ace, Suit::Clubs),
            Card::new(Rank::Six, Suit::Clubs),
        ]);
        assert!(dealer_should_draw(&sixteen));
        assert!(!dealer_should_draw(&soft_seventeen));
    }

    #[test]
    fn insurance_stake_truncates() {
        assert_eq!(insurance_stake(100), 50);
        assert_eq!(insurance_stake(25), 12);
        assert_eq!(insurance_stake(1), 0);
    }
}
