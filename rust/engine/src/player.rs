use crate::errors::GameError;
use crate::hand::Hand;

/// Default bankroll when none is configured.
pub const STARTING_CHIPS: u32 = 1_000;

/// The player's hand and chip ledger.
/// Chips already exclude every wager currently on the table.
#[derive(Debug, Clone)]
pub struct Player {
    /// Cards dealt to the player this round
    hand: Hand,
    /// Bankroll not currently wagered
    chips: u32,
    /// Main wager for the round (doubled by a double down)
    bet: u32,
    /// Side wager against a dealer blackjack, half the bet when taken
    insurance_bet: u32,
    /// Set at most once per round
    doubled_down: bool,
    /// Most recent opening bet, reused by a rebet
    last_bet: u32,
}

impl Player {
    pub fn new(chips: u32) -> Self {
        Self {
            hand: Hand::new(),
            chips,
            bet: 0,
            insurance_bet: 0,
            doubled_down: false,
            last_bet: 0,
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }
    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn bet(&self) -> u32 {
        self.bet
    }
    pub fn insurance_bet(&self) -> u32 {
        self.insurance_bet
    }
    pub fn doubled_down(&self) -> bool {
        self.doubled_down
    }
    pub fn last_bet(&self) -> u32 {
        self.last_bet
    }

    /// Fails without touching the ledger when `amount` exceeds the bankroll.
    pub fn ensure_covers(&self, amount: u32) -> Result<(), GameError> {
        if amount > self.chips {
            return Err(GameError::InsufficientChips {
                needed: amount,
                available: self.chips,
            });
        }
        Ok(())
    }

    /// Moves `amount` from the bankroll onto the main wager.
    pub fn place_bet(&mut self, amount: u32) -> Result<(), GameError> {
        self.ensure_covers(amount)?;
        self.chips -= amount;
        self.bet = amount;
        self.last_bet = amount;
        Ok(())
    }

    pub fn double_bet(&mut self) -> Result<(), GameError> {
        self.ensure_covers(self.bet)?;
        self.chips -= self.bet;
        self.bet *= 2;
        self.doubled_down = true;
        Ok(())
    }

    pub fn place_insurance(&mut self, amount: u32) -> Result<(), GameError> {
        self.ensure_covers(amount)?;
        self.chips -= amount;
        self.insurance_bet = amount;
        Ok(())
    }

    /// Returns a stake that never reached the table (failed deal).
    pub fn refund_bet(&mut self) {
        self.add_chips(self.bet);
        self.bet = 0;
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }

    /// Clears cards and per-round flags; the wager itself is kept.
    pub fn clear_round(&mut self) {
        self.hand.clear();
        self.insurance_bet = 0;
        self.doubled_down = false;
    }

    /// Back to a fresh bankroll with no betting history.
    pub fn reset(&mut self, chips: u32) {
        *self = Player::new(chips);
    }
}
