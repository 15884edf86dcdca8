use tracing::{debug, info, warn};

use crate::cards::{Card, Rank};
use crate::count::CountTracker;
use crate::errors::GameError;
use crate::events::GameEvent;
use crate::game::{Outcome, PlayerAction, RoundSnapshot, RoundState};
use crate::hand::{Hand, BLACKJACK};
use crate::logger::RoundRecord;
use crate::player::Player;
use crate::rules;
use crate::shoe::Shoe;

/// Single-player blackjack table with a Hi-Lo running count.
///
/// Owns the shoe, both hands and the chip ledger. Every operation is a
/// synchronous state transition: it either fails with a [`GameError`] and
/// leaves the table untouched, or returns the [`GameEvent`]s it produced
/// (also appended to the round log).
///
/// # Examples
///
/// ```
/// use hilo_engine::engine::RoundEngine;
/// use hilo_engine::game::RoundState;
///
/// let mut engine = RoundEngine::new(500, Some(12345)).expect("positive chips");
/// engine.start_round(50).expect("bet is affordable");
/// assert_eq!(engine.state(), RoundState::PlayerTurn);
/// assert_eq!(engine.chips(), 450);
///
/// // Standing hands the table to the dealer, who plays out and settles.
/// let events = engine.stand().expect("player turn");
/// assert!(!events.is_empty());
/// assert_eq!(engine.state(), RoundState::Resolved);
/// ```
#[derive(Debug)]
pub struct RoundEngine {
    shoe: Shoe,
    count: CountTracker,
    player: Player,
    dealer: Hand,
    state: RoundState,
    /// The dealer's second card has been shown to the player
    dealer_revealed: bool,
    /// The hole card has been fed to the count
    hole_card_counted: bool,
    outcome: Option<Outcome>,
    /// Events since the current round's bet
    log: Vec<GameEvent>,
    /// Shuffle seed, when the shoe was built from one
    seed: Option<u64>,
}

impl RoundEngine {
    /// Creates a table with a freshly shuffled shoe. Without a seed one is drawn at random.
    pub fn new(chips: u32, seed: Option<u64>) -> Result<Self, GameError> {
        let seed = seed.unwrap_or_else(rand::random);
        let mut engine = Self::with_shoe(chips, Shoe::new_with_seed(seed))?;
        engine.seed = Some(seed);
        Ok(engine)
    }

    /// Creates a table around a prepared shoe (stacked decks, replays).
    pub fn with_shoe(chips: u32, shoe: Shoe) -> Result<Self, GameError> {
        if chips == 0 {
            return Err(GameError::InvalidChipCount { chips });
        }
        Ok(Self {
            shoe,
            count: CountTracker::new(),
            player: Player::new(chips),
            dealer: Hand::new(),
            state: RoundState::Idle,
            dealer_revealed: false,
            hole_card_counted: false,
            outcome: None,
            log: Vec::new(),
            seed: None,
        })
    }

    pub fn state(&self) -> RoundState {
        self.state
    }
    pub fn chips(&self) -> u32 {
        self.player.chips()
    }
    pub fn bet(&self) -> u32 {
        self.player.bet()
    }
    pub fn insurance_bet(&self) -> u32 {
        self.player.insurance_bet()
    }
    pub fn doubled_down(&self) -> bool {
        self.player.doubled_down()
    }
    pub fn last_bet(&self) -> u32 {
        self.player.last_bet()
    }
    pub fn running_count(&self) -> i32 {
        self.count.running()
    }
    pub fn player_hand(&self) -> &Hand {
        self.player.hand()
    }
    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }
    pub fn dealer_revealed(&self) -> bool {
        self.dealer_revealed
    }
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
    pub fn events(&self) -> &[GameEvent] {
        &self.log
    }
    pub fn cards_remaining(&self) -> usize {
        self.shoe.remaining()
    }
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
    pub fn round_in_progress(&self) -> bool {
        matches!(self.state, RoundState::PlayerTurn | RoundState::DealerTurn)
    }

    /// Abandons any round in progress and starts a new session with `chips`.
    /// The shoe is reshuffled and the running count restarts at zero.
    pub fn new_game(&mut self, chips: u32) -> Result<(), GameError> {
        if chips == 0 {
            return Err(GameError::InvalidChipCount { chips });
        }
        self.shoe.reset();
        self.count.reset();
        self.player.reset(chips);
        self.dealer.clear();
        self.dealer_revealed = false;
        self.hole_card_counted = false;
        self.outcome = None;
        self.log.clear();
        self.state = RoundState::Idle;
        info!(chips, "new game started");
        Ok(())
    }

    pub fn place_bet(&mut self, amount: u32) -> Result<Vec<GameEvent>, GameError> {
        self.require(&[RoundState::Idle, RoundState::Resolved], "place a bet")?;
        rules::validate_bet(amount, self.player.chips())?;
        self.player.place_bet(amount)?;
        self.log.clear();
        self.outcome = None;
        self.state = RoundState::BetPlaced;
        info!(amount, chips = self.player.chips(), "bet placed");
        Ok(self.commit(vec![GameEvent::BetPlaced {
            amount,
            chips: self.player.chips(),
        }]))
    }

    /// Deals player, player, dealer up-card, dealer hole card.
    /// Only the first three are counted.
    pub fn deal_initial_cards(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.require(&[RoundState::BetPlaced], "deal")?;
        let mut events = Vec::new();
        self.player.clear_round();
        self.dealer.clear();
        self.dealer_revealed = false;
        self.hole_card_counted = false;
        self.outcome = None;

        let mut dealt: Vec<Card> = Vec::with_capacity(4);
        for _ in 0..4 {
            match self.draw(&mut events) {
                Some(card) => dealt.push(card),
                None => {
                    warn!(bet = self.player.bet(), "initial deal failed; refunding bet");
                    self.player.refund_bet();
                    self.state = RoundState::Idle;
                    events.push(GameEvent::ShoeExhausted);
                    self.commit(events);
                    return Err(GameError::ShoeExhausted);
                }
            }
        }
        let (p1, p2, up, hole) = (dealt[0], dealt[1], dealt[2], dealt[3]);
        for card in [p1, p2] {
            self.player.hand_mut().add_card(card);
            self.count.update(card);
        }
        self.dealer.add_card(up);
        self.count.update(up);
        // hole card stays out of the count until revealed
        self.dealer.add_card(hole);
        self.state = RoundState::PlayerTurn;

        let player_total = self.player.hand().value();
        debug!(
            player = %format_cards(self.player.hand().cards()),
            dealer_up = %up,
            running_count = self.count.running(),
            "initial deal"
        );
        events.push(GameEvent::InitialDeal {
            player: [p1, p2],
            dealer_up: up,
            player_total,
        });
        Ok(self.commit(events))
    }

    /// Places a bet and deals in one step.
    pub fn start_round(&mut self, amount: u32) -> Result<Vec<GameEvent>, GameError> {
        let mut events = self.place_bet(amount)?;
        events.extend(self.deal_initial_cards()?);
        Ok(events)
    }

    /// Repeats the previous opening bet.
    pub fn rebet(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.require(&[RoundState::Idle, RoundState::Resolved], "place a bet")?;
        let last = self.player.last_bet();
        if last == 0 {
            return Err(GameError::InvalidBet {
                reason: "no previous bet to repeat".to_string(),
            });
        }
        self.start_round(last)
    }

    pub fn apply(&mut self, action: PlayerAction) -> Result<Vec<GameEvent>, GameError> {
        match action {
            PlayerAction::Hit => self.hit(),
            PlayerAction::Stand => self.stand(),
            PlayerAction::DoubleDown => self.double_down(),
            PlayerAction::Insurance => self.take_insurance(),
        }
    }

    /// Draws one card for the player; a bust settles the round immediately.
    pub fn hit(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.require(&[RoundState::PlayerTurn], "hit")?;
        let mut events = Vec::new();
        let Some(card) = self.draw(&mut events) else {
            events.push(GameEvent::ShoeExhausted);
            return Ok(self.commit(events));
        };
        self.player.hand_mut().add_card(card);
        self.count.update(card);
        let total = self.player.hand().value();
        debug!(%card, total, "player hits");
        events.push(GameEvent::PlayerHit { card, total });

        if total > BLACKJACK {
            self.reveal_hole_card(&mut events);
            self.resolve(&mut events);
        }
        Ok(self.commit(events))
    }

    /// Doubles the wager, draws exactly one card, then stands.
    pub fn double_down(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.require(&[RoundState::PlayerTurn], "double down")?;
        if self.player.doubled_down() {
            return Err(self.invalid("double down twice"));
        }
        if self.player.hand().len() != 2 {
            return Err(self.invalid("double down after hitting"));
        }
        self.player.double_bet()?;
        info!(
            bet = self.player.bet(),
            chips = self.player.chips(),
            "player doubles down"
        );

        let mut events = Vec::new();
        match self.draw(&mut events) {
            Some(card) => {
                self.player.hand_mut().add_card(card);
                self.count.update(card);
                events.push(GameEvent::DoubledDown {
                    bet: self.player.bet(),
                    card,
                    total: self.player.hand().value(),
                });
            }
            None => events.push(GameEvent::ShoeExhausted),
        }
        self.play_out_dealer(&mut events);
        Ok(self.commit(events))
    }

    /// Side bet of half the wager against a dealer blackjack, offered on an ace up-card.
    pub fn take_insurance(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.require(&[RoundState::PlayerTurn], "take insurance")?;
        if self.dealer.first().map(|c| c.rank) != Some(Rank::Ace) {
            return Err(self.invalid("take insurance without a dealer ace"));
        }
        if self.player.insurance_bet() > 0 {
            return Err(self.invalid("take insurance twice"));
        }
        if self.player.hand().len() != 2 {
            return Err(self.invalid("take insurance after hitting"));
        }
        let stake = rules::insurance_stake(self.player.bet());
        if stake == 0 {
            return Err(GameError::InvalidBet {
                reason: "insurance stake rounds down to zero".to_string(),
            });
        }
        self.player.place_insurance(stake)?;
        info!(stake, chips = self.player.chips(), "insurance taken");
        Ok(self.commit(vec![GameEvent::InsuranceTaken { amount: stake }]))
    }

    /// Ends the player's turn: reveals the hole card, plays the dealer out, settles.
    pub fn stand(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.require(&[RoundState::PlayerTurn], "stand")?;
        let mut events = Vec::new();
        self.play_out_dealer(&mut events);
        Ok(self.commit(events))
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            state: self.state,
            chips: self.player.chips(),
            bet: self.player.bet(),
            insurance_bet: self.player.insurance_bet(),
            doubled_down: self.player.doubled_down(),
            last_bet: self.player.last_bet(),
            running_count: self.count.running(),
            cards_remaining: self.shoe.remaining(),
            player_hand: self.player.hand().cards().to_vec(),
            player_total: self.player.hand().value(),
            dealer_hand: self.dealer.cards().to_vec(),
            dealer_up_card: self.dealer.first(),
            dealer_total: self.dealer_revealed.then(|| self.dealer.value()),
            dealer_revealed: self.dealer_revealed,
            outcome: self.outcome,
            log: self.log.clone(),
        }
    }

    pub fn legal_actions(&self) -> Vec<PlayerAction> {
        rules::legal_actions(&self.snapshot())
    }

    /// History entry for the settled round; `None` until the round is resolved.
    pub fn round_record(&self, round_id: String) -> Option<RoundRecord> {
        let outcome = self.outcome?;
        if self.state != RoundState::Resolved {
            return None;
        }
        Some(RoundRecord {
            round_id,
            seed: self.seed,
            bet: self.player.bet(),
            insurance_bet: self.player.insurance_bet(),
            doubled_down: self.player.doubled_down(),
            player_hand: self.player.hand().cards().to_vec(),
            dealer_hand: self.dealer.cards().to_vec(),
            player_total: self.player.hand().value(),
            dealer_total: self.dealer.value(),
            outcome,
            payout: outcome.payout(self.player.bet()),
            chips_after: self.player.chips(),
            running_count: self.count.running(),
            ts: None,
            events: self.log.clone(),
        })
    }

    fn play_out_dealer(&mut self, events: &mut Vec<GameEvent>) {
        self.reveal_hole_card(events);

        if self.dealer.is_blackjack() {
            events.push(GameEvent::DealerBlackjack);
            let insurance = self.player.insurance_bet();
            if insurance > 0 {
                let payout = insurance.saturating_mul(2);
                self.player.add_chips(payout);
                events.push(GameEvent::InsurancePaid { payout });
            }
            let outcome = if self.player.hand().value() == BLACKJACK {
                Outcome::BlackjackPush
            } else {
                Outcome::DealerBlackjack
            };
            self.settle(outcome, events);
            return;
        }

        let insurance = self.player.insurance_bet();
        if insurance > 0 {
            events.push(GameEvent::InsuranceLost { amount: insurance });
        }

        self.state = RoundState::DealerTurn;
        events.push(GameEvent::DealerTurnStarted);
        while rules::dealer_should_draw(&self.dealer) {
            match self.draw(events) {
                Some(card) => {
                    self.dealer.add_card(card);
                    self.count.update(card);
                    let total = self.dealer.value();
                    debug!(%card, total, "dealer draws");
                    events.push(GameEvent::DealerDraw { card, total });
                }
                None => {
                    warn!(
                        dealer_total = self.dealer.value(),
                        "shoe exhausted during dealer turn"
                    );
                    events.push(GameEvent::ShoeExhausted);
                    break;
                }
            }
        }
        events.push(GameEvent::DealerStands {
            total: self.dealer.value(),
        });
        self.resolve(events);
    }

    fn reveal_hole_card(&mut self, events: &mut Vec<GameEvent>) {
        if !self.hole_card_counted {
            if let Some(&hole) = self.dealer.cards().get(1) {
                self.count.update(hole);
                self.hole_card_counted = true;
                debug!(card = %hole, running_count = self.count.running(), "hole card revealed");
                events.push(GameEvent::HoleCardRevealed {
                    card: hole,
                    dealer_total: self.dealer.value(),
                });
            }
        }
        self.dealer_revealed = true;
    }

    fn resolve(&mut self, events: &mut Vec<GameEvent>) {
        let player = self.player.hand().value();
        let dealer = self.dealer.value();
        let outcome = if player > BLACKJACK {
            Outcome::PlayerBust
        } else if dealer > BLACKJACK {
            Outcome::DealerBust
        } else if player == dealer {
            Outcome::Push
        } else if player > dealer {
            Outcome::PlayerWins
        } else {
            Outcome::DealerWins
        };
        self.settle(outcome, events);
    }

    fn settle(&mut self, outcome: Outcome, events: &mut Vec<GameEvent>) {
        let payout = outcome.payout(self.player.bet());
        self.player.add_chips(payout);
        self.outcome = Some(outcome);
        self.state = RoundState::Resolved;

        let player_total = self.player.hand().value();
        let dealer_total = self.dealer.value();
        info!(
            outcome = %outcome,
            player_total,
            dealer_total,
            payout,
            chips = self.player.chips(),
            running_count = self.count.running(),
            "round resolved"
        );
        events.push(GameEvent::RoundResolved {
            outcome,
            player_total,
            dealer_total,
            payout,
            chips: self.player.chips(),
        });
    }

    /// Draws from the shoe, reshuffling an empty shoe first.
    /// A reshuffle invalidates the count, so it restarts at zero.
    fn draw(&mut self, events: &mut Vec<GameEvent>) -> Option<Card> {
        if self.shoe.is_empty() {
            self.shoe.reset();
            self.count.reset();
            warn!(
                remaining = self.shoe.remaining(),
                "shoe exhausted; reshuffled and reset running count"
            );
            events.push(GameEvent::Reshuffled);
        }
        self.shoe.draw()
    }

    fn require(&self, allowed: &[RoundState], action: &'static str) -> Result<(), GameError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> GameError {
        GameError::InvalidAction {
            action,
            state: self.state,
        }
    }

    fn commit(&mut self, events: Vec<GameEvent>) -> Vec<GameEvent> {
        self.log.extend(events.iter().cloned());
        events
    }
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
