use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// The drawable set of cards for a session: one 52-card deck, shuffled as a unit.
///
/// Cards are drawn from the end of the sequence. An empty shoe simply yields
/// `None`; deciding when to reset is left to the owner.
///
/// # Examples
///
/// ```
/// use hilo_engine::shoe::Shoe;
///
/// let mut shoe = Shoe::new_with_seed(7);
/// assert_eq!(shoe.remaining(), 52);
/// let first = shoe.draw().expect("fresh shoe has cards");
/// assert_eq!(shoe.remaining(), 51);
///
/// // Same seed, same order
/// let mut again = Shoe::new_with_seed(7);
/// assert_eq!(again.draw(), Some(first));
/// ```
#[derive(Debug)]
pub struct Shoe {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Shoe {
    /// Creates a freshly shuffled shoe.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut shoe = Self {
            cards: Vec::with_capacity(52),
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        shoe.reset();
        shoe
    }

    /// Creates a shoe whose next draws are `draw_order`, first element first.
    /// Once these run out, resets shuffle normally using `seed`.
    pub fn stacked(draw_order: Vec<Card>, seed: u64) -> Self {
        let mut cards = draw_order;
        cards.reverse();
        Self {
            cards,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Rebuilds all 52 cards and applies a uniform Fisher–Yates shuffle.
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
