use crate::cards::Card;

/// Running Hi-Lo count over the cards the player has seen.
///
/// The tracker knows nothing about visibility; the engine decides when a
/// card has been revealed and feeds it here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountTracker {
    running: i32,
}

impl CountTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, card: Card) {
        self.running += card.count_value();
    }

    pub fn reset(&mut self) {
        self.running = 0;
    }

    pub fn running(&self) -> i32 {
        self.running
    }
}
