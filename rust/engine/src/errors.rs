use thiserror::Error;

use crate::game::RoundState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid bet: {reason}")]
    InvalidBet { reason: String },
    #[error("Insufficient chips: need {needed}, have {available}")]
    InsufficientChips { needed: u32, available: u32 },
    #[error("Cannot {action} ({state})")]
    InvalidAction {
        action: &'static str,
        state: RoundState,
    },
    #[error("Invalid chip count: {chips} (must be positive)")]
    InvalidChipCount { chips: u32 },
    #[error("Shoe could not supply the initial deal")]
    ShoeExhausted,
}

impl GameError {
    pub(crate) fn invalid_bet(reason: impl Into<String>) -> Self {
        GameError::InvalidBet {
            reason: reason.into(),
        }
    }
}
