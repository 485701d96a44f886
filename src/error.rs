use thiserror::Error;

/// Errors surfaced by the rules engine.
///
/// Parse errors come from malformed external text. Everything else is a
/// precondition violation: callers are expected to gate actions through
/// `Table::available_options`, but the engine still rejects an illegal
/// call before mutating any state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid card rank: {0:?}")]
    InvalidRank(String),
    #[error("invalid card suit: {0:?}")]
    InvalidSuit(String),
    #[error("no hand at index {0}")]
    NoSuchHand(usize),
    #[error("no card at index {index} in a hand of {len}")]
    NoSuchCard { index: usize, len: usize },
    #[error("hand is already finished")]
    HandFinished,
    #[error("bankroll too low: have {available}, need {required}")]
    InsufficientBankroll { available: u32, required: u32 },
    #[error("double down is not allowed on this hand")]
    DoubleNotAllowed,
    #[error("split is not allowed on this hand")]
    SplitNotAllowed,
    #[error("dealer already holds a face-down card")]
    HoleCardOccupied,
    #[error("player hands are still open")]
    RoundStillOpen,
}
