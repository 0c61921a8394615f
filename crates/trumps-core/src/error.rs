use crate::model::card::Card;
use crate::model::seat::Seat;
use thiserror::Error;

/// Failures raised by the trick engine and the seat strategy.
///
/// None of these are recoverable mid-game: each one means the bookkeeping or a
/// strategy branch is wrong, so the game (and the run) must stop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{seat} tried to play {card}, which is not in their hand")]
    CardNotInHand { seat: Seat, card: Card },
    #[error("requested the lowest card of an empty selection")]
    EmptyCardSelection,
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn { expected: Seat, actual: Seat },
    #[error("trick already complete")]
    TrickComplete,
    #[error("no card has been led this trick")]
    NoLeadPlayed,
    #[error("a card has already been led this trick")]
    LeadAlreadyPlayed,
}
