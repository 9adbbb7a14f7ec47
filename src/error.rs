//! Error types for game operations.

use thiserror::Error;

/// Errors raised by the table when its bookkeeping is inconsistent.
///
/// None of these can happen in normal play; seeing one means a card was
/// recorded in a slot that does not hold it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// Card is not in the slot it was expected in.
    #[error("card not found")]
    CardNotFound,
    /// Grid index outside the 4x13 layout.
    #[error("slot out of range")]
    SlotOutOfRange,
}

/// Reasons a slot activation did not move a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Invalid game state for moving cards.
    #[error("invalid game state for moving cards")]
    InvalidState,
    /// Grid index outside the 4x13 layout.
    #[error("slot out of range")]
    SlotOutOfRange,
    /// The empty slot has an empty left neighbor.
    #[error("left neighbor is empty")]
    LeftNeighborEmpty,
    /// The left neighbor ends the run; its successor is not on the board.
    #[error("row is capped")]
    RowCapped,
    /// No card qualifies for the slot.
    #[error("no card can move here")]
    NoCandidate,
    /// Card belongs to a finished row prefix.
    #[error("card is frozen")]
    Frozen,
    /// The slot after the predecessor is occupied or missing.
    #[error("target slot is blocked")]
    Blocked,
    /// Table bookkeeping failure.
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Errors that can occur when reshuffling the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShuffleError {
    /// Invalid game state for reshuffling.
    #[error("invalid game state for reshuffling")]
    InvalidState,
    /// All reshuffles for this game have been used.
    #[error("no shuffles left")]
    NoShufflesLeft,
    /// Table bookkeeping failure.
    #[error(transparent)]
    Table(#[from] TableError),
}
