//! Game phase and deal sequencing types.

use crate::table::CardMove;

/// Game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// No game dealt yet; every card is in the stock.
    Idle,
    /// Deal steps are pending; activations and reshuffles are rejected.
    Dealing,
    /// Waiting for slot activations.
    Playing,
    /// Every row is complete; the board is frozen until a new game.
    Won,
}

/// A queued unit of dealing work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DealStep {
    /// Move the top stock card into the first empty slot.
    DealCard,
    /// Return the first ace found on the board to the stock.
    DiscardAce,
}

/// What a single deal step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealEvent {
    /// A stock card was dealt onto the board.
    Dealt(CardMove),
    /// An ace was swept back into the stock.
    Discarded(CardMove),
    /// Dealing finished; the game entered this phase.
    Settled(GamePhase),
}
