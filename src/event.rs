//! Notifications raised towards the presentation layer.

use crate::card::Card;
use crate::slot::{Location, SlotId};
use crate::table::CardMove;

/// Something the presentation layer may want to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A card changed location.
    CardMoved(CardMove),
    /// The remaining reshuffle count changed.
    ShufflesChanged(u8),
    /// Every row is complete.
    GameWon,
}

/// Receives [`GameEvent`]s from a [`Game`](crate::Game).
///
/// Callbacks run after the game has released its internal locks, so an
/// observer may query the game it is attached to.
pub trait GameObserver {
    /// A card moved from `from` to `to`.
    fn on_card_moved(&mut self, card: Card, from: Location, to: Location) {
        let _ = (card, from, to);
    }

    /// The game was won.
    fn on_game_won(&mut self) {}

    /// The remaining reshuffle count is now `remaining`.
    fn on_shuffles_changed(&mut self, remaining: u8) {
        let _ = remaining;
    }

    /// Dispatches an event to the matching callback.
    fn notify(&mut self, event: GameEvent) {
        match event {
            GameEvent::CardMoved(CardMove { card, from, to }) => self.on_card_moved(card, from, to),
            GameEvent::ShufflesChanged(remaining) => self.on_shuffles_changed(remaining),
            GameEvent::GameWon => self.on_game_won(),
        }
    }
}

/// Result of a successful slot activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// The card that moved.
    pub card: Card,
    /// Slot it left.
    pub from: SlotId,
    /// Slot it entered.
    pub to: SlotId,
    /// Whether the move completed the game.
    pub won: bool,
}
