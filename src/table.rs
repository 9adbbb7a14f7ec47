//! Stock, board and card registry kept in step.

extern crate alloc;

use alloc::vec::Vec;

use rand::Rng;

use crate::board::Board;
use crate::card::{Card, DECK_SIZE};
use crate::deck::{CardSet, CardState};
use crate::error::TableError;
use crate::slot::{Location, Slot, SlotId};

/// A single card relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardMove {
    /// The card that moved.
    pub card: Card,
    /// Where it was.
    pub from: Location,
    /// Where it is now.
    pub to: Location,
}

/// Everything a card can sit in, plus the registry tracking where it is.
///
/// All relocations go through [`Table::place`], which keeps a card's recorded
/// location and slot membership in step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    stock: Slot,
    board: Board,
    cards: CardSet,
}

impl Table {
    /// Creates a table with the whole deck in the stock, suit-major.
    #[must_use]
    pub fn new() -> Self {
        let cards = CardSet::new();
        let mut stock = Slot::new();
        for card in cards.cards() {
            stock.push(card);
        }
        Self {
            stock,
            board: Board::new(),
            cards,
        }
    }

    /// The stock.
    #[must_use]
    pub const fn stock(&self) -> &Slot {
        &self.stock
    }

    /// The board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The card registry.
    #[must_use]
    pub const fn cards(&self) -> &CardSet {
        &self.cards
    }

    pub(crate) const fn cards_mut(&mut self) -> &mut CardSet {
        &mut self.cards
    }

    /// The slot behind a location.
    #[must_use]
    pub fn slot(&self, location: Location) -> &Slot {
        match location {
            Location::Stock => &self.stock,
            Location::Grid(id) => self.board.slot(id),
        }
    }

    fn slot_mut(&mut self, location: Location) -> &mut Slot {
        match location {
            Location::Stock => &mut self.stock,
            Location::Grid(id) => self.board.slot_mut(id),
        }
    }

    /// Current location of `card`.
    #[must_use]
    pub fn location_of(&self, card: Card) -> Location {
        self.cards.lookup(card).location()
    }

    /// Top card of a board slot.
    #[must_use]
    pub fn card_at(&self, id: SlotId) -> Option<Card> {
        self.board.card_at(id)
    }

    /// Moves `card` from wherever it sits onto the top of `to`.
    ///
    /// Cards landing on the board are turned face up; cards returning to the
    /// stock are turned face down and lose their highlight.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CardNotFound`] if the slot recorded for the card
    /// does not hold it.
    pub fn place(&mut self, card: Card, to: Location) -> Result<CardMove, TableError> {
        let from = self.location_of(card);
        let removed = self.slot_mut(from).remove(card);
        debug_assert!(removed.is_ok(), "{card} missing from {from:?}");
        removed?;

        self.slot_mut(to).push(card);
        let state = self.cards.lookup_mut(card);
        state.set_location(to);
        match to {
            Location::Stock => {
                state.flip_down();
                state.unmark();
            }
            Location::Grid(_) => state.flip_up(),
        }

        tracing::trace!(%card, ?from, ?to, "card placed");
        Ok(CardMove { card, from, to })
    }

    /// Moves the top stock card into `id`.
    pub(crate) fn deal_to(&mut self, id: SlotId) -> Result<Option<CardMove>, TableError> {
        match self.stock.top() {
            Some(card) => self.place(card, Location::Grid(id)).map(Some),
            None => Ok(None),
        }
    }

    /// Returns every board card to the stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the table bookkeeping is inconsistent.
    pub fn reset_to_stock(&mut self) -> Result<Vec<CardMove>, TableError> {
        self.collect_where(|_| true)
    }

    /// Returns every board card accepted by `take` to the stock, in
    /// row-major order. A rejected card also shields the cards beneath it.
    pub(crate) fn collect_where<F>(&mut self, mut take: F) -> Result<Vec<CardMove>, TableError>
    where
        F: FnMut(&CardState) -> bool,
    {
        let mut moves = Vec::new();
        for id in Board::ids() {
            while let Some(card) = self.board.card_at(id) {
                if !take(self.cards.lookup(card)) {
                    break;
                }
                moves.push(self.place(card, Location::Stock)?);
            }
        }
        Ok(moves)
    }

    /// Shuffles the stock in place.
    pub fn shuffle_stock<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.stock.shuffle(rng);
    }

    /// Checks that every card sits exactly once where the registry says.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CardNotFound`] on a missing, duplicated or
    /// misrecorded card.
    pub fn verify(&self) -> Result<(), TableError> {
        let mut seen = [false; DECK_SIZE];
        let stock = self.stock.cards().iter().map(|&card| (card, Location::Stock));
        let grid = Board::ids().flat_map(|id| {
            self.board
                .slot(id)
                .cards()
                .iter()
                .map(move |&card| (card, Location::Grid(id)))
        });

        for (card, location) in stock.chain(grid) {
            if seen[card.index()] || self.location_of(card) != location {
                return Err(TableError::CardNotFound);
            }
            seen[card.index()] = true;
        }

        if seen.iter().all(|&present| present) {
            Ok(())
        } else {
            Err(TableError::CardNotFound)
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}
