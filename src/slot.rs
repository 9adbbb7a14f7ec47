//! Slots and addressing.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::board::{COLUMNS, ROWS, SLOT_COUNT};
use crate::card::Card;
use crate::error::TableError;

/// Grid coordinate of a board slot, in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u8);

impl SlotId {
    /// Slot at `row`, `column`, or `None` outside the grid.
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Option<Self> {
        if row < ROWS && column < COLUMNS {
            Some(Self((row * COLUMNS + column) as u8))
        } else {
            None
        }
    }

    /// Slot at flat row-major `index`, or `None` outside the grid.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < SLOT_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Flat row-major index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Row of the slot.
    #[must_use]
    pub const fn row(self) -> usize {
        self.index() / COLUMNS
    }

    /// Column of the slot.
    #[must_use]
    pub const fn column(self) -> usize {
        self.index() % COLUMNS
    }

    /// Returns whether the slot heads its row.
    #[must_use]
    pub const fn is_row_head(self) -> bool {
        self.column() == 0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row(), self.column())
    }
}

/// Where a card currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// The off-board stock.
    Stock,
    /// A board slot.
    Grid(SlotId),
}

impl Location {
    /// The grid slot, if the location is on the board.
    #[must_use]
    pub const fn slot(self) -> Option<SlotId> {
        match self {
            Self::Stock => None,
            Self::Grid(id) => Some(id),
        }
    }
}

/// An ordered pile of cards. The top card is the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    cards: Vec<Card>,
}

impl Slot {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Puts a card on top.
    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Takes a specific card out of the slot.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CardNotFound`] if the slot does not hold `card`.
    pub(crate) fn remove(&mut self, card: Card) -> Result<(), TableError> {
        if self.top() == Some(card) {
            self.draw();
            return Ok(());
        }
        let index = self
            .cards
            .iter()
            .position(|&c| c == card)
            .ok_or(TableError::CardNotFound)?;
        self.cards.remove(index);
        Ok(())
    }

    /// Pops the top card.
    pub(crate) fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Shuffles the pile in place.
    pub(crate) fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Returns the top card.
    #[must_use]
    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Returns the cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns whether the slot holds `card`.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
