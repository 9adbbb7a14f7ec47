//! The fixed 4x13 layout.

use crate::card::{Card, Rank, Suit};
use crate::slot::{Slot, SlotId};

/// Number of rows, one per suit.
pub const ROWS: usize = Suit::ALL.len();
/// Number of columns, one per rank.
pub const COLUMNS: usize = Rank::ALL.len();
/// Number of board slots.
pub const SLOT_COUNT: usize = ROWS * COLUMNS;

/// The grid of board slots.
///
/// Topology never changes after construction; neighbors are derived from a
/// slot's stored coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    slots: [Slot; SLOT_COUNT],
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| Slot::new()),
        }
    }

    /// Returns the slot with the given id.
    #[must_use]
    pub fn slot(&self, id: SlotId) -> &Slot {
        &self.slots[id.index()]
    }

    pub(crate) fn slot_mut(&mut self, id: SlotId) -> &mut Slot {
        &mut self.slots[id.index()]
    }

    /// Returns the slot at `row`, `column`.
    #[must_use]
    pub fn slot_at(&self, row: usize, column: usize) -> Option<&Slot> {
        SlotId::new(row, column).map(|id| self.slot(id))
    }

    /// Returns the top card of a slot.
    #[must_use]
    pub fn card_at(&self, id: SlotId) -> Option<Card> {
        self.slot(id).top()
    }

    /// Slot to the left in the same row, `None` for a row head.
    #[must_use]
    pub const fn left_neighbor(&self, id: SlotId) -> Option<SlotId> {
        if id.column() == 0 {
            None
        } else {
            SlotId::from_index(id.index() - 1)
        }
    }

    /// Slot to the right in the same row, `None` in the last column.
    #[must_use]
    pub const fn right_neighbor(&self, id: SlotId) -> Option<SlotId> {
        if id.column() == COLUMNS - 1 {
            None
        } else {
            SlotId::from_index(id.index() + 1)
        }
    }

    /// Row of the slot.
    #[must_use]
    pub const fn row_of(&self, id: SlotId) -> usize {
        id.row()
    }

    /// Column of the slot.
    #[must_use]
    pub const fn column_of(&self, id: SlotId) -> usize {
        id.column()
    }

    /// All slot ids in row-major order.
    pub fn ids() -> impl Iterator<Item = SlotId> {
        (0..SLOT_COUNT).filter_map(SlotId::from_index)
    }

    /// Slot ids of the row heads, top to bottom.
    pub fn row_heads() -> impl Iterator<Item = SlotId> {
        (0..ROWS).filter_map(|row| SlotId::new(row, 0))
    }

    /// First empty slot in row-major order.
    #[must_use]
    pub fn first_empty(&self) -> Option<SlotId> {
        Self::ids().find(|&id| self.slot(id).is_empty())
    }

    /// Number of empty slots.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_empty()).count()
    }

    /// Top card of every slot, row-major.
    #[must_use]
    pub fn snapshot(&self) -> [Option<Card>; SLOT_COUNT] {
        core::array::from_fn(|index| self.slots[index].top())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
