//! The card registry.

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::slot::Location;

/// Per-card state tracked alongside the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardState {
    card: Card,
    location: Location,
    face_up: bool,
    marked: bool,
}

impl CardState {
    const fn new(card: Card) -> Self {
        Self {
            card,
            location: Location::Stock,
            face_up: false,
            marked: false,
        }
    }

    /// The card this state belongs to.
    #[must_use]
    pub const fn card(&self) -> Card {
        self.card
    }

    /// Where the card currently sits.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    pub(crate) const fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Returns whether the card is face up.
    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Turns the card face up.
    pub const fn flip_up(&mut self) {
        self.face_up = true;
    }

    /// Turns the card face down.
    pub const fn flip_down(&mut self) {
        self.face_up = false;
    }

    /// Returns whether the card is highlighted as part of a finished row prefix.
    #[must_use]
    pub const fn is_marked(&self) -> bool {
        self.marked
    }

    /// Highlights the card.
    pub const fn mark(&mut self) {
        self.marked = true;
    }

    /// Clears the highlight.
    pub const fn unmark(&mut self) {
        self.marked = false;
    }
}

/// One [`CardState`] for each of the 52 identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSet {
    states: [CardState; DECK_SIZE],
}

impl CardSet {
    /// Creates the full set, suit-major, every card face down in the stock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: core::array::from_fn(|index| {
                let suit = Suit::ALL[index / Rank::ALL.len()];
                let rank = Rank::ALL[index % Rank::ALL.len()];
                CardState::new(Card::new(suit, rank))
            }),
        }
    }

    /// State of `card`.
    #[must_use]
    pub fn lookup(&self, card: Card) -> &CardState {
        &self.states[card.index()]
    }

    /// Mutable state of `card`.
    pub fn lookup_mut(&mut self, card: Card) -> &mut CardState {
        &mut self.states[card.index()]
    }

    /// State of the card with the given suit and rank.
    #[must_use]
    pub fn get(&self, suit: Suit, rank: Rank) -> &CardState {
        self.lookup(Card::new(suit, rank))
    }

    /// All card identities in suit-major order.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.states.iter().map(CardState::card)
    }

    /// All card states in suit-major order.
    pub fn iter(&self) -> impl Iterator<Item = &CardState> {
        self.states.iter()
    }

    /// Number of marked cards.
    #[must_use]
    pub fn marked_count(&self) -> usize {
        self.states.iter().filter(|state| state.is_marked()).count()
    }
}

impl Default for CardSet {
    fn default() -> Self {
        Self::new()
    }
}
