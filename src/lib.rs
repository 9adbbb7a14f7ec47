//! A Montana patience engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that deals the 4x13 layout, sweeps the
//! aces, validates slot activations, handles the limited reshuffles and
//! detects the winning arrangement. Rendering is left to the caller, which
//! drives the engine through slot activations and listens through a
//! [`GameObserver`].
//!
//! # Example
//!
//! ```
//! use montana::{Game, GameOptions, GamePhase};
//!
//! let game = Game::new(GameOptions::default(), 42);
//! game.start_new_game().unwrap();
//! let phase = game.finish_dealing().unwrap();
//! assert_ne!(phase, GamePhase::Dealing);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod board;
pub mod card;
pub mod deck;
pub mod error;
pub mod event;
pub mod game;
pub mod options;
pub mod slot;
mod sync;
pub mod table;

// Re-export main types
pub use board::{Board, COLUMNS, ROWS, SLOT_COUNT};
pub use card::{Card, Color, DECK_SIZE, Rank, Suit};
pub use deck::{CardSet, CardState};
pub use error::{MoveError, ShuffleError, TableError};
pub use event::{GameEvent, GameObserver, Move};
pub use game::{DealEvent, Game, GamePhase};
pub use options::GameOptions;
pub use slot::{Location, Slot, SlotId};
pub use table::{CardMove, Table};
