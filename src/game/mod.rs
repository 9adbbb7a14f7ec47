//! Game engine and state management.

use core::sync::atomic::{AtomicU8, Ordering};

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::sync::Mutex;

use crate::board::SLOT_COUNT;
use crate::card::Card;
use crate::event::{GameEvent, GameObserver};
use crate::options::GameOptions;
use crate::slot::{Location, SlotId};
use crate::table::Table;

mod deal;
mod moves;
mod round;
pub mod state;
mod win;

use state::DealStep;
pub use state::{DealEvent, GamePhase};

/// A Montana engine that owns the layout and enforces the rules.
///
/// The game owns the stock, the board and the card registry. Use
/// [`GameOptions`] to configure the reshuffle allowance and deal pacing.
pub struct Game {
    /// Stock, board and card registry.
    pub table: Mutex<Table>,
    /// Game options.
    pub options: GameOptions,
    /// Current game phase.
    pub phase: Mutex<GamePhase>,
    /// Reshuffles left in the current game.
    shuffles_left: AtomicU8,
    /// Deal steps waiting to run, oldest first.
    pending: Mutex<VecDeque<DealStep>>,
    /// Random number generator.
    rng: Mutex<ChaCha8Rng>,
    /// Receiver of outgoing notifications.
    observer: Mutex<Option<Box<dyn GameObserver + Send>>>,
}

impl Game {
    /// Creates a new game with the given seed.
    ///
    /// Nothing is dealt until [`Game::start_new_game`] is called.
    ///
    /// # Example
    ///
    /// ```
    /// use montana::{Game, GameOptions, GamePhase};
    ///
    /// let game = Game::new(GameOptions::default(), 7);
    /// assert_eq!(game.phase(), GamePhase::Idle);
    /// assert_eq!(game.stock_len(), 52);
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        let shuffles = options.shuffles;
        Self {
            table: Mutex::new(Table::new()),
            options,
            phase: Mutex::new(GamePhase::Idle),
            shuffles_left: AtomicU8::new(shuffles),
            pending: Mutex::new(VecDeque::new()),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            observer: Mutex::new(None),
        }
    }

    /// Installs the observer that receives [`GameEvent`]s.
    pub fn set_observer<O>(&self, observer: O)
    where
        O: GameObserver + Send + 'static,
    {
        *self.observer.lock() = Some(Box::new(observer));
    }

    /// Removes the observer.
    pub fn clear_observer(&self) {
        *self.observer.lock() = None;
    }

    /// Delivers events after all table and phase locks have been released.
    fn emit(&self, events: Vec<GameEvent>) {
        if events.is_empty() {
            return;
        }
        if let Some(observer) = self.observer.lock().as_mut() {
            for event in events {
                observer.notify(event);
            }
        }
    }

    /// Moves the phase held by `current` to `phase`.
    ///
    /// Mutating operations take the phase lock before any other lock and
    /// hold it until they are done, so they never interleave.
    fn transition(current: &mut GamePhase, phase: GamePhase) {
        if *current != phase {
            tracing::debug!(from = ?*current, to = ?phase, "phase transition");
            *current = phase;
        }
    }

    /// Returns the current game phase.
    pub fn phase(&self) -> GamePhase {
        *self.phase.lock()
    }

    /// Returns the number of reshuffles left.
    pub fn shuffles_left(&self) -> u8 {
        self.shuffles_left.load(Ordering::SeqCst)
    }

    /// Returns whether starting over would discard a game in progress.
    ///
    /// A front end should ask the player before calling
    /// [`Game::start_new_game`] when this is `true`.
    pub fn needs_confirmation(&self) -> bool {
        matches!(self.phase(), GamePhase::Dealing | GamePhase::Playing)
    }

    /// Returns the top card of a board slot.
    pub fn card_at(&self, id: SlotId) -> Option<Card> {
        self.table.lock().card_at(id)
    }

    /// Returns whether `card` is marked as part of a finished row prefix.
    pub fn is_marked(&self, card: Card) -> bool {
        self.table.lock().cards().lookup(card).is_marked()
    }

    /// Returns whether `card` is face up.
    pub fn is_face_up(&self, card: Card) -> bool {
        self.table.lock().cards().lookup(card).is_face_up()
    }

    /// Returns where `card` currently sits.
    pub fn location_of(&self, card: Card) -> Location {
        self.table.lock().location_of(card)
    }

    /// Returns the number of cards in the stock.
    pub fn stock_len(&self) -> usize {
        self.table.lock().stock().len()
    }

    /// Returns the top card of every board slot, row-major.
    pub fn board_snapshot(&self) -> [Option<Card>; SLOT_COUNT] {
        self.table.lock().board().snapshot()
    }

    /// Front-end hook for a click on grid cell `index` (row-major).
    ///
    /// Rejected activations are logged and otherwise ignored.
    pub fn on_slot_activated(&self, index: usize) {
        let result = SlotId::from_index(index)
            .ok_or(crate::error::MoveError::SlotOutOfRange)
            .and_then(|id| self.activate_slot(id));
        if let Err(err) = result {
            tracing::debug!(index, %err, "activation ignored");
        }
    }

    /// Front-end hook for the "new game" control.
    ///
    /// The caller is responsible for confirming with the player first when
    /// [`Game::needs_confirmation`] is `true`.
    pub fn on_new_game_requested(&self) {
        if let Err(err) = self.start_new_game() {
            tracing::debug!(%err, "new game failed");
        }
    }

    /// Front-end hook for the "shuffle" control.
    pub fn on_shuffle_requested(&self) {
        if let Err(err) = self.request_shuffle() {
            tracing::debug!(%err, "shuffle ignored");
        }
    }
}
