use core::sync::atomic::Ordering;

use alloc::vec::Vec;

use crate::error::{ShuffleError, TableError};
use crate::event::GameEvent;

use super::{Game, GamePhase};

impl Game {
    /// Collects every card into the stock, shuffles it and queues a fresh
    /// deal. The reshuffle allowance is reset.
    ///
    /// Allowed in any phase; a deal still in progress is abandoned. Drive the
    /// queued steps with [`Game::step`], [`Game::run_dealing`] or
    /// [`Game::finish_dealing`].
    ///
    /// # Errors
    ///
    /// Returns an error if the table bookkeeping is inconsistent.
    pub fn start_new_game(&self) -> Result<(), TableError> {
        let mut events: Vec<GameEvent> = {
            let mut phase = self.phase.lock();
            let moves = {
                let mut table = self.table.lock();
                let moves = table.reset_to_stock()?;
                table.shuffle_stock(&mut *self.rng.lock());
                moves
            };

            self.shuffles_left.store(self.options.shuffles, Ordering::SeqCst);
            tracing::debug!(shuffles = self.options.shuffles, "new game");
            Self::transition(&mut phase, GamePhase::Dealing);
            self.queue_deal();
            moves.into_iter().map(GameEvent::CardMoved).collect()
        };

        events.push(GameEvent::ShufflesChanged(self.options.shuffles));
        self.emit(events);
        Ok(())
    }

    /// Returns every unmarked board card to the stock, shuffles it and
    /// queues a redeal. Marked cards stay where they are.
    ///
    /// Returns the number of reshuffles left afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not being played or no reshuffles
    /// are left. A rejected request changes nothing.
    pub fn request_shuffle(&self) -> Result<u8, ShuffleError> {
        let (mut events, left) = {
            let mut phase = self.phase.lock();
            if *phase != GamePhase::Playing {
                return Err(ShuffleError::InvalidState);
            }
            let left = self
                .shuffles_left()
                .checked_sub(1)
                .ok_or(ShuffleError::NoShufflesLeft)?;

            let moves = {
                let mut table = self.table.lock();
                let moves = table.collect_where(|state| !state.is_marked())?;
                table.shuffle_stock(&mut *self.rng.lock());
                moves
            };
            self.shuffles_left.store(left, Ordering::SeqCst);

            tracing::debug!(left, collected = moves.len(), "reshuffle");
            Self::transition(&mut phase, GamePhase::Dealing);
            self.queue_deal();
            let events: Vec<GameEvent> = moves.into_iter().map(GameEvent::CardMoved).collect();
            (events, left)
        };

        events.push(GameEvent::ShufflesChanged(left));
        self.emit(events);
        Ok(left)
    }
}
