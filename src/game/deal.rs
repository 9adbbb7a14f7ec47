use core::time::Duration;

use alloc::vec::Vec;

use crate::board::Board;
use crate::card::Rank;
use crate::error::TableError;
use crate::event::GameEvent;
use crate::slot::Location;
use crate::table::{CardMove, Table};

use super::state::{DealEvent, DealStep, GamePhase};
use super::{Game, win};

impl Game {
    /// Replaces any pending steps with a fresh deal sequence.
    pub(super) fn queue_deal(&self) {
        let mut pending = self.pending.lock();
        pending.clear();
        pending.push_back(DealStep::DealCard);
    }

    /// Returns the number of queued deal steps.
    pub fn pending_steps(&self) -> usize {
        self.pending.lock().len()
    }

    /// Runs the oldest queued deal step.
    ///
    /// Each step queues its successor, so the sequence deals stock cards into
    /// empty slots in row-major order, then sweeps aces back to the stock one
    /// at a time, then settles into [`GamePhase::Playing`] (or
    /// [`GamePhase::Won`]). Slots freed by the sweep stay empty.
    ///
    /// Returns `None` when nothing is queued.
    ///
    /// # Errors
    ///
    /// Returns an error if the table bookkeeping is inconsistent.
    pub fn step(&self) -> Result<Option<DealEvent>, TableError> {
        let mut events = Vec::new();
        let event = {
            let mut phase = self.phase.lock();
            let Some(step) = self.pending.lock().pop_front() else {
                return Ok(None);
            };

            let (event, next) = {
                let mut table = self.table.lock();
                let dealt = match step {
                    DealStep::DealCard => Self::deal_next(&mut table)?,
                    DealStep::DiscardAce => None,
                };

                if let Some(card_move) = dealt {
                    events.push(GameEvent::CardMoved(card_move));
                    (DealEvent::Dealt(card_move), Some(DealStep::DealCard))
                } else if let Some(card_move) = Self::discard_next(&mut table)? {
                    events.push(GameEvent::CardMoved(card_move));
                    (DealEvent::Discarded(card_move), Some(DealStep::DiscardAce))
                } else if win::mark_runs(&mut table) {
                    (DealEvent::Settled(GamePhase::Won), None)
                } else {
                    (DealEvent::Settled(GamePhase::Playing), None)
                }
            };

            if let DealEvent::Settled(settled) = event {
                if settled == GamePhase::Won {
                    tracing::info!("game won on the deal");
                    events.push(GameEvent::GameWon);
                }
                Self::transition(&mut phase, settled);
            }
            if let Some(next) = next {
                self.pending.lock().push_back(next);
            }
            tracing::trace!(?step, ?event, "deal step");
            event
        };

        self.emit(events);
        Ok(Some(event))
    }

    /// Deals the top stock card into the first empty slot, if both exist.
    fn deal_next(table: &mut Table) -> Result<Option<CardMove>, TableError> {
        match table.board().first_empty() {
            Some(id) => table.deal_to(id),
            None => Ok(None),
        }
    }

    /// Returns the first ace found on the board to the stock.
    fn discard_next(table: &mut Table) -> Result<Option<CardMove>, TableError> {
        let ace = Board::ids()
            .filter_map(|id| table.card_at(id))
            .find(|card| card.rank == Rank::TERMINAL);
        ace.map(|card| table.place(card, Location::Stock)).transpose()
    }

    /// Runs every queued step without pausing and returns the final phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the table bookkeeping is inconsistent.
    pub fn finish_dealing(&self) -> Result<GamePhase, TableError> {
        self.run_dealing(|_| {})
    }

    /// Runs every queued step, calling `wait` with the configured
    /// [`step_delay`](crate::GameOptions::step_delay) before each one.
    ///
    /// A front end passes `std::thread::sleep` or an animation hook so each
    /// dealt or discarded card becomes visible in turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the table bookkeeping is inconsistent.
    pub fn run_dealing<W>(&self, mut wait: W) -> Result<GamePhase, TableError>
    where
        W: FnMut(Duration),
    {
        while self.pending_steps() > 0 {
            wait(self.options.step_delay);
            self.step()?;
        }
        Ok(self.phase())
    }
}
