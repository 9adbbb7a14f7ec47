use alloc::vec;

use crate::board::Board;
use crate::card::{Card, Rank, Suit};
use crate::error::{MoveError, TableError};
use crate::event::{GameEvent, Move};
use crate::slot::{Location, SlotId};
use crate::table::Table;

use super::{Game, GamePhase, win};

impl Game {
    /// Activates a board slot, moving a card if the rules allow it.
    ///
    /// An empty slot pulls in the successor of its left neighbor, or any
    /// `Two` not yet heading a row when the slot is itself a row head. An
    /// occupied slot pushes its card: a `Two` to the first empty row head,
    /// anything else to the slot right of its predecessor.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not being played or the move is not
    /// allowed. A rejected activation changes nothing.
    pub fn activate_slot(&self, id: SlotId) -> Result<Move, MoveError> {
        let (card_move, won) = {
            let mut phase = self.phase.lock();
            if *phase != GamePhase::Playing {
                return Err(MoveError::InvalidState);
            }

            let mut table = self.table.lock();
            let (card, to) = Self::resolve_move(&table, id)?;
            let card_move = table.place(card, Location::Grid(to))?;
            let won = win::mark_runs(&mut table);
            if won {
                tracing::info!("game won");
                Self::transition(&mut phase, GamePhase::Won);
            }
            (card_move, won)
        };

        let from = card_move.from.slot().ok_or(TableError::CardNotFound)?;
        let to = card_move.to.slot().ok_or(TableError::CardNotFound)?;
        tracing::debug!(card = %card_move.card, %from, %to, "card moved");

        let mut events = vec![GameEvent::CardMoved(card_move)];
        if won {
            events.push(GameEvent::GameWon);
        }
        self.emit(events);

        Ok(Move {
            card: card_move.card,
            from,
            to,
            won,
        })
    }

    /// Works out which card an activation of `id` moves, and where to.
    fn resolve_move(table: &Table, id: SlotId) -> Result<(Card, SlotId), MoveError> {
        let board = table.board();

        let Some(card) = board.card_at(id) else {
            return match board.left_neighbor(id) {
                Some(left) => Self::pull_successor(table, left).map(|card| (card, id)),
                None => Self::pull_row_head(table).map(|card| (card, id)),
            };
        };

        if table.cards().lookup(card).is_marked() {
            return Err(MoveError::Frozen);
        }

        if card.rank == Rank::LOWEST {
            return Board::row_heads()
                .find(|&head| board.slot(head).is_empty())
                .map(|head| (card, head))
                .ok_or(MoveError::NoCandidate);
        }

        let predecessor = card.predecessor().ok_or(MoveError::NoCandidate)?;
        let target = table
            .location_of(predecessor)
            .slot()
            .and_then(|at| board.right_neighbor(at))
            .ok_or(MoveError::Blocked)?;
        if board.slot(target).is_empty() {
            Ok((card, target))
        } else {
            Err(MoveError::Blocked)
        }
    }

    /// The card following the one in `left`, if it can leave its slot.
    fn pull_successor(table: &Table, left: SlotId) -> Result<Card, MoveError> {
        let left_card = table.card_at(left).ok_or(MoveError::LeftNeighborEmpty)?;
        let successor = left_card.successor().ok_or(MoveError::RowCapped)?;
        // Aces live in the stock after the sweep, so a king caps its row.
        match table.location_of(successor) {
            Location::Grid(_) => Ok(successor),
            Location::Stock => Err(MoveError::RowCapped),
        }
    }

    /// The first `Two`, in suit order, that is on the board but not heading
    /// a row.
    fn pull_row_head(table: &Table) -> Result<Card, MoveError> {
        Suit::ALL
            .iter()
            .map(|&suit| Card::new(suit, Rank::LOWEST))
            .find(|&card| {
                table
                    .location_of(card)
                    .slot()
                    .is_some_and(|at| !at.is_row_head())
            })
            .ok_or(MoveError::NoCandidate)
    }
}
