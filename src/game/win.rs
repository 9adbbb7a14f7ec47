use crate::board::{COLUMNS, ROWS};
use crate::card::Rank;
use crate::event::GameEvent;
use crate::slot::SlotId;
use crate::table::Table;

use super::{Game, GamePhase};

/// Marks every card in an unbroken run from a row head and reports whether
/// all rows run `2..K` in one suit. The last column is never inspected.
pub(super) fn mark_runs(table: &mut Table) -> bool {
    let mut won = true;

    for row in 0..ROWS {
        let mut anchor = None;
        let mut complete = true;

        for (column, &rank) in Rank::ALL.iter().enumerate().take(COLUMNS - 1) {
            let Some(card) = SlotId::new(row, column).and_then(|id| table.card_at(id)) else {
                complete = false;
                break;
            };
            let suit = *anchor.get_or_insert(card.suit);
            if card.rank != rank || card.suit != suit {
                complete = false;
                break;
            }
            table.cards_mut().lookup_mut(card).mark();
        }

        won &= complete;
    }

    won
}

impl Game {
    /// Refreshes the row highlights and returns whether the layout is won.
    ///
    /// A win while playing moves the game to [`GamePhase::Won`], after which
    /// every activation and reshuffle is rejected until a new game starts.
    pub fn check_win(&self) -> bool {
        let (won, newly_won) = {
            let mut phase = self.phase.lock();
            let won = mark_runs(&mut self.table.lock());
            let newly_won = won && *phase == GamePhase::Playing;
            if newly_won {
                tracing::info!("game won");
                Self::transition(&mut phase, GamePhase::Won);
            }
            (won, newly_won)
        };
        if newly_won {
            self.emit(alloc::vec![GameEvent::GameWon]);
        }
        won
    }
}
