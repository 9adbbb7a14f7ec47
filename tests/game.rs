//! Game integration tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use montana::{
    Card, DECK_SIZE, DealEvent, Game, GameEvent, GameObserver, GameOptions, GamePhase, Location,
    MoveError, Rank, SLOT_COUNT, ShuffleError, SlotId, Suit,
};

const fn card(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

fn slot(row: usize, column: usize) -> SlotId {
    SlotId::new(row, column).unwrap()
}

fn init_logging() {
    let filter = std::env::var("RUST_LOG")
        .map(tracing_subscriber::EnvFilter::new)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}

/// Builds a game in the playing phase with only `layout` on the board.
fn playing_game(options: GameOptions, layout: &[(SlotId, Card)]) -> Game {
    seeded_playing_game(options, 1, layout)
}

fn seeded_playing_game(options: GameOptions, seed: u64, layout: &[(SlotId, Card)]) -> Game {
    let game = Game::new(options, seed);
    {
        let mut table = game.table.lock();
        for &(id, card) in layout {
            table.place(card, Location::Grid(id)).unwrap();
        }
    }
    *game.phase.lock() = GamePhase::Playing;
    game
}

/// Layout with `suit` running `2..` from the head of `row`, `len` cards long.
fn run(row: usize, suit: Suit, len: usize) -> Vec<(SlotId, Card)> {
    Rank::ALL
        .iter()
        .take(len)
        .enumerate()
        .map(|(column, &rank)| (slot(row, column), card(suit, rank)))
        .collect()
}

fn dealt_game(seed: u64) -> Game {
    let game = Game::new(GameOptions::default(), seed);
    game.start_new_game().unwrap();
    game.finish_dealing().unwrap();
    game
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<GameEvent>>>);

impl GameObserver for Recorder {
    fn notify(&mut self, event: GameEvent) {
        self.0.lock().unwrap().push(event);
    }
}

#[test]
fn options_builder_sets_fields() {
    let options = GameOptions::default()
        .with_shuffles(1)
        .with_step_delay(Duration::from_millis(25));

    assert_eq!(options.shuffles, 1);
    assert_eq!(options.step_delay, Duration::from_millis(25));
    assert_eq!(GameOptions::default().shuffles, 3);
}

#[test]
fn new_game_deals_layout_and_sweeps_aces() {
    init_logging();
    let game = Game::new(GameOptions::default(), 42);
    assert_eq!(game.phase(), GamePhase::Idle);
    assert!(!game.needs_confirmation());

    game.start_new_game().unwrap();
    assert_eq!(game.phase(), GamePhase::Dealing);
    assert!(game.needs_confirmation());

    let phase = game.finish_dealing().unwrap();
    assert_eq!(phase, GamePhase::Playing);
    assert_eq!(game.shuffles_left(), 3);
    assert_eq!(game.stock_len(), 4);

    let board = game.board_snapshot();
    assert_eq!(board.iter().filter(|c| c.is_none()).count(), 4);
    assert!(board.iter().flatten().all(|c| c.rank != Rank::Ace));
    assert!(board.iter().flatten().all(|&c| game.is_face_up(c)));
    for suit in Suit::ALL {
        assert_eq!(game.location_of(card(suit, Rank::Ace)), Location::Stock);
        assert!(!game.is_face_up(card(suit, Rank::Ace)));
    }
    game.table.lock().verify().unwrap();
}

#[test]
fn deal_steps_run_in_order() {
    let game = Game::new(GameOptions::default(), 3);
    game.start_new_game().unwrap();

    let mut dealt = Vec::new();
    let mut discarded = 0;
    let mut settled = None;
    while let Some(event) = game.step().unwrap() {
        match event {
            DealEvent::Dealt(card_move) => dealt.push(card_move.to),
            DealEvent::Discarded(card_move) => {
                assert_eq!(card_move.card.rank, Rank::Ace);
                assert_eq!(card_move.to, Location::Stock);
                discarded += 1;
            }
            DealEvent::Settled(phase) => settled = Some(phase),
        }
    }

    let expected: Vec<_> = (0..SLOT_COUNT)
        .map(|index| Location::Grid(SlotId::from_index(index).unwrap()))
        .collect();
    assert_eq!(dealt, expected);
    assert_eq!(discarded, 4);
    assert_eq!(settled, Some(GamePhase::Playing));
    assert_eq!(game.pending_steps(), 0);
}

#[test]
fn paced_dealing_waits_before_each_step() {
    let delay = Duration::from_millis(40);
    let game = Game::new(GameOptions::default().with_step_delay(delay), 5);
    game.start_new_game().unwrap();

    let mut waits = Vec::new();
    let phase = game.run_dealing(|d| waits.push(d)).unwrap();

    assert_eq!(phase, GamePhase::Playing);
    // 52 deals, 4 discards, 1 settle
    assert_eq!(waits.len(), DECK_SIZE + 4 + 1);
    assert!(waits.iter().all(|&d| d == delay));
}

#[test]
fn same_seed_deals_same_layout() {
    assert_eq!(dealt_game(9).board_snapshot(), dealt_game(9).board_snapshot());
}

#[test]
fn new_game_twice_redeals_and_resets_shuffles() {
    let game = dealt_game(11);
    game.request_shuffle().unwrap();
    game.finish_dealing().unwrap();
    assert_eq!(game.shuffles_left(), 2);

    game.start_new_game().unwrap();
    game.start_new_game().unwrap();
    assert_eq!(game.shuffles_left(), 3);
    assert_eq!(game.stock_len(), DECK_SIZE);
    assert_eq!(game.pending_steps(), 1);

    game.finish_dealing().unwrap();
    assert_eq!(game.stock_len(), 4);
    game.table.lock().verify().unwrap();
}

#[test]
fn new_game_mid_deal_starts_over() {
    let game = Game::new(GameOptions::default(), 13);
    game.start_new_game().unwrap();
    for _ in 0..20 {
        assert!(matches!(game.step().unwrap(), Some(DealEvent::Dealt(_))));
    }
    assert_eq!(game.stock_len(), DECK_SIZE - 20);

    game.start_new_game().unwrap();
    assert_eq!(game.pending_steps(), 1);
    assert_eq!(game.stock_len(), DECK_SIZE);
    assert!(game.board_snapshot().iter().all(Option::is_none));
    assert_eq!(game.phase(), GamePhase::Dealing);

    assert_eq!(game.finish_dealing().unwrap(), GamePhase::Playing);
    assert_eq!(game.stock_len(), 4);
    assert_eq!(game.board_snapshot().iter().flatten().count(), SLOT_COUNT - 4);
    game.table.lock().verify().unwrap();
}

#[test]
fn dealing_rejects_moves_and_shuffles() {
    let game = Game::new(GameOptions::default(), 1);
    assert_eq!(
        game.activate_slot(slot(0, 0)).unwrap_err(),
        MoveError::InvalidState
    );

    game.start_new_game().unwrap();
    game.step().unwrap();
    assert_eq!(
        game.activate_slot(slot(0, 1)).unwrap_err(),
        MoveError::InvalidState
    );
    assert_eq!(game.request_shuffle().unwrap_err(), ShuffleError::InvalidState);
    assert_eq!(game.shuffles_left(), 3);
}

#[test]
fn empty_row_head_takes_first_loose_two() {
    let game = playing_game(
        GameOptions::default(),
        &[
            (slot(2, 3), card(Suit::Hearts, Rank::Two)),
            (slot(1, 4), card(Suit::Spades, Rank::Two)),
        ],
    );

    let mv = game.activate_slot(slot(0, 0)).unwrap();
    assert_eq!(mv.card, card(Suit::Spades, Rank::Two));
    assert_eq!(mv.from, slot(1, 4));
    assert_eq!(mv.to, slot(0, 0));
    assert!(!mv.won);

    // Spades now heads a row, so hearts is next in line.
    let mv = game.activate_slot(slot(3, 0)).unwrap();
    assert_eq!(mv.card, card(Suit::Hearts, Rank::Two));
}

#[test]
fn empty_row_head_without_loose_two_is_ignored() {
    let game = playing_game(
        GameOptions::default(),
        &[(slot(1, 0), card(Suit::Spades, Rank::Two))],
    );
    assert_eq!(
        game.activate_slot(slot(0, 0)).unwrap_err(),
        MoveError::NoCandidate
    );
}

#[test]
fn empty_slot_pulls_successor_of_left_card() {
    let game = playing_game(
        GameOptions::default(),
        &[
            (slot(1, 5), card(Suit::Clubs, Rank::Eight)),
            (slot(3, 9), card(Suit::Clubs, Rank::Nine)),
        ],
    );

    let mv = game.activate_slot(slot(1, 6)).unwrap();
    assert_eq!(mv.card, card(Suit::Clubs, Rank::Nine));
    assert_eq!(mv.from, slot(3, 9));
    assert_eq!(game.card_at(slot(1, 6)), Some(card(Suit::Clubs, Rank::Nine)));
    assert_eq!(game.card_at(slot(3, 9)), None);
}

#[test]
fn empty_slot_after_empty_neighbor_is_ignored() {
    let game = playing_game(GameOptions::default(), &[]);
    assert_eq!(
        game.activate_slot(slot(2, 4)).unwrap_err(),
        MoveError::LeftNeighborEmpty
    );
}

#[test]
fn king_or_ace_caps_the_row() {
    let game = playing_game(
        GameOptions::default(),
        &[
            (slot(0, 3), card(Suit::Diamonds, Rank::King)),
            (slot(2, 7), card(Suit::Spades, Rank::Ace)),
        ],
    );
    let before = game.board_snapshot();

    assert_eq!(
        game.activate_slot(slot(0, 4)).unwrap_err(),
        MoveError::RowCapped
    );
    assert_eq!(
        game.activate_slot(slot(2, 8)).unwrap_err(),
        MoveError::RowCapped
    );
    assert_eq!(game.board_snapshot(), before);
    assert_eq!(game.phase(), GamePhase::Playing);
}

#[test]
fn two_moves_to_first_empty_row_head() {
    let game = playing_game(
        GameOptions::default(),
        &[
            (slot(0, 0), card(Suit::Clubs, Rank::Two)),
            (slot(2, 6), card(Suit::Hearts, Rank::Two)),
        ],
    );

    let mv = game.activate_slot(slot(2, 6)).unwrap();
    assert_eq!(mv.to, slot(1, 0));
}

#[test]
fn two_with_no_empty_row_head_is_ignored() {
    let layout: Vec<_> = (0..4)
        .map(|row| (slot(row, 0), card(Suit::ALL[row], Rank::Three)))
        .chain([(slot(1, 8), card(Suit::Diamonds, Rank::Two))])
        .collect();
    let game = playing_game(GameOptions::default(), &layout);

    assert_eq!(
        game.activate_slot(slot(1, 8)).unwrap_err(),
        MoveError::NoCandidate
    );
}

#[test]
fn card_moves_next_to_its_predecessor() {
    let game = playing_game(
        GameOptions::default(),
        &[
            (slot(2, 3), card(Suit::Diamonds, Rank::Four)),
            (slot(0, 9), card(Suit::Diamonds, Rank::Five)),
        ],
    );

    let mv = game.activate_slot(slot(0, 9)).unwrap();
    assert_eq!(mv.to, slot(2, 4));
    assert_eq!(game.card_at(slot(0, 9)), None);
}

#[test]
fn occupied_or_missing_target_blocks_move() {
    let game = playing_game(
        GameOptions::default(),
        &[
            (slot(2, 3), card(Suit::Diamonds, Rank::Four)),
            (slot(2, 4), card(Suit::Hearts, Rank::Jack)),
            (slot(0, 9), card(Suit::Diamonds, Rank::Five)),
            (slot(1, 12), card(Suit::Spades, Rank::Nine)),
            (slot(3, 2), card(Suit::Spades, Rank::Ten)),
        ],
    );
    let before = game.board_snapshot();

    assert_eq!(game.activate_slot(slot(0, 9)).unwrap_err(), MoveError::Blocked);
    assert_eq!(game.activate_slot(slot(3, 2)).unwrap_err(), MoveError::Blocked);
    assert_eq!(game.board_snapshot(), before);
}

#[test]
fn marked_card_is_frozen() {
    let game = playing_game(GameOptions::default(), &run(0, Suit::Spades, 3));
    assert!(!game.check_win());
    assert!(game.is_marked(card(Suit::Spades, Rank::Three)));

    // Would otherwise move to the empty row head below.
    assert_eq!(
        game.activate_slot(slot(0, 0)).unwrap_err(),
        MoveError::Frozen
    );
    assert_eq!(
        game.activate_slot(slot(0, 2)).unwrap_err(),
        MoveError::Frozen
    );
}

#[test]
fn completed_row_is_marked_without_winning() {
    let mut layout = run(1, Suit::Hearts, 11);
    layout.push((slot(3, 5), card(Suit::Hearts, Rank::King)));
    let game = playing_game(GameOptions::default(), &layout);

    let mv = game.activate_slot(slot(1, 11)).unwrap();
    assert_eq!(mv.card, card(Suit::Hearts, Rank::King));
    assert!(!mv.won);
    assert_eq!(game.phase(), GamePhase::Playing);
    for &rank in &Rank::ALL[..12] {
        assert!(game.is_marked(card(Suit::Hearts, rank)));
    }
    assert_eq!(game.table.lock().cards().marked_count(), 12);
}

#[test]
fn final_move_wins_and_freezes_board() {
    init_logging();
    let mut layout: Vec<_> = Suit::ALL
        .iter()
        .enumerate()
        .flat_map(|(row, &suit)| run(row, suit, 12))
        .filter(|&(_, c)| c != card(Suit::Clubs, Rank::King))
        .collect();
    layout.push((slot(0, 12), card(Suit::Clubs, Rank::King)));
    let game = playing_game(GameOptions::default(), &layout);
    let recorder = Recorder::default();
    game.set_observer(recorder.clone());

    let mv = game.activate_slot(slot(3, 11)).unwrap();
    assert!(mv.won);
    assert_eq!(game.phase(), GamePhase::Won);
    assert!(!game.needs_confirmation());
    assert_eq!(recorder.0.lock().unwrap().last(), Some(&GameEvent::GameWon));

    assert_eq!(
        game.activate_slot(slot(0, 12)).unwrap_err(),
        MoveError::InvalidState
    );
    assert_eq!(game.request_shuffle().unwrap_err(), ShuffleError::InvalidState);

    game.start_new_game().unwrap();
    assert_eq!(game.phase(), GamePhase::Dealing);
    assert_eq!(game.table.lock().cards().marked_count(), 0);
}

#[test]
fn redeal_can_settle_straight_into_a_win() {
    let king = card(Suit::Clubs, Rank::King);
    let mut layout: Vec<_> = Suit::ALL
        .iter()
        .enumerate()
        .flat_map(|(row, &suit)| run(row, suit, 12))
        .filter(|&(_, c)| c != king)
        .collect();
    layout.push((slot(0, 12), king));

    let mut wins = 0;
    for seed in 0..64 {
        let game = seeded_playing_game(GameOptions::default(), seed, &layout);
        assert!(!game.check_win());
        assert_eq!(game.table.lock().cards().marked_count(), 47);

        let recorder = Recorder::default();
        game.set_observer(recorder.clone());
        assert_eq!(game.request_shuffle().unwrap(), 2);
        // The four aces and the loose king.
        assert_eq!(game.stock_len(), 5);

        let phase = game.finish_dealing().unwrap();
        let king_home = game.card_at(slot(3, 11)) == Some(king);
        assert_eq!(phase == GamePhase::Won, king_home, "seed {seed}");
        assert_eq!(game.stock_len(), 4);
        game.table.lock().verify().unwrap();

        if king_home {
            wins += 1;
            assert_eq!(recorder.0.lock().unwrap().last(), Some(&GameEvent::GameWon));
            assert!(!game.needs_confirmation());
            assert_eq!(
                game.activate_slot(slot(0, 12)).unwrap_err(),
                MoveError::InvalidState
            );
        } else {
            assert!(!recorder.0.lock().unwrap().contains(&GameEvent::GameWon));
        }
    }
    assert!(wins > 0);
}

#[test]
fn concurrent_shuffles_spend_one_allowance() {
    let game = dealt_game(31);
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| game.request_shuffle()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.contains(&Ok(2)));
    assert!(
        results
            .iter()
            .filter_map(|r| r.err())
            .all(|err| err == ShuffleError::InvalidState)
    );
    assert_eq!(game.shuffles_left(), 2);
    assert_eq!(game.phase(), GamePhase::Dealing);
}

#[test]
fn shuffle_without_allowance_is_ignored() {
    let game = playing_game(
        GameOptions::default().with_shuffles(0),
        &[(slot(1, 1), card(Suit::Hearts, Rank::Six))],
    );
    let before = game.board_snapshot();

    assert_eq!(
        game.request_shuffle().unwrap_err(),
        ShuffleError::NoShufflesLeft
    );
    assert_eq!(game.shuffles_left(), 0);
    assert_eq!(game.board_snapshot(), before);
    assert_eq!(game.phase(), GamePhase::Playing);
}

#[test]
fn shuffle_keeps_marked_cards_in_place() {
    let mut layout = run(2, Suit::Diamonds, 3);
    layout.push((slot(0, 7), card(Suit::Clubs, Rank::Nine)));
    let game = playing_game(GameOptions::default(), &layout);
    game.check_win();

    assert_eq!(game.request_shuffle().unwrap(), 2);
    assert_eq!(game.phase(), GamePhase::Dealing);
    assert_eq!(game.stock_len(), DECK_SIZE - 3);

    game.finish_dealing().unwrap();
    for (id, c) in run(2, Suit::Diamonds, 3) {
        assert_eq!(game.card_at(id), Some(c));
        assert!(game.is_marked(c));
    }
    assert_eq!(game.stock_len(), 4);
    assert_eq!(game.shuffles_left(), 2);
    game.table.lock().verify().unwrap();
}

#[test]
fn shuffles_run_out() {
    let game = dealt_game(21);
    for expected in (0..3).rev() {
        assert_eq!(game.request_shuffle().unwrap(), expected);
        game.finish_dealing().unwrap();
    }
    assert_eq!(
        game.request_shuffle().unwrap_err(),
        ShuffleError::NoShufflesLeft
    );
}

#[test]
fn rejected_activations_change_nothing() {
    let game = dealt_game(77);
    for index in 0..SLOT_COUNT {
        let before = game.board_snapshot();
        let phase = game.phase();
        if game.activate_slot(SlotId::from_index(index).unwrap()).is_err() {
            assert_eq!(game.board_snapshot(), before);
            assert_eq!(game.phase(), phase);
        }
        game.table.lock().verify().unwrap();
    }
}

#[test]
fn observer_sees_deal_and_counter() {
    let game = Game::new(GameOptions::default(), 8);
    let recorder = Recorder::default();
    game.set_observer(recorder.clone());

    game.start_new_game().unwrap();
    game.finish_dealing().unwrap();

    let events = recorder.0.lock().unwrap();
    assert_eq!(events.first(), Some(&GameEvent::ShufflesChanged(3)));
    let moves = events
        .iter()
        .filter(|e| matches!(e, GameEvent::CardMoved(_)))
        .count();
    assert_eq!(moves, DECK_SIZE + 4);
}

#[test]
fn presentation_hooks_swallow_rejections() {
    let game = Game::new(GameOptions::default(), 2);
    game.on_slot_activated(SLOT_COUNT + 3);
    game.on_shuffle_requested();
    assert_eq!(game.phase(), GamePhase::Idle);

    game.on_new_game_requested();
    assert_eq!(game.phase(), GamePhase::Dealing);
    game.on_slot_activated(0);
    assert_eq!(game.stock_len(), DECK_SIZE);
}
