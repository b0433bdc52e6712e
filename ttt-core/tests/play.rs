//! Whole games against the search.

use rand::prelude::*;
use rand::rngs::StdRng;
use ttt_core::{Board, Game, Outcome, Player, ALL_CELLS};

fn random_cell(board: &Board, rng: &mut StdRng) -> u8 {
    let moves: Vec<u8> = board.legal_moves().collect();
    moves[rng.random_range(0..moves.len())]
}

// ========== Perfect Play ==========

#[test]
fn test_perfect_play_is_draw() {
    let mut board = Board::new();
    let mut plies = 0;
    while let Some(cell) = board.best_move() {
        assert!(board.is_empty(cell));
        board = board.play(cell);
        plies += 1;
    }

    assert_eq!(plies, 9);
    assert!(board.game_end());
    assert_eq!(board.outcome(), Outcome::Draw);
    // X-to-move draws score -1 or 0 after the per-ply adjustment
    assert!((-1..=0).contains(&Board::new().minimax_move().score));
}

#[test]
fn test_every_opening_is_still_drawn_for_o() {
    // O can hold every first move by X.
    for cell in 0..9 {
        let board = Board::new().play(cell);
        let result = board.minimax_move();
        assert!(
            (0..=1).contains(&result.score),
            "opening {} scored {}",
            cell,
            result.score
        );
    }
}

// ========== Random Opponents ==========

#[test]
fn test_random_human_never_beats_game() {
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new();

        while !game.outcome().is_over() {
            let cell = random_cell(&game.board(), &mut rng);
            let turn = game.play(cell).unwrap();
            assert_eq!(turn.human, cell);
        }

        assert_ne!(
            game.outcome(),
            Outcome::Won(Game::HUMAN),
            "seed {} lost:\n{}",
            seed,
            game.board()
        );
        assert!(game.end_message().is_some());
    }
}

#[test]
fn test_search_as_x_never_loses() {
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new();

        while !board.game_end() {
            let cell = match board.active_player() {
                Player::X => board.best_move().unwrap(),
                Player::O => random_cell(&board, &mut rng),
            };
            board = board.play(cell);
        }

        assert_ne!(board.winner(), Some(Player::O), "seed {}:\n{}", seed, board);
    }
}

// ========== Board Properties ==========

#[test]
fn test_possible_moves_shrink_by_one() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let mut board = Board::new();
        assert_eq!(board.possible_moves(), ALL_CELLS);

        let mut k = 0;
        while !board.game_end() {
            assert_eq!(board.possible_moves().count_ones(), 9 - k);
            assert_eq!(board.possible_moves() & board.occupied_mask(), 0);

            let mover = board.active_player();
            board = board.play(random_cell(&board, &mut rng));
            k += 1;

            assert_eq!(board.move_count(), k);
            assert_eq!(board.active_player(), mover.opponent());
        }
    }
}

#[test]
fn test_game_history_alternates_players() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut game = Game::new();
    while !game.outcome().is_over() {
        let cell = random_cell(&game.board(), &mut rng);
        game.play(cell).unwrap();
    }

    for pair in game.history().windows(2) {
        assert_eq!(pair[1].move_count(), pair[0].move_count() + 1);
        assert_eq!(pair[1].active_player(), pair[0].active_player().opponent());
    }
}
