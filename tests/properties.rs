//! Property tests for win detection, forbidden-move classification and the
//! engine's legality guarantee on arbitrary positions

use proptest::collection::vec;
use proptest::prelude::*;
use renju::rules::{check_win, classify, has_exact_five};
use renju::search::evaluate_vct;
use renju::{classify_forbidden, Board, Engine, EngineConfig, Pos, Rules, Stone, Weights};

const SIZE: u8 = 15;

fn colour(black: bool) -> Stone {
    if black {
        Stone::Black
    } else {
        Stone::White
    }
}

/// Random position: later placements overwrite earlier ones
fn arb_board(max_stones: usize) -> impl Strategy<Value = Board> {
    vec((0..SIZE, 0..SIZE, any::<bool>()), 0..max_stones).prop_map(|stones| {
        let mut board = Board::new();
        for (r, c, black) in stones {
            board.place_stone(Pos::new(r, c), colour(black));
        }
        board
    })
}

fn arb_pos() -> impl Strategy<Value = Pos> {
    (0..SIZE, 0..SIZE).prop_map(|(r, c)| Pos::new(r, c))
}

/// Longest run through `pos` by walking the grid cell by cell
fn brute_force_run(board: &Board, pos: Pos, color: Stone) -> i32 {
    let mut best = 0;
    for (dr, dc) in [(0, 1), (1, 0), (1, 1), (1, -1)] {
        let mut run = 1;
        for sign in [-1, 1] {
            let (mut r, mut c) = (pos.row as i32 + sign * dr, pos.col as i32 + sign * dc);
            while board.get_at(r, c) == Some(color) {
                run += 1;
                r += sign * dr;
                c += sign * dc;
            }
        }
        best = best.max(run);
    }
    best
}

proptest! {
    #[test]
    fn win_matches_brute_force_run(board in arb_board(80), pos in arb_pos(), black in any::<bool>()) {
        let color = colour(black);
        let mut board = board;
        board.place_stone(pos, color);
        prop_assert_eq!(check_win(&board, pos, color), brute_force_run(&board, pos, color) >= 5);
    }

    #[test]
    fn adding_a_stone_keeps_a_win(
        board in arb_board(80),
        pos in arb_pos(),
        other in arb_pos(),
        black in any::<bool>(),
        other_black in any::<bool>(),
    ) {
        let color = colour(black);
        let mut board = board;
        board.place_stone(pos, color);
        prop_assume!(other != pos && board.is_empty(other));

        let before = check_win(&board, pos, color);
        board.place_stone(other, colour(other_black));
        if before {
            prop_assert!(check_win(&board, pos, color));
        }
    }

    #[test]
    fn classify_is_idempotent_and_pure(board in arb_board(80), pos in arb_pos(), black in any::<bool>()) {
        let color = colour(black);
        let before = board.clone();

        let first = classify_forbidden(&board, pos.row as i32, pos.col as i32, color);
        let second = classify_forbidden(&board, pos.row as i32, pos.col as i32, color);
        prop_assert_eq!(first, second);
        prop_assert_eq!(&board, &before);

        let mut scratch = board.clone();
        if scratch.is_empty(pos) {
            let direct = classify(&mut scratch, pos, color);
            prop_assert_eq!(direct, first);
            prop_assert_eq!(&scratch, &before);
        }
    }

    #[test]
    fn exact_five_is_never_forbidden(board in arb_board(120), pos in arb_pos(), black in any::<bool>()) {
        let color = colour(black);
        let mut board = board;
        prop_assume!(board.is_empty(pos));

        let five = board.with_stone(pos, color, |b| has_exact_five(b, pos, color));
        if five {
            prop_assert!(!classify(&mut board, pos, color).is_forbidden());
        }
    }

    #[test]
    fn vct_at_depth_zero_is_zero(board in arb_board(80), pos in arb_pos(), black in any::<bool>()) {
        let mut board = board;
        prop_assume!(board.is_empty(pos));
        let before = board.clone();
        let score = evaluate_vct(&mut board, pos, colour(black), 0, &Rules::renju(), &Weights::default());
        prop_assert_eq!(score, 0);
        prop_assert_eq!(board, before);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn engine_plays_legal_cells(board in arb_board(40), black in any::<bool>()) {
        let color = colour(black);
        let rules = Rules::renju();
        let config = EngineConfig {
            vct_depth: 2,
            seed: Some(1),
            ..EngineConfig::default()
        };
        let mut engine = Engine::with_config(config);
        let before = board.clone();

        let chosen = engine.select_move(&board, color);
        prop_assert_eq!(&board, &before);

        let mut scratch = board.clone();
        let cells: Vec<Pos> = scratch.empty_cells().collect();
        let any_legal = cells.iter().any(|&p| rules.is_legal(&mut scratch, p, color));

        match chosen {
            Some(pos) => {
                prop_assert!(board.is_empty(pos));
                if any_legal {
                    prop_assert!(rules.is_legal(&mut scratch, pos, color));
                }
            }
            None => prop_assert!(board.is_full()),
        }
    }
}
