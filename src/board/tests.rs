use super::*;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(7, 7); // Center of 15x15
    assert_eq!(pos.to_index(), 7 * 16 + 7);

    let pos2 = Pos::from_index(119);
    assert_eq!(pos2, pos);
}

#[test]
fn test_pos_offset_stays_on_board() {
    let pos = Pos::new(0, 14);
    assert_eq!(pos.offset(Direction::Horizontal, 1, 15), None);
    assert_eq!(pos.offset(Direction::Vertical, 2, 15), Some(Pos::new(2, 14)));
    assert_eq!(pos.offset(Direction::AntiDiagonal, 1, 15), Some(Pos::new(1, 13)));
    assert_eq!(pos.offset(Direction::Diagonal, -1, 15), None);
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
}

#[test]
fn test_board_constants() {
    assert_eq!(BOARD_SIZE, 15);
    assert_eq!(TOTAL_CELLS, 256);
    let board = Board::new();
    assert_eq!(board.size(), 15);
    assert_eq!(board.center(), Pos::new(7, 7));
    assert_eq!(board.positions().count(), 225);
}

#[test]
fn test_with_size_bounds() {
    assert!(Board::with_size(4).is_err());
    assert!(Board::with_size(17).is_err());
    let board = Board::with_size(9).unwrap();
    assert_eq!(board.size(), 9);
    assert!(!board.contains(9, 0));
    assert_eq!(board.get_at(-1, 3), None);
    assert_eq!(board.get_at(3, 3), Some(Stone::Empty));
}

#[test]
fn test_with_stone_reverts() {
    let mut board = Board::new();
    board.place_stone(Pos::new(7, 7), Stone::White);
    let before = board.clone();

    let seen = board.with_stone(Pos::new(7, 8), Stone::Black, |b| {
        b.with_stone(Pos::new(7, 9), Stone::White, |b2| b2.stone_count())
    });

    assert_eq!(seen, 3);
    assert_eq!(board, before);
}

#[test]
fn test_with_stone_restores_previous_occupant() {
    let mut board = Board::new();
    let pos = Pos::new(3, 3);
    board.place_stone(pos, Stone::White);
    board.with_stone(pos, Stone::Black, |b| assert_eq!(b.get(pos), Stone::Black));
    assert_eq!(board.get(pos), Stone::White);
}

#[test]
fn test_full_board() {
    let mut board = Board::with_size(5).unwrap();
    let cells: Vec<Pos> = board.positions().collect();
    for (i, p) in cells.iter().enumerate() {
        assert!(!board.is_full());
        board.place_stone(*p, if i % 2 == 0 { Stone::Black } else { Stone::White });
    }
    assert!(board.is_full());
    assert_eq!(board.empty_cells().count(), 0);
}

#[test]
fn test_display_glyphs() {
    let mut board = Board::with_size(5).unwrap();
    board.place_stone(Pos::new(0, 0), Stone::Black);
    board.place_stone(Pos::new(0, 1), Stone::White);
    let text = board.to_string();
    assert!(text.contains('X'));
    assert!(text.contains('O'));
    assert_eq!(text.lines().count(), 6);
}
