use super::*;
use crate::error::GameError;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

/// Cells of `board` in row-major order, rendered as in `Display`
fn cells(board: &MutableBoard) -> Vec<String> {
    (1..=board.num_cells())
        .filter_map(|n| board.pos_of(n))
        .map(|pos| board.get(pos).to_string())
        .collect()
}

#[test]
fn test_side_opposite() {
    assert_eq!(Side::Red.opposite(), Side::Blue);
    assert_eq!(Side::Blue.opposite(), Side::Red);
    assert_eq!(Side::Neutral.opposite(), Side::Neutral);
}

#[test]
fn test_cell_invariant() {
    assert!(Cell::new(Side::Neutral, 0).is_ok());
    assert!(Cell::new(Side::Red, 3).is_ok());
    assert_eq!(
        Cell::new(Side::Neutral, 2),
        Err(GameError::InvalidCell { side: Side::Neutral, spots: 2 })
    );
    assert_eq!(
        Cell::new(Side::Blue, 0),
        Err(GameError::InvalidCell { side: Side::Blue, spots: 0 })
    );
    assert_eq!(Cell::default(), Cell::EMPTY);
}

#[test]
fn test_pos_conversion() {
    let board = MutableBoard::new(4);
    assert_eq!(board.sq_num(Pos::new(1, 1)), Some(1));
    assert_eq!(board.sq_num(Pos::new(1, 4)), Some(4));
    assert_eq!(board.sq_num(Pos::new(2, 1)), Some(5));
    assert_eq!(board.sq_num(Pos::new(4, 4)), Some(16));

    for n in 1..=16 {
        let pos = board.pos_of(n).unwrap();
        assert_eq!(board.sq_num(pos), Some(n));
    }
    assert_eq!(board.pos_of(0), None);
    assert_eq!(board.pos_of(17), None);
}

#[test]
fn test_sq_num_rejects_off_board() {
    let board = MutableBoard::new(3);
    // (1,4) would otherwise alias (2,1)
    assert_eq!(board.sq_num(Pos::new(1, 4)), None);
    assert_eq!(board.sq_num(Pos::new(2, 1)), Some(4));
    assert_eq!(board.sq_num(Pos::new(4, 1)), None);
    assert_eq!(board.sq_num(Pos { row: 0, col: 1 }), None);
    assert_eq!(board.sq_num(Pos { row: 1, col: 0 }), None);
}

#[test]
fn test_pos_ordering() {
    assert!(Pos::new(1, 1) < Pos::new(1, 2));
    assert!(Pos::new(1, 6) < Pos::new(2, 1));
}

#[test]
fn test_neighbor_counts() {
    let board = MutableBoard::new(4);
    assert_eq!(board.neighbors(Pos::new(1, 1)), 2);
    assert_eq!(board.neighbors(Pos::new(4, 4)), 2);
    assert_eq!(board.neighbors(Pos::new(1, 3)), 3);
    assert_eq!(board.neighbors(Pos::new(3, 1)), 3);
    assert_eq!(board.neighbors(Pos::new(2, 2)), 4);
    assert_eq!(
        board.adjacent(Pos::new(2, 2)),
        vec![Pos::new(2, 1), Pos::new(2, 3), Pos::new(1, 2), Pos::new(3, 2)]
    );
}

#[test]
fn test_legality() {
    let mut board = MutableBoard::new(3);
    board.set(Pos::new(1, 1), 1, Side::Red).unwrap();
    board.set(Pos::new(1, 2), 2, Side::Blue).unwrap();

    assert!(board.is_legal(Side::Red, Pos::new(1, 1)));
    assert!(!board.is_legal(Side::Blue, Pos::new(1, 1)));
    assert!(board.is_legal(Side::Blue, Pos::new(1, 2)));
    assert!(!board.is_legal(Side::Red, Pos::new(1, 2)));
    assert!(board.is_legal(Side::Red, Pos::new(3, 3)));
    assert!(board.is_legal(Side::Blue, Pos::new(3, 3)));
    assert!(!board.is_legal(Side::Neutral, Pos::new(3, 3)));
    assert!(!board.is_legal(Side::Red, Pos { row: 4, col: 1 }));
}

#[test]
fn test_illegal_add_spot_leaves_board_untouched() {
    let mut board = MutableBoard::new(3);
    board.set(Pos::new(2, 2), 1, Side::Blue).unwrap();
    let before = MutableBoard::copy_from(&board);

    let err = board.add_spot(Side::Red, Pos::new(2, 2)).unwrap_err();
    assert_eq!(err, GameError::IllegalMove { side: Side::Red, pos: Pos::new(2, 2) });
    assert_eq!(board, before);
    assert_eq!(board.history_len(), 0);

    let err = board.add_spot_at(Side::Red, 10).unwrap_err();
    assert_eq!(err, GameError::InvalidIndex { n: 10, cells: 9 });
}

#[test]
fn test_corner_edge_interior_capacity() {
    // (pos, neighbors): fires on spot neighbors + 1
    for (pos, capacity) in [(Pos::new(1, 1), 2), (Pos::new(1, 2), 3), (Pos::new(2, 2), 4)] {
        let mut board = MutableBoard::new(4);
        for k in 1..=capacity {
            board.add_spot(Side::Red, pos).unwrap();
            assert_eq!(board.get(pos).spots(), k as u32);
            assert_eq!(board.num_of_side(Side::Red), 1);
        }
        board.add_spot(Side::Red, pos).unwrap();
        assert_eq!(board.get(pos).spots(), 1, "{pos} should fire");
        assert_eq!(board.num_of_side(Side::Red), 1 + capacity);
        assert_eq!(board.num_pieces(), capacity as u32 + 1);
    }
}

#[test]
fn test_three_spots_in_corner_cascade() {
    let mut board = MutableBoard::new(3);
    for _ in 0..3 {
        board.add_spot(Side::Red, Pos::new(1, 1)).unwrap();
    }
    assert_eq!(
        cells(&board),
        vec!["1r", "1r", "--", "1r", "--", "--", "--", "--", "--"]
    );
    assert_eq!(board.history_len(), 3);
    assert_eq!(board.to_string(), "1r 1r --\n1r -- --\n-- -- --\n");
}

#[test]
fn test_cascade_captures_opponent_cells() {
    let mut board = MutableBoard::new(3);
    board.set(Pos::new(1, 1), 2, Side::Red).unwrap();
    board.set(Pos::new(1, 2), 2, Side::Blue).unwrap();
    board.set(Pos::new(2, 1), 1, Side::Blue).unwrap();

    board.add_spot(Side::Red, Pos::new(1, 1)).unwrap();

    assert_eq!(board.get(Pos::new(1, 1)), Cell::new(Side::Red, 1).unwrap());
    assert_eq!(board.get(Pos::new(1, 2)), Cell::new(Side::Red, 3).unwrap());
    assert_eq!(board.get(Pos::new(2, 1)), Cell::new(Side::Red, 2).unwrap());
    assert_eq!(board.num_of_side(Side::Blue), 0);
    assert_eq!(board.num_of_side(Side::Red), 3);
    // Blue is gone but the board is not full, so nobody has won
    assert_eq!(board.winner(), None);
}

#[test]
fn test_chain_reaction_spreads() {
    let mut board = MutableBoard::new(3);
    board.set(Pos::new(1, 1), 2, Side::Red).unwrap();
    board.set(Pos::new(1, 2), 3, Side::Red).unwrap();

    board.add_spot(Side::Red, Pos::new(1, 1)).unwrap();

    // (1,1) fires into (1,2), which fires into (1,1), (1,3) and (2,2),
    // then (2,1) receives the last spot from the first firing.
    assert_eq!(
        cells(&board),
        vec!["2r", "1r", "1r", "1r", "1r", "--", "--", "--", "--"]
    );
    assert_eq!(board.num_pieces(), 6);
}

#[test]
fn test_cascade_conservation() {
    let mut rng = StdRng::seed_from_u64(61);
    let mut board = MutableBoard::new(4);
    let mut side = Side::Red;

    for _ in 0..1_000 {
        if board.winner().is_some() {
            break;
        }
        let before = board.num_pieces();
        let moves = board.legal_moves(side);
        let pos = *moves.choose(&mut rng).unwrap();
        board.add_spot(side, pos).unwrap();
        if board.winner().is_none() {
            assert_eq!(board.num_pieces(), before + 1);
        }
        side = side.opposite();
    }
}

#[test]
fn test_undo_round_trip() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut board = MutableBoard::new(5);
    board.set(Pos::new(3, 3), 3, Side::Blue).unwrap();
    let start = MutableBoard::copy_from(&board);

    let mut side = Side::Red;
    let mut applied = 0;
    for _ in 0..40 {
        if board.winner().is_some() {
            break;
        }
        let moves = board.legal_moves(side);
        board.add_spot(side, *moves.choose(&mut rng).unwrap()).unwrap();
        applied += 1;
        side = side.opposite();
    }
    assert_eq!(board.history_len(), applied);

    for _ in 0..applied {
        assert!(board.undo());
    }
    assert_eq!(board, start);
    assert_eq!(board.history_len(), 0);
}

#[test]
fn test_undo_on_empty_history_is_noop() {
    let mut board = MutableBoard::new(3);
    board.set(Pos::new(2, 2), 2, Side::Red).unwrap();
    let before = MutableBoard::copy_from(&board);

    assert!(!board.undo());
    assert_eq!(board, before);
}

#[test]
fn test_set_does_not_touch_history() {
    let mut board = MutableBoard::new(3);
    board.add_spot(Side::Red, Pos::new(1, 1)).unwrap();
    board.set(Pos::new(3, 3), 4, Side::Blue).unwrap();
    assert_eq!(board.history_len(), 1);
    assert_eq!(board.get(Pos::new(3, 3)).spots(), 4);

    assert_eq!(
        board.set(Pos { row: 3, col: 4 }, 1, Side::Red),
        Err(GameError::OutOfBounds { row: 3, col: 4, size: 3 })
    );
    assert_eq!(
        board.set(Pos::new(1, 2), 0, Side::Red),
        Err(GameError::InvalidCell { side: Side::Red, spots: 0 })
    );
}

#[test]
fn test_clear_resets_board_and_history() {
    let mut board = MutableBoard::new(3);
    board.add_spot(Side::Red, Pos::new(1, 1)).unwrap();
    board.add_spot(Side::Blue, Pos::new(2, 2)).unwrap();

    board.clear(5);
    assert_eq!(board.size(), 5);
    assert_eq!(board.num_pieces(), 0);
    assert_eq!(board.num_of_side(Side::Neutral), 25);
    assert_eq!(board.history_len(), 0);
    assert!(!board.undo());
}

#[test]
fn test_copy_has_empty_history() {
    let mut board = MutableBoard::new(3);
    board.add_spot(Side::Red, Pos::new(1, 1)).unwrap();
    board.add_spot(Side::Blue, Pos::new(3, 3)).unwrap();

    let copy = MutableBoard::copy_from(&board);
    assert_eq!(copy, board);
    assert_eq!(copy.history_len(), 0);
    assert_eq!(copy.num_of_side(Side::Red), 1);
    assert_eq!(copy.num_of_side(Side::Blue), 1);
}

#[test]
fn test_equality_ignores_history() {
    let mut a = MutableBoard::new(3);
    let mut b = MutableBoard::new(3);
    a.add_spot(Side::Red, Pos::new(2, 2)).unwrap();
    b.set(Pos::new(2, 2), 1, Side::Red).unwrap();
    assert_eq!(a, b);

    b.set(Pos::new(2, 2), 1, Side::Blue).unwrap();
    assert_ne!(a, b);
    assert_ne!(MutableBoard::new(3), MutableBoard::new(4));
}

#[test]
fn test_win_detection() {
    let mut board = MutableBoard::new(3);
    assert_eq!(board.winner(), None);

    for n in 1..=9 {
        board.set(board.pos_of(n).unwrap(), 1, Side::Red).unwrap();
    }
    assert_eq!(board.winner(), Some(Side::Red));
    for n in 1..=9 {
        let pos = board.pos_of(n).unwrap();
        assert!(!board.is_legal(Side::Blue, pos));
        assert!(!board.is_legal(Side::Red, pos));
    }
    assert!(board.legal_moves(Side::Blue).is_empty());
    assert!(matches!(
        board.add_spot(Side::Blue, Pos::new(2, 2)),
        Err(GameError::IllegalMove { .. })
    ));
}

#[test]
fn test_no_mutation_after_win_mid_cascade() {
    let mut board = MutableBoard::new(3);
    for n in 1..=9 {
        board.set(board.pos_of(n).unwrap(), 1, Side::Red).unwrap();
    }
    board.set(Pos::new(3, 2), 3, Side::Red).unwrap();
    board.set(Pos::new(3, 3), 1, Side::Blue).unwrap();

    // (3,2) fires left into (3,1), right into (3,3) which completes the
    // capture; the pending spot for (2,2) is never delivered.
    board.add_spot(Side::Red, Pos::new(3, 2)).unwrap();

    assert_eq!(board.winner(), Some(Side::Red));
    assert_eq!(board.get(Pos::new(3, 2)).spots(), 1);
    assert_eq!(board.get(Pos::new(3, 1)).spots(), 2);
    assert_eq!(board.get(Pos::new(3, 3)), Cell::new(Side::Red, 2).unwrap());
    assert_eq!(board.get(Pos::new(2, 2)).spots(), 1);

    let decided = MutableBoard::copy_from(&board);
    assert!(board.add_spot(Side::Red, Pos::new(1, 1)).is_err());
    assert_eq!(board, decided);

    // the winning move itself can still be taken back
    assert!(board.undo());
    assert_eq!(board.winner(), None);
    assert_eq!(board.get(Pos::new(3, 3)).side(), Side::Blue);
}

#[test]
fn test_cascade_overflow_restores_board() {
    let mut board = MutableBoard::new(3);
    board.set(Pos::new(1, 1), 2, Side::Red).unwrap();
    board.set(Pos::new(1, 2), 3, Side::Red).unwrap();
    let before = MutableBoard::copy_from(&board);
    board.set_cascade_limit(2);

    let err = board.add_spot(Side::Red, Pos::new(1, 1)).unwrap_err();
    assert_eq!(err, GameError::CascadeOverflow { steps: 2 });
    assert_eq!(board, before);
    assert_eq!(board.history_len(), 0);
}

#[test]
fn test_observers_receive_events() {
    let mut board = MutableBoard::new(3);
    let events = board.subscribe();

    board.add_spot(Side::Red, Pos::new(1, 1)).unwrap();
    board.set(Pos::new(2, 2), 1, Side::Blue).unwrap();
    board.undo();
    board.clear(4);
    let _ = board.add_spot(Side::Blue, Pos::new(9, 9));

    let received: Vec<BoardEvent> = events.try_iter().collect();
    assert_eq!(
        received,
        vec![
            BoardEvent::SpotAdded { side: Side::Red, pos: Pos::new(1, 1) },
            BoardEvent::CellSet { pos: Pos::new(2, 2) },
            BoardEvent::Undone,
            BoardEvent::Cleared { size: 4 },
        ]
    );

    // copies never inherit subscribers
    let mut copy = MutableBoard::copy_from(&board);
    copy.add_spot(Side::Red, Pos::new(1, 1)).unwrap();
    assert!(events.try_recv().is_err());

    drop(events);
    board.add_spot(Side::Red, Pos::new(1, 1)).unwrap();
}

#[test]
fn test_whose_move_alternates() {
    let mut board = MutableBoard::new(3);
    assert_eq!(board.whose_move(), Side::Red);
    board.add_spot(Side::Red, Pos::new(2, 2)).unwrap();
    assert_eq!(board.whose_move(), Side::Blue);
    board.add_spot(Side::Blue, Pos::new(1, 1)).unwrap();
    assert_eq!(board.whose_move(), Side::Red);
}
