//! Move validator tests

use match3::core::{can_move, can_move_with, find_move, Grid, MoveRule, RandomTiles};
use match3::types::Position;

fn grid(rows: &[&str]) -> Grid<char> {
    Grid::from_rows(rows.iter().map(|r| r.chars().collect()).collect()).unwrap()
}

fn p(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

#[test]
fn test_swap_that_lines_up_three_is_valid() {
    // Columns 0 and 1 are [X,X,Y] and [Y,X,X]; swapping (0,1) with (1,1) gives X X X
    // across the top row.
    let g = grid(&["XYX", "XXZ", "YXW"]);
    assert!(can_move(&g, p(0, 1), p(1, 1)));
    assert!(can_move(&g, p(1, 1), p(0, 1)));
}

#[test]
fn test_diagonal_is_never_valid() {
    let g = grid(&["aba", "bab", "aba"]);
    assert!(!can_move(&g, p(0, 0), p(2, 2)));
    assert!(!can_move(&g, p(0, 2), p(1, 1)));
}

#[test]
fn test_same_position_and_out_of_bounds() {
    let g = grid(&["aab", "ccd"]);
    assert!(!can_move(&g, p(0, 2), p(0, 2)));
    assert!(!can_move(&g, p(0, 2), p(0, 3)));
    assert!(!can_move(&g, p(-1, 0), p(0, 0)));
}

#[test]
fn test_swap_without_run_is_invalid() {
    let g = grid(&["ab", "cd"]);
    assert!(!can_move(&g, p(0, 0), p(0, 1)));
    assert!(!can_move(&g, p(0, 0), p(1, 0)));
}

#[test]
fn test_non_adjacent_colinear_swap() {
    let g = grid(&["aabxa"]);
    assert!(can_move(&g, p(0, 2), p(0, 4)));
    assert!(can_move_with(&g, p(0, 2), p(0, 4), MoveRule::Colinear));
    assert!(!can_move_with(&g, p(0, 2), p(0, 4), MoveRule::Adjacent));
}

#[test]
fn test_run_through_either_endpoint_counts() {
    // The run forms where the first position's tile lands.
    let g = grid(&["ax", "ay", "ba"]);
    assert!(can_move(&g, p(2, 0), p(2, 1)));
    // The run forms where the second position's tile lands.
    let g = grid(&["xa", "ya", "ab"]);
    assert!(can_move(&g, p(2, 0), p(2, 1)));
}

#[test]
fn test_validity_is_symmetric_on_random_boards() {
    for seed in 1..20 {
        let mut source = RandomTiles::gems(4, seed);
        let g = Grid::create(&mut source, 5, 5);
        let positions: Vec<Position> = g.pieces().map(|piece| piece.position).collect();
        for &a in &positions {
            for &b in &positions {
                assert_eq!(
                    can_move(&g, a, b),
                    can_move(&g, b, a),
                    "seed {} {} {}",
                    seed,
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_find_move_returns_a_valid_move() {
    let g = grid(&["XYX", "XXZ", "YXW"]);
    let (a, b) = find_move(&g, MoveRule::Colinear).unwrap();
    assert!(can_move(&g, a, b));

    let (a, b) = find_move(&g, MoveRule::Adjacent).unwrap();
    assert!(a.is_adjacent_to(b));
    assert!(can_move(&g, a, b));
}

#[test]
fn test_find_move_on_dead_board() {
    let g = grid(&["ab", "ba"]);
    assert_eq!(find_move(&g, MoveRule::Colinear), None);
}
