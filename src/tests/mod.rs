#[cfg(test)]
mod search_tests;

#[cfg(test)]
use crate::position::{Board, Player};

#[cfg(test)]
fn do_moves(board: &mut Board, moves: &[(usize, usize, Player)]) {
    for &(row, col, player) in moves {
        assert!(
            board.is_valid_move(row, col),
            "Illegal move ({},{}) on board\n{}",
            row,
            col,
            board
        );
        board.make_move(row, col, player);
    }
}
