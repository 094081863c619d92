//! Extraction of the numeric feature vector the linear model is trained on.
//!
//! Features are always computed from X's point of view, matching the columns
//! of the training dataset. Perspective adjustment is the evaluator's job,
//! not the extractor's.

use crate::position::{Board, Player, CENTER, CORNERS, LINES};

pub const NUM_FEATURES: usize = 6;

/// Feature layout, matching the dataset columns:
/// 0: number of X marks
/// 1: number of O marks
/// 2: lines where X holds two squares and the third is empty
/// 3: lines where O holds two squares and the third is empty
/// 4: 1.0 if X holds the center, else 0.0
/// 5: number of corners held by X
pub type FeatureVector = [f64; NUM_FEATURES];

/// Extracts the feature vector for a board. Pure: the same board always
/// produces the same vector.
pub fn extract(board: &Board) -> FeatureVector {
    let mut features = [0.0; NUM_FEATURES];

    let mut x_count = 0;
    let mut o_count = 0;
    for (row, col) in crate::position::squares_iterator() {
        match board.get(row, col) {
            Player::X => x_count += 1,
            Player::O => o_count += 1,
            Player::Empty => (),
        }
    }
    features[0] = f64::from(x_count);
    features[1] = f64::from(o_count);

    let (x_almost_wins, o_almost_wins) = count_almost_wins(board);
    features[2] = f64::from(x_almost_wins);
    features[3] = f64::from(o_almost_wins);

    let (center_row, center_col) = CENTER;
    features[4] = if board.get(center_row, center_col) == Player::X {
        1.0
    } else {
        0.0
    };

    features[5] = f64::from(
        CORNERS
            .iter()
            .filter(|&&(row, col)| board.get(row, col) == Player::X)
            .count() as u32,
    );

    features
}

/// Counts the lines where one player holds two squares with the third empty.
/// A single line can only qualify for one side, since both players cannot
/// each hold two of the same three squares.
fn count_almost_wins(board: &Board) -> (u32, u32) {
    let mut x_almost_wins = 0;
    let mut o_almost_wins = 0;

    for line in LINES.iter() {
        let mut x_count = 0;
        let mut o_count = 0;
        let mut empty_count = 0;
        for &(row, col) in line.iter() {
            match board.get(row, col) {
                Player::X => x_count += 1,
                Player::O => o_count += 1,
                Player::Empty => empty_count += 1,
            }
        }
        if x_count == 2 && empty_count == 1 {
            x_almost_wins += 1;
        }
        if o_count == 2 && empty_count == 1 {
            o_almost_wins += 1;
        }
    }

    (x_almost_wins, o_almost_wins)
}
