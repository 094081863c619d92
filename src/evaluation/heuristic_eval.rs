//! Rule-based static evaluation.

use crate::evaluation::{terminal_score, Evaluate, Score};
use crate::position::{Board, Player, CENTER, CORNERS, LINES};

const CENTER_SCORE: Score = 30;
const CORNER_SCORE: Score = 20;
const TWO_IN_LINE_SCORE: Score = 50;
const ONE_IN_LINE_SCORE: Score = 10;

/// Evaluates non-terminal positions from positional rules: center control,
/// corner control, and a term per line scoring open one-in-a-line and
/// two-in-a-line threats.
#[derive(Clone, Copy, Default, Debug)]
pub struct HeuristicEval;

impl Evaluate for HeuristicEval {
    fn evaluate(&self, board: &Board, perspective: Player) -> Score {
        if let Some(score) = terminal_score(board, perspective) {
            return score;
        }

        let opponent = perspective.opponent();
        let mut score = 0;

        let (center_row, center_col) = CENTER;
        if board.get(center_row, center_col) == perspective {
            score += CENTER_SCORE;
        } else if board.get(center_row, center_col) == opponent {
            score -= CENTER_SCORE;
        }

        for &(row, col) in CORNERS.iter() {
            if board.get(row, col) == perspective {
                score += CORNER_SCORE;
            } else if board.get(row, col) == opponent {
                score -= CORNER_SCORE;
            }
        }

        for line in LINES.iter() {
            score += line_score(board, line, perspective);
        }

        score
    }
}

/// Scores one line by its (own, opponent, empty) occupancy. Lines containing
/// marks of both players cannot be completed and contribute nothing.
fn line_score(board: &Board, line: &[(usize, usize); 3], perspective: Player) -> Score {
    let opponent = perspective.opponent();
    let mut own_count = 0;
    let mut opponent_count = 0;
    let mut empty_count = 0;

    for &(row, col) in line.iter() {
        let cell = board.get(row, col);
        if cell == perspective {
            own_count += 1;
        } else if cell == opponent {
            opponent_count += 1;
        } else {
            empty_count += 1;
        }
    }

    match (own_count, opponent_count, empty_count) {
        (2, _, 1) => TWO_IN_LINE_SCORE,
        (_, 2, 1) => -TWO_IN_LINE_SCORE,
        (1, _, 2) => ONE_IN_LINE_SCORE,
        (_, 1, 2) => -ONE_IN_LINE_SCORE,
        _ => 0,
    }
}
