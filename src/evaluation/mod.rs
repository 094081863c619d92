//! Static evaluation of board positions.
//!
//! Two interchangeable evaluators are provided: a hand-crafted heuristic and
//! a linear model over extracted board features. Both score a position from
//! the perspective of a given player, with the same terminal short-circuit,
//! so the search engine can use either without modification.

pub mod features;
pub mod heuristic_eval;
pub mod model_eval;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::position::{Board, Player};
pub use heuristic_eval::HeuristicEval;
pub use model_eval::{LinearModel, ModelEval};

pub type Score = i32;

/// Score for a position the perspective player has won. Terminal scores
/// dominate every combination of positional terms.
pub const WIN_SCORE: Score = 1000;
pub const LOSS_SCORE: Score = -1000;

/// The common capability of all evaluators.
///
/// Positive scores favor the perspective player, negative scores favor their
/// opponent. Magnitudes are evaluator-specific and not comparable across
/// implementations, except for the shared terminal scores.
pub trait Evaluate {
    fn evaluate(&self, board: &Board, perspective: Player) -> Score;
}

/// Which evaluator the engine should be configured with.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EvaluatorKind {
    Heuristic,
    LinearModel,
}

/// Tagged union over the two evaluator implementations, so the engine can
/// switch between them at runtime.
#[derive(Clone, Debug)]
pub enum Evaluator {
    Heuristic(HeuristicEval),
    Model(ModelEval),
}

impl Evaluator {
    pub fn heuristic() -> Self {
        Evaluator::Heuristic(HeuristicEval)
    }

    /// A model evaluator can only be constructed from an already-built
    /// `LinearModel`, so an untrained model cannot be evaluated.
    pub fn model(model: LinearModel) -> Self {
        Evaluator::Model(ModelEval::new(model))
    }

    pub fn kind(&self) -> EvaluatorKind {
        match self {
            Evaluator::Heuristic(_) => EvaluatorKind::Heuristic,
            Evaluator::Model(_) => EvaluatorKind::LinearModel,
        }
    }
}

impl Evaluate for Evaluator {
    fn evaluate(&self, board: &Board, perspective: Player) -> Score {
        match self {
            Evaluator::Heuristic(eval) => eval.evaluate(board, perspective),
            Evaluator::Model(eval) => eval.evaluate(board, perspective),
        }
    }
}

/// The shared terminal short-circuit: win/loss/draw scores override any
/// positional terms. Returns `None` for non-terminal positions.
pub(crate) fn terminal_score(board: &Board, perspective: Player) -> Option<Score> {
    let winner = board.winner();
    if winner == perspective {
        Some(WIN_SCORE)
    } else if winner == perspective.opponent() && winner != Player::Empty {
        Some(LOSS_SCORE)
    } else if board.is_full() {
        Some(0)
    } else {
        None
    }
}
