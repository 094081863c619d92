//! Alpha-beta search over the tic-tac-toe game tree.
//!
//! The engine owns an evaluator and a random source, and explores the game
//! tree by mutating and reverting a single board instance. Lower difficulties
//! play suboptimally by sometimes bypassing the search entirely with a
//! uniformly random legal move.

mod alphabeta;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::evaluation::{Evaluator, Score};
use crate::position::{Board, Move, Player};

pub type Depth = u32;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Maximum search depth in plies. Depth 9 covers the whole 3x3 game
    /// tree, so Hard plays perfectly.
    pub fn depth(self) -> Depth {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 3,
            Difficulty::Hard => 9,
        }
    }

    /// Probability of skipping the search and playing a random legal move,
    /// decided once per `find_best_move` call.
    pub fn random_move_probability(self) -> f64 {
        match self {
            Difficulty::Easy => 0.60,
            Difficulty::Normal => 0.30,
            Difficulty::Hard => 0.0,
        }
    }
}

/// Alpha-beta search engine.
///
/// Diagnostics (`nodes_evaluated`, `prune_count`, `last_move_scores`) cover
/// the most recent `find_best_move` call only.
pub struct AlphaBeta {
    evaluator: Evaluator,
    rng: SmallRng,
    nodes_evaluated: u64,
    prune_count: u64,
    last_move_scores: Vec<Move>,
}

impl AlphaBeta {
    pub fn new(evaluator: Evaluator) -> Self {
        AlphaBeta::with_rng(evaluator, SmallRng::from_entropy())
    }

    /// A seeded engine plays deterministically at every difficulty, which the
    /// tests rely on.
    pub fn from_seed(evaluator: Evaluator, seed: u64) -> Self {
        AlphaBeta::with_rng(evaluator, SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng(evaluator: Evaluator, rng: SmallRng) -> Self {
        AlphaBeta {
            evaluator,
            rng,
            nodes_evaluated: 0,
            prune_count: 0,
            last_move_scores: vec![],
        }
    }

    pub fn set_evaluator(&mut self, evaluator: Evaluator) {
        self.evaluator = evaluator;
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Finds the best move for `player` on `board`, or `None` if no legal
    /// move remains.
    ///
    /// The board is mutated during the search but fully restored before
    /// returning. Ties between equal-scored moves are broken by row-major
    /// move order: the first move seen with the best score is kept.
    pub fn find_best_move(
        &mut self,
        board: &mut Board,
        player: Player,
        difficulty: Difficulty,
    ) -> Option<Move> {
        self.nodes_evaluated = 0;
        self.prune_count = 0;
        self.last_move_scores.clear();

        let available_moves = board.available_moves();
        if available_moves.is_empty() {
            return None;
        }

        // Difficulty-gated bypass: a full replacement of the search, not a
        // bias on top of it.
        if self.rng.gen::<f64>() < difficulty.random_move_probability() {
            let index = self.rng.gen_range(0..available_moves.len());
            let mut random_move = available_moves[index];
            random_move.score = 0;
            return Some(random_move);
        }

        let max_depth = difficulty.depth();
        let mut best_move: Option<Move> = None;
        let mut best_score = Score::MIN;
        let mut alpha = Score::MIN;
        let beta = Score::MAX;

        for mv in available_moves {
            board.make_move(mv.row, mv.col, player);
            let score = self.alphabeta(board, player, alpha, beta, 0, max_depth, false);
            board.undo_move(mv.row, mv.col);

            self.last_move_scores
                .push(Move::with_score(mv.row, mv.col, score));

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }

            // Feeding the best score back into alpha at the root lets later
            // siblings be pruned against earlier results. More aggressive
            // than the textbook root loop; with first-seen tie-break the
            // selected move is unaffected.
            alpha = alpha.max(best_score);
        }

        best_move.map(|mv| Move::with_score(mv.row, mv.col, best_score))
    }

    /// Nodes visited during the last search.
    pub fn nodes_evaluated(&self) -> u64 {
        self.nodes_evaluated
    }

    /// Beta/alpha cutoffs taken during the last search.
    pub fn prune_count(&self) -> u64 {
        self.prune_count
    }

    /// The score backed up for each root move during the last search, in the
    /// order the moves were explored.
    pub fn last_move_scores(&self) -> &[Move] {
        &self.last_move_scores
    }
}
