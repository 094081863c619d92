//! The recursive alpha-beta core. The public-facing API is in the parent
//! module.

use crate::evaluation::{Evaluate, Score};
use crate::position::{Board, Player};
use crate::search::{AlphaBeta, Depth};

impl AlphaBeta {
    /// Scores a position for `maximizing_player`, searching to `max_depth`
    /// plies. `maximizing_turn` says whose move it is at this node; the
    /// maximizing/minimizing role alternates strictly per ply.
    ///
    /// Every move applied to the board is undone before the function
    /// returns, so the board is bit-for-bit unchanged by the call.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn alphabeta(
        &mut self,
        board: &mut Board,
        maximizing_player: Player,
        mut alpha: Score,
        mut beta: Score,
        depth: Depth,
        max_depth: Depth,
        maximizing_turn: bool,
    ) -> Score {
        self.nodes_evaluated += 1;

        // The evaluator detects terminal states itself, so evaluating
        // exactly at the depth cutoff is still correct.
        if depth >= max_depth || board.is_terminal() {
            return self.evaluator.evaluate(board, maximizing_player);
        }

        let moves = board.available_moves();

        if maximizing_turn {
            let mut value = Score::MIN;

            for mv in moves {
                board.make_move(mv.row, mv.col, maximizing_player);
                value = value.max(self.alphabeta(
                    board,
                    maximizing_player,
                    alpha,
                    beta,
                    depth + 1,
                    max_depth,
                    false,
                ));
                board.undo_move(mv.row, mv.col);

                alpha = alpha.max(value);
                if beta <= alpha {
                    self.prune_count += 1;
                    break;
                }
            }

            value
        } else {
            let mut value = Score::MAX;
            let minimizing_player = maximizing_player.opponent();

            for mv in moves {
                board.make_move(mv.row, mv.col, minimizing_player);
                value = value.min(self.alphabeta(
                    board,
                    maximizing_player,
                    alpha,
                    beta,
                    depth + 1,
                    max_depth,
                    true,
                ));
                board.undo_move(mv.row, mv.col);

                beta = beta.min(value);
                if beta <= alpha {
                    self.prune_count += 1;
                    break;
                }
            }

            value
        }
    }
}
