//! A tic-tac-toe engine based on alpha-beta search, with a choice between a
//! hand-crafted heuristic evaluation and a linear model trained by gradient
//! descent on board features.

pub mod evaluation;
pub mod position;
pub mod search;
pub mod tune;

mod tests;
