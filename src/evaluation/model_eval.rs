//! Linear-model evaluation over extracted board features.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::evaluation::features::{self, FeatureVector, NUM_FEATURES};
use crate::evaluation::{terminal_score, Evaluate, Score};
use crate::position::{Board, Player};

/// The model's raw output is fractional and small, while the search compares
/// it against the ±1000 terminal scores. Scaling keeps the integer scores on
/// a usable order of magnitude. A fixed design choice, not derived from the
/// model's error statistics.
const MODEL_SCORE_SCALE: f64 = 10.0;

/// Weights and bias of a trained linear model.
///
/// Built once, either by `tune::gradient_descent::train` or from the default
/// parameters, and immutable afterwards. The feature count is fixed in the
/// type, so a weight vector of the wrong length cannot be constructed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Debug)]
pub struct LinearModel {
    weights: [f64; NUM_FEATURES],
    bias: f64,
}

impl LinearModel {
    pub fn new(weights: [f64; NUM_FEATURES], bias: f64) -> Self {
        LinearModel { weights, bias }
    }

    /// Hand-picked fallback parameters, for when no training data is
    /// available: marks and open threats count for you, against the opponent,
    /// with a small preference for center and corners.
    pub fn default_params() -> Self {
        LinearModel {
            weights: [1.0, -1.0, 2.0, -2.0, 0.5, 0.3],
            bias: 0.0,
        }
    }

    /// The raw linear output `bias + weights · features`, X-centric like the
    /// training labels.
    pub fn predict(&self, features: &FeatureVector) -> f64 {
        self.bias
            + self
                .weights
                .iter()
                .zip(features.iter())
                .map(|(weight, feature)| weight * feature)
                .sum::<f64>()
    }

    pub fn weights(&self) -> &[f64; NUM_FEATURES] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }
}

/// Evaluates non-terminal positions by the linear model's prediction.
#[derive(Clone, Debug)]
pub struct ModelEval {
    model: LinearModel,
}

impl ModelEval {
    pub fn new(model: LinearModel) -> Self {
        ModelEval { model }
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }
}

impl Evaluate for ModelEval {
    fn evaluate(&self, board: &Board, perspective: Player) -> Score {
        if let Some(score) = terminal_score(board, perspective) {
            return score;
        }

        let features = features::extract(board);
        let mut raw_score = self.model.predict(&features);

        // The model is trained X-centric: positive means X is ahead.
        if perspective == Player::O {
            raw_score = -raw_score;
        }

        (raw_score * MODEL_SCORE_SCALE) as Score
    }
}
