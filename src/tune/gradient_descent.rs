//! Batch gradient-descent training of the linear evaluation model.
//!
//! The loss is the mean squared error of the raw linear output against the
//! ±1 outcome labels. No sigmoid is applied; predictions are compared
//! directly against the labels, and classified by sign.

use std::io;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::evaluation::features::{FeatureVector, NUM_FEATURES};
use crate::evaluation::LinearModel;

/// One labeled training example. The label is +1.0 when the position comes
/// from a game X won, -1.0 when O won.
#[derive(Clone, PartialEq, Debug)]
pub struct TrainingSample {
    pub features: FeatureVector,
    pub label: f64,
}

#[derive(Clone, PartialEq, Debug)]
pub struct TrainerSettings {
    learning_rate: f64,
    max_iterations: usize,
    convergence_threshold: f64,
    seed: u64,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        TrainerSettings {
            learning_rate: 0.01,
            max_iterations: 1000,
            convergence_threshold: 0.0001,
            seed: 42,
        }
    }
}

impl TrainerSettings {
    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Training stops early once the absolute change in loss between
    /// iterations falls below this threshold.
    pub fn convergence_threshold(mut self, convergence_threshold: f64) -> Self {
        self.convergence_threshold = convergence_threshold;
        self
    }

    /// Seed for the Gaussian weight initialization. Training is bit-for-bit
    /// reproducible for a fixed seed and dataset.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Fits weights and bias to the samples by full-batch gradient descent.
///
/// An empty dataset is an error: proceeding would divide by zero when
/// averaging the gradients.
pub fn train(samples: &[TrainingSample], settings: &TrainerSettings) -> io::Result<LinearModel> {
    if samples.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "cannot train on an empty dataset",
        ));
    }

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut weights = [0.0; NUM_FEATURES];
    for weight in weights.iter_mut() {
        *weight = rng.sample::<f64, _>(StandardNormal) * 0.01;
    }
    let mut bias = 0.0;

    debug!("Starting training with {} examples", samples.len());

    let mut prev_loss = f64::MAX;

    for iteration in 0..settings.max_iterations {
        let mut weight_gradients = [0.0; NUM_FEATURES];
        let mut bias_gradient = 0.0;
        let mut total_loss = 0.0;

        for sample in samples {
            let prediction = predict(&weights, bias, &sample.features);
            let error = prediction - sample.label;

            for (gradient, feature) in weight_gradients.iter_mut().zip(sample.features.iter()) {
                *gradient += error * feature;
            }
            bias_gradient += error;
            total_loss += error * error;
        }

        let n = samples.len() as f64;
        total_loss /= n;
        for gradient in weight_gradients.iter_mut() {
            *gradient /= n;
        }
        bias_gradient /= n;

        for (weight, gradient) in weights.iter_mut().zip(weight_gradients.iter()) {
            *weight -= settings.learning_rate * gradient;
        }
        bias -= settings.learning_rate * bias_gradient;

        if iteration % 100 == 0 {
            debug!("Iteration {}: loss = {:.6}", iteration, total_loss);
        }

        if (prev_loss - total_loss).abs() < settings.convergence_threshold {
            debug!("Converged at iteration {}", iteration);
            break;
        }
        prev_loss = total_loss;
    }

    Ok(LinearModel::new(weights, bias))
}

/// Fraction of samples whose prediction sign matches the label. A raw
/// prediction >= 0 is classified as the positive label.
pub fn accuracy(model: &LinearModel, samples: &[TrainingSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let correct = samples
        .iter()
        .filter(|sample| {
            let predicted_label = if model.predict(&sample.features) >= 0.0 {
                1.0
            } else {
                -1.0
            };
            predicted_label == sample.label
        })
        .count();
    correct as f64 / samples.len() as f64
}

fn predict(weights: &[f64; NUM_FEATURES], bias: f64, features: &FeatureVector) -> f64 {
    bias + weights
        .iter()
        .zip(features.iter())
        .map(|(weight, feature)| weight * feature)
        .sum::<f64>()
}
