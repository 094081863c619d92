//! Training of the linear evaluation model.

pub mod dataset;
pub mod gradient_descent;

use std::io;
use std::path::Path;

use log::{info, warn};

use crate::evaluation::LinearModel;
pub use gradient_descent::{accuracy, train, TrainerSettings, TrainingSample};

/// Loads the dataset from a CSV file and trains a model on it, logging the
/// resulting classification accuracy.
pub fn train_from_csv(path: &Path) -> io::Result<LinearModel> {
    info!("Loading dataset from {}", path.display());
    let samples = dataset::read_samples_from_file(path)?;
    let model = gradient_descent::train(&samples, &TrainerSettings::default())?;
    let accuracy = gradient_descent::accuracy(&model, &samples);
    info!(
        "Trained on {} examples, accuracy {:.2}%",
        samples.len(),
        accuracy * 100.0
    );
    Ok(model)
}

/// Startup path: train from the CSV if possible, otherwise fall back to the
/// default model parameters so the model evaluator is always usable.
pub fn train_or_default(path: &Path) -> LinearModel {
    match train_from_csv(path) {
        Ok(model) => model,
        Err(err) => {
            warn!(
                "Training from {} failed ({}), using default weights",
                path.display(),
                err
            );
            LinearModel::default_params()
        }
    }
}
