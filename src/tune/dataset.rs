//! Reading, writing and generating the training dataset.
//!
//! The dataset is a CSV file with a header line and one row per example:
//! six feature values followed by a ±1 label. Malformed rows are skipped
//! with a warning; only a missing or structurally unreadable file fails the
//! whole load.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::evaluation::features::{self, NUM_FEATURES};
use crate::position::{Board, Player};
use crate::tune::gradient_descent::TrainingSample;

pub const NUM_FIELDS: usize = NUM_FEATURES + 1;

pub const CSV_HEADER: &str =
    "f1_x_count,f2_o_count,f3_x_almost_win,f4_o_almost_win,f5_x_center,f6_x_corners,label";

pub fn read_samples_from_file(path: &Path) -> io::Result<Vec<TrainingSample>> {
    let reader = io::BufReader::new(fs::File::open(path)?);
    let mut lines = reader.lines();

    // The header line is required, but its contents are not checked.
    if lines.next().transpose()?.is_none() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "dataset file is empty",
        ));
    }

    let mut samples = vec![];

    for (index, line) in lines.enumerate() {
        let line = line?;
        let line = line.trim();
        let line_number = index + 2;
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != NUM_FIELDS {
            warn!(
                "Skipping line {}: expected {} fields, got {}",
                line_number,
                NUM_FIELDS,
                fields.len()
            );
            continue;
        }

        let mut values = [0.0; NUM_FIELDS];
        let mut parse_failed = false;
        for (value, field) in values.iter_mut().zip(fields.iter()) {
            match field.trim().parse::<f64>() {
                Ok(parsed) => *value = parsed,
                Err(err) => {
                    warn!("Skipping line {}: {:?}: {}", line_number, field, err);
                    parse_failed = true;
                    break;
                }
            }
        }
        if parse_failed {
            continue;
        }

        let mut sample = TrainingSample {
            features: [0.0; NUM_FEATURES],
            label: values[NUM_FEATURES],
        };
        sample.features.copy_from_slice(&values[..NUM_FEATURES]);
        samples.push(sample);
    }

    Ok(samples)
}

pub fn write_samples_to_file(path: &Path, samples: &[TrainingSample]) -> io::Result<()> {
    let mut writer = io::BufWriter::new(fs::File::create(path)?);
    writeln!(writer, "{}", CSV_HEADER)?;
    for sample in samples {
        for feature in sample.features.iter() {
            write!(writer, "{},", feature)?;
        }
        writeln!(writer, "{}", sample.label)?;
    }
    writer.flush()
}

/// Generates training samples by random self-play.
///
/// Each decisive game contributes the feature vectors of every position it
/// passed through, labeled +1.0 if X won the game and -1.0 if O won. Drawn
/// games are discarded, since the labels only encode wins.
pub fn generate_samples<R: Rng>(num_games: usize, rng: &mut R) -> Vec<TrainingSample> {
    let mut samples = vec![];

    for _ in 0..num_games {
        let mut board = Board::default();
        let mut side_to_move = Player::X;
        let mut game_features = vec![];

        while !board.is_terminal() {
            let moves = board.available_moves();
            let mv = moves
                .choose(rng)
                .expect("Non-terminal board has no legal moves");
            board.make_move(mv.row, mv.col, side_to_move);
            game_features.push(features::extract(&board));
            side_to_move = side_to_move.opponent();
        }

        let label = match board.winner() {
            Player::X => 1.0,
            Player::O => -1.0,
            Player::Empty => continue,
        };

        samples.extend(
            game_features
                .into_iter()
                .map(|features| TrainingSample { features, label }),
        );
    }

    samples
}
