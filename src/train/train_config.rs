use std::path::Path;
use std::sync::mpsc;
use std::sync::{atomic::AtomicBool, Arc};

use serde::{Deserialize, Serialize};

use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// The hyperparameters round-trip through JSON; the channel and stop flag
/// are runtime-only and always come back as `None` from `load_json`.
///
/// # Fields
/// - `learning_rate`   — step size for every per-example update
/// - `max_epochs`      — upper bound on full passes over the training data
/// - `target_accuracy` — optional fraction in [0, 1]; training stops as soon
///                       as a progress report reaches it
/// - `report_every`    — samples between progress reports
/// - `seed`            — seed for weight initialization and shuffling; the
///                       CLI falls back to entropy when absent
/// - `progress_tx`     — one `EpochStats` per completed epoch; a dropped
///                       receiver ends training
/// - `stop_flag`       — set from another thread to stop at the next check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub max_epochs: usize,
    pub target_accuracy: Option<f64>,
    pub report_every: usize,
    pub seed: Option<u64>,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    #[serde(skip)]
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            learning_rate: 0.1,
            max_epochs: 10,
            target_accuracy: None,
            report_every: 10_000,
            seed: None,
            progress_tx: None,
            stop_flag: None,
        }
    }
}

impl TrainConfig {
    /// Creates a config with no target, channel or stop flag.
    pub fn new(learning_rate: f64, max_epochs: usize) -> Self {
        TrainConfig {
            learning_rate,
            max_epochs,
            ..TrainConfig::default()
        }
    }

    /// Serializes the hyperparameters to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Reads hyperparameters from JSON; missing fields take their defaults.
    pub fn load_json(path: impl AsRef<Path>) -> std::io::Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
