use serde::{Deserialize, Serialize};

/// Per-epoch training statistics emitted by `train_loop`.
///
/// Sent on `TrainConfig::progress_tx` at the end of every epoch, including
/// an epoch cut short because the accuracy target was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean pre-update cost over the samples trained this epoch.
    pub train_cost: f64,
    pub test_cost: Option<f64>,
    /// Test accuracy as a fraction in [0, 1].
    pub test_accuracy: Option<f64>,
    /// Samples trained in this epoch.
    pub samples_seen: usize,
    pub elapsed_ms: u64,
}

/// Outcome of a `train_loop` run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    pub epochs: Vec<EpochStats>,
    pub reached_target: bool,
}

impl TrainReport {
    pub fn last(&self) -> Option<&EpochStats> {
        self.epochs.last()
    }
}
