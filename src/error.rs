use thiserror::Error;

/// Errors reported by the engine (`Layer`, `Network`, `cost`).
///
/// Every check runs before any weight, input or output is touched, so an
/// `Err` always means the call had no effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NnError {
    #[error("dimension mismatch: expected length {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("network has no layers")]
    EmptyNetwork,
}

impl NnError {
    pub(crate) fn check_len(expected: usize, actual: usize) -> Result<(), NnError> {
        if expected == actual {
            Ok(())
        } else {
            Err(NnError::DimensionMismatch { expected, actual })
        }
    }
}

/// Errors raised while reading labeled examples from CSV.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("row {row}: '{value}' is not a valid number")]
    Parse { row: usize, value: String },

    #[error("row {row}: missing label column")]
    MissingLabel { row: usize },

    #[error("row {row}: label '{label}' is not a class index below {classes}")]
    LabelOutOfRange { row: usize, label: String, classes: usize },

    #[error("row {row}: expected {expected} features, got {actual}")]
    RaggedRow { row: usize, expected: usize, actual: usize },

    #[error("dataset contains no data rows")]
    Empty,
}

/// Errors surfaced by the training driver.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error(transparent)]
    Network(#[from] NnError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("training set is empty")]
    EmptyDataset,
}
