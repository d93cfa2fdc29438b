//! CSV ingestion for labeled numeric examples.
//!
//! Row format: `label, feature_0, ..., feature_{n-1}`. The label comes first
//! and is an integer class index; it is one-hot encoded into a target vector
//! of length `n_classes`. A first row containing any non-numeric cell is
//! treated as a header and skipped.

use std::path::Path;

use log::debug;

use crate::data::encoding::one_hot;
use crate::error::DataError;

/// Parallel input and target vectors, plus the raw class index of each row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub inputs: Vec<Vec<f64>>,
    pub targets: Vec<Vec<f64>>,
    pub labels: Vec<usize>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Width of every input vector (0 for an empty dataset).
    pub fn feature_width(&self) -> usize {
        self.inputs.first().map_or(0, Vec::len)
    }

    /// Divides every feature by `scale`, e.g. 255 to bring pixels into [0, 1].
    pub fn normalize(&mut self, scale: f64) {
        for x in self.inputs.iter_mut().flatten() {
            *x /= scale;
        }
    }
}

/// Reads and parses a CSV file. See [`parse_csv`].
pub fn read_csv(path: impl AsRef<Path>, n_classes: usize) -> Result<Dataset, DataError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let dataset = parse_csv(&text, n_classes)?;
    debug!(
        "loaded {} rows x {} features from {}",
        dataset.len(),
        dataset.feature_width(),
        path.display()
    );
    Ok(dataset)
}

/// Parses CSV text into a [`Dataset`].
pub fn parse_csv(text: &str, n_classes: usize) -> Result<Dataset, DataError> {
    let mut lines = text.lines().enumerate().peekable();

    if let Some((_, first)) = lines.peek() {
        if is_header(first) {
            lines.next();
        }
    }

    let mut dataset = Dataset::default();
    for (idx, line) in lines {
        let row = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut cells = line.split(',').map(str::trim);
        let label_cell = cells
            .next()
            .filter(|c| !c.is_empty())
            .ok_or(DataError::MissingLabel { row })?;
        let label = parse_label(label_cell, n_classes).ok_or_else(|| DataError::LabelOutOfRange {
            row,
            label: label_cell.to_string(),
            classes: n_classes,
        })?;

        let features = cells
            .map(|c| {
                c.parse::<f64>().map_err(|_| DataError::Parse {
                    row,
                    value: c.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, DataError>>()?;

        if let Some(expected) = dataset.inputs.first().map(Vec::len) {
            if features.len() != expected {
                return Err(DataError::RaggedRow {
                    row,
                    expected,
                    actual: features.len(),
                });
            }
        }

        dataset.targets.push(one_hot(label, n_classes));
        dataset.labels.push(label);
        dataset.inputs.push(features);
    }

    if dataset.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(dataset)
}

/// Accepts `3` and `3.0`; rejects negatives, fractions and indices `>= n_classes`.
fn parse_label(cell: &str, n_classes: usize) -> Option<usize> {
    let value = cell.parse::<f64>().ok()?;
    if value < 0.0 || value.fract() != 0.0 || value >= n_classes as f64 {
        return None;
    }
    Some(value as usize)
}

fn is_header(line: &str) -> bool {
    line.split(',').map(str::trim).any(|c| !c.is_empty() && c.parse::<f64>().is_err())
}
