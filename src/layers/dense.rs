use rand::Rng;

use crate::{
    error::NnError,
    math::{functions::{sigmoid, sigmoid_derivative}, matrix::Matrix},
};

/// One fully-connected, bias-free sigmoid layer.
#[derive(Debug, Clone)]
pub struct Layer {
    input_size: usize,
    weights: Matrix,
    output: Vec<f64>,  // activations from the most recent forward call
}

impl Layer {
    /// Allocates an `output_size × input_size` layer with all weights at zero.
    pub fn new(input_size: usize, output_size: usize) -> Layer {
        Layer {
            input_size,
            weights: Matrix::zeros(output_size, input_size),
            output: vec![0.0; output_size],
        }
    }

    /// Wraps an explicit weight matrix (one row per output neuron).
    pub fn from_weights(weights: Matrix) -> Layer {
        Layer {
            input_size: weights.cols,
            output: vec![0.0; weights.rows],
            weights,
        }
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.weights.rows
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    /// Cached activations; all zeros until the first `forward`.
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// Redraws every weight from U[0, 1).
    pub fn init_weights<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.weights.fill_uniform(rng);
    }

    /// Computes `output[i] = sigmoid(Σ_k w[i][k] * input[k])` and caches it.
    ///
    /// On a length mismatch the cached output is left untouched.
    pub fn forward(&mut self, input: &[f64]) -> Result<&[f64], NnError> {
        NnError::check_len(self.input_size, input.len())?;
        for (i, out) in self.output.iter_mut().enumerate() {
            *out = sigmoid(self.weights.row_dot(i, input));
        }
        Ok(&self.output)
    }

    /// Applies one gradient-descent step to this layer and returns the error
    /// signal for the layer below.
    ///
    /// `delta` is ∂cost/∂output for this layer, `prev_activation` the input
    /// that produced the cached output. Every weight is read into `old_w`
    /// before it is overwritten, and only `old_w` feeds the returned delta,
    /// so the lower layer sees the weights as they were before this step.
    pub(crate) fn backward(
        &mut self,
        delta: &[f64],
        prev_activation: &[f64],
        learning_rate: f64,
    ) -> Vec<f64> {
        debug_assert_eq!(delta.len(), self.output.len());
        debug_assert_eq!(prev_activation.len(), self.input_size);

        let mut prev_delta = vec![0.0; self.input_size];
        for (j, row) in self.weights.data.iter_mut().enumerate() {
            let g = delta[j] * sigmoid_derivative(self.output[j]);
            for (k, w) in row.iter_mut().enumerate() {
                let old_w = *w;
                *w -= learning_rate * g * prev_activation[k];
                prev_delta[k] += old_w * g;
            }
        }
        prev_delta
    }
}
