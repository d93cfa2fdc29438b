use rand::Rng;

/// Dense row-major weight matrix. Row `i` holds the incoming weights of
/// output neuron `i`, so the shape is `[output_size][input_size]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Matrix with every entry drawn independently from U[0, 1).
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        res.fill_uniform(rng);
        res
    }

    /// Overwrites every entry in place with a fresh U[0, 1) draw, row by row.
    pub fn fill_uniform<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in &mut self.data {
            for w in row.iter_mut() {
                *w = rng.gen::<f64>();
            }
        }
    }

    /// Builds a matrix from rows. Returns `None` when the rows are ragged.
    /// `cols` is taken from the first row, or 0 when there are no rows.
    pub fn from_data(data: Vec<Vec<f64>>) -> Option<Matrix> {
        let cols = data.first().map_or(0, Vec::len);
        if data.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Matrix {
            rows: data.len(),
            cols,
            data,
        })
    }

    /// Weighted sum of row `i` against `v`: `Σ_k data[i][k] * v[k]`.
    pub fn row_dot(&self, i: usize, v: &[f64]) -> f64 {
        self.data[i].iter().zip(v).map(|(w, x)| w * x).sum()
    }
}
