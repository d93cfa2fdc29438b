use crate::error::NnError;

/// Logistic sigmoid `1 / (1 + e^-x)`.
///
/// Saturates to `0.0` when `e^-x` overflows, so very negative inputs never
/// produce `NaN` or `Inf`.
pub fn sigmoid(x: f64) -> f64 {
    let e = (-x).exp();
    if e.is_infinite() {
        0.0
    } else {
        1.0 / (1.0 + e)
    }
}

/// Derivative of the sigmoid expressed through its output `a = sigmoid(z)`.
pub fn sigmoid_derivative(a: f64) -> f64 {
    a * (1.0 - a)
}

/// Halved sum of squared errors: `Σ (output[i] - target[i])² / 2`.
///
/// Its gradient with respect to `output[i]` is exactly `output[i] - target[i]`,
/// which is the error signal `Network::back_prop` starts from.
pub fn cost(output: &[f64], target: &[f64]) -> Result<f64, NnError> {
    NnError::check_len(output.len(), target.len())?;
    Ok(output
        .iter()
        .zip(target)
        .map(|(o, t)| {
            let diff = o - t;
            diff * diff / 2.0
        })
        .sum())
}
