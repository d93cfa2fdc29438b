/// One-hot vector of length `width` with `1.0` at `label`.
///
/// A label outside `0..width` yields an all-zero vector.
pub fn one_hot(label: usize, width: usize) -> Vec<f64> {
    let mut v = vec![0.0; width];
    if let Some(slot) = v.get_mut(label) {
        *slot = 1.0;
    }
    v
}

/// Index of the largest value; the first one wins on ties and `NaN`s are
/// skipped. `None` for an empty or all-`NaN` slice.
pub fn argmax(v: &[f64]) -> Option<usize> {
    v.iter()
        .enumerate()
        .filter(|(_, x)| !x.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (i, &x)| match best {
            Some((_, b)) if b >= x => best,
            _ => Some((i, x)),
        })
        .map(|(i, _)| i)
}
