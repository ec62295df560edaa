//! Stochastic sigmoid binarization of real-valued nests.

use rand::Rng;

/// Logistic function `1 / (1 + e^{-x})`.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Maps a real vector to a selection vector.
///
/// Bit `i` is set iff `sigmoid(real[i])` exceeds a fresh uniform draw in
/// `[0, 1)`. One draw per coordinate per call, so binarizing the same
/// vector twice generally yields different results.
pub fn binarize<R: Rng>(real: &[f64], rng: &mut R) -> Vec<bool> {
    real.iter()
        .map(|&x| sigmoid(x) > rng.random::<f64>())
        .collect()
}
