//! Lévy-flight step generator (Mantegna's algorithm).

use crate::error::ConfigError;
use rand::Rng;
use rand_distr::StandardNormal;
use std::f64::consts::PI;

/// Heavy-tailed step generator with stability index `lambda`.
///
/// Each coordinate is `u / |v|^(1/λ)` with `u ~ N(0, σ²)` and
/// `v ~ N(0, 1)`. Most steps are small; a few are very large.
///
/// A divisor of zero (or a quotient that overflows) is handled by
/// redrawing `v`, and a numerator that overflows by redrawing `u`, so
/// every coordinate of a step is finite.
///
/// # References
///
/// Mantegna (1994), "Fast, accurate algorithm for numerical simulation
/// of Lévy stable stochastic processes"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevyFlight {
    lambda: f64,
    sigma: f64,
}

impl LevyFlight {
    /// Creates a generator.
    ///
    /// `lambda` must be in `(0, 2]` and small enough that `sigma` is still
    /// a finite positive number (roughly `lambda > 3.2e-4`).
    pub fn new(lambda: f64) -> Result<Self, ConfigError> {
        let out_of_range = ConfigError::OutOfRange {
            name: "lambda",
            value: lambda,
            min: 0.0,
            max: 2.0,
        };
        if !(lambda > 0.0 && lambda <= 2.0) {
            return Err(out_of_range);
        }
        let sigma = Self::sigma(lambda);
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(out_of_range);
        }
        Ok(Self { lambda, sigma })
    }

    /// Scale of the numerator distribution:
    /// `(Γ(1+λ)·sin(πλ/2) / (Γ((1+λ)/2)·λ·2^((λ-1)/2)))^(1/λ)`.
    pub fn sigma(lambda: f64) -> f64 {
        let num = gamma(1.0 + lambda) * (PI * lambda / 2.0).sin();
        let den = gamma((1.0 + lambda) / 2.0) * lambda * 2f64.powf((lambda - 1.0) / 2.0);
        (num / den).powf(1.0 / lambda)
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn sigma_value(&self) -> f64 {
        self.sigma
    }

    /// Draws one step vector of length `dim`.
    pub fn step<R: Rng>(&self, dim: usize, rng: &mut R) -> Vec<f64> {
        let exponent = 1.0 / self.lambda;
        (0..dim)
            .map(|_| {
                let u = loop {
                    let u = self.sigma * rng.sample::<f64, _>(StandardNormal);
                    if u.is_finite() {
                        break u;
                    }
                };
                levy_coordinate(u, exponent, || rng.sample(StandardNormal))
            })
            .collect()
    }
}

/// `u / |v|^exponent`, redrawing `v` until the quotient is finite.
///
/// `u` must be finite. Any `|v| >= 1` then yields a finite quotient, so
/// the loop ends with probability one for a normal `v`.
fn levy_coordinate(u: f64, exponent: f64, mut draw_v: impl FnMut() -> f64) -> f64 {
    loop {
        let v = draw_v();
        let step = u / v.abs().powf(exponent);
        if step.is_finite() {
            return step;
        }
    }
}

/// Gamma function for `x > 0` via the Lanczos series.
fn gamma(x: f64) -> f64 {
    ln_gamma(x).exp()
}

fn ln_gamma(x: f64) -> f64 {
    const COEF: [f64; 6] = [
        76.180_091_729_471_46,
        -86.505_320_329_416_77,
        24.014_098_240_830_91,
        -1.231_739_572_450_155,
        0.120_865_097_386_617_9e-2,
        -0.539_523_938_495_3e-5,
    ];

    let tmp = x + 5.5;
    let tmp = tmp - (x + 0.5) * tmp.ln();
    let mut ser = 1.000_000_000_190_015;
    let mut y = x;
    for c in COEF {
        y += 1.0;
        ser += c / y;
    }
    -tmp + (2.506_628_274_631_000_5 * ser / x).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_gamma_known_values() {
        assert!((gamma(1.0) - 1.0).abs() < 1e-9);
        assert!((gamma(5.0) - 24.0).abs() < 1e-7);
        assert!((gamma(0.5) - PI.sqrt()).abs() < 1e-9);
        assert!((gamma(2.5) - 1.329_340_388_179_137).abs() < 1e-9);
    }

    #[test]
    fn test_sigma_for_standard_lambda() {
        let sigma = LevyFlight::sigma(1.5);
        assert!((sigma - 0.696_575).abs() < 1e-3, "got {sigma}");
    }

    #[test]
    fn test_sigma_vanishes_at_lambda_two() {
        // λ = 2: Γ(3)·sin(π) = 0, so the numerator collapses.
        assert!(LevyFlight::sigma(2.0).abs() < 1e-6);
    }

    #[test]
    fn test_new_rejects_bad_lambda() {
        assert!(LevyFlight::new(0.0).is_err());
        assert!(LevyFlight::new(-1.0).is_err());
        assert!(LevyFlight::new(2.5).is_err());
        assert!(LevyFlight::new(f64::NAN).is_err());
        assert!(LevyFlight::new(1.5).is_ok());
    }

    #[test]
    fn test_new_rejects_overflowing_sigma() {
        assert!(!LevyFlight::sigma(1e-4).is_finite());
        assert!(matches!(
            LevyFlight::new(1e-4),
            Err(ConfigError::OutOfRange { name: "lambda", .. })
        ));
    }

    #[test]
    fn test_small_lambda_steps_terminate() {
        let levy = LevyFlight::new(1e-3).unwrap();
        assert!(levy.sigma_value().is_finite());
        let mut rng = create_rng(42);
        for _ in 0..50 {
            assert!(levy.step(8, &mut rng).iter().all(|s| s.is_finite()));
        }
    }

    #[test]
    fn test_coordinate_redraws_zero_and_subnormal_divisor() {
        // 0.0 divides to infinity; the subnormal divisor overflows the quotient.
        let u = 1e300;
        let mut draws = [0.0, 5e-324, -1.0].into_iter();
        let mut calls = 0;
        let step = levy_coordinate(u, 1.0 / 1.5, || {
            calls += 1;
            draws.next().expect("ran out of draws")
        });
        assert_eq!(step, u);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_coordinate_accepts_first_finite_draw() {
        let step = levy_coordinate(0.5, 2.0, || 0.5);
        assert!((step - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_step_shape_and_finiteness() {
        let levy = LevyFlight::new(1.5).unwrap();
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let step = levy.step(6, &mut rng);
            assert_eq!(step.len(), 6);
            assert!(step.iter().all(|s| s.is_finite()));
        }
    }

    #[test]
    fn test_step_is_heavy_tailed() {
        // Median magnitude stays small while the extremes are far larger.
        let levy = LevyFlight::new(1.5).unwrap();
        let mut rng = create_rng(7);
        let mut mags: Vec<f64> = levy.step(20_000, &mut rng).iter().map(|s| s.abs()).collect();
        mags.sort_by(f64::total_cmp);

        let median = mags[mags.len() / 2];
        let max = mags[mags.len() - 1];
        assert!(median < 2.0, "median {median}");
        assert!(max > 20.0 * median, "max {max}, median {median}");
    }

    proptest! {
        #[test]
        fn prop_steps_finite(lambda in 0.001f64..=2.0, seed in any::<u64>()) {
            let levy = LevyFlight::new(lambda).unwrap();
            let mut rng = create_rng(seed);
            let step = levy.step(16, &mut rng);
            prop_assert!(step.iter().all(|s| s.is_finite()));
        }
    }
}
