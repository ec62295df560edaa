//! Cuckoo Search configuration.

use super::levy::LevyFlight;
use crate::error::ConfigError;

/// Configuration for binary Cuckoo Search.
///
/// # Examples
///
/// ```
/// use u_swarm::cuckoo::CuckooConfig;
///
/// let config = CuckooConfig::default()
///     .with_population_size(40)
///     .with_abandon_fraction(0.2)
///     .with_max_iterations(1000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CuckooConfig {
    /// Number of nests `n`.
    pub population_size: usize,

    /// Fraction `Pa` of nests abandoned each iteration, in `(0, 1)`.
    pub abandon_fraction: f64,

    /// Number of iterations `Maxt`. There is no early stop.
    pub max_iterations: usize,

    /// Multiplier applied to every Lévy step.
    pub step_scale: f64,

    /// Lévy stability index, in `(0, 2]`. Values so small that the step
    /// scale overflows are rejected by [`validate`](CuckooConfig::validate).
    pub lambda: f64,

    /// Range for freshly drawn nest coordinates.
    pub init_bounds: (f64, f64),

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for CuckooConfig {
    fn default() -> Self {
        Self {
            population_size: 25,
            abandon_fraction: 0.25,
            max_iterations: 500,
            step_scale: 0.01,
            lambda: 1.5,
            init_bounds: (-1.0, 1.0),
            seed: None,
        }
    }
}

impl CuckooConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_abandon_fraction(mut self, pa: f64) -> Self {
        self.abandon_fraction = pa;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_step_scale(mut self, scale: f64) -> Self {
        self.step_scale = scale;
        self
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_init_bounds(mut self, lo: f64, hi: f64) -> Self {
        self.init_bounds = (lo, hi);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::NonPositive {
                name: "population_size",
            });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::NonPositive {
                name: "max_iterations",
            });
        }
        if !(self.abandon_fraction > 0.0 && self.abandon_fraction < 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "abandon_fraction",
                value: self.abandon_fraction,
                min: 0.0,
                max: 1.0,
            });
        }
        if !(self.step_scale.is_finite() && self.step_scale > 0.0) {
            return Err(ConfigError::NonPositive { name: "step_scale" });
        }
        LevyFlight::new(self.lambda)?;
        let (lo, hi) = self.init_bounds;
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(ConfigError::InvalidBounds {
                name: "init_bounds",
                lo,
                hi,
            });
        }
        Ok(())
    }
}
