//! PSO configuration.

use crate::error::ConfigError;

/// Configuration for Particle Swarm Optimization.
///
/// # Examples
///
/// ```
/// use u_swarm::pso::PsoConfig;
///
/// let config = PsoConfig::new(2, 20, 5000, 2.0)
///     .with_coefficients(0.5, 1.2, 1.4)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Dimensionality of the search space.
    pub dimensions: usize,

    /// Number of particles in the swarm.
    pub num_particles: usize,

    /// Maximum number of evaluate/update iterations.
    pub max_iterations: usize,

    /// Early-stop fitness. The run ends as soon as the global best
    /// reaches this value. Use `f64::INFINITY` to disable.
    pub threshold: f64,

    /// Inertia weight `w` applied to the previous velocity.
    pub inertia: f64,

    /// Cognitive coefficient `c1` (attraction to the personal best).
    pub cognitive: f64,

    /// Social coefficient `c2` (attraction to the global best).
    pub social: f64,

    /// Range for the initial position of every coordinate.
    ///
    /// Positions are not clamped to this range after initialization.
    pub position_bounds: (f64, f64),

    /// Range for the initial velocity of every coordinate.
    pub velocity_bounds: (f64, f64),

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl PsoConfig {
    /// Creates a configuration with the standard coefficients
    /// (`w = 0.5`, `c1 = 1.2`, `c2 = 1.4`).
    pub fn new(dimensions: usize, num_particles: usize, max_iterations: usize, threshold: f64) -> Self {
        Self {
            dimensions,
            num_particles,
            max_iterations,
            threshold,
            inertia: 0.5,
            cognitive: 1.2,
            social: 1.4,
            position_bounds: (-10.0, 10.0),
            velocity_bounds: (-1.0, 1.0),
            seed: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets inertia, cognitive and social coefficients.
    pub fn with_coefficients(mut self, inertia: f64, cognitive: f64, social: f64) -> Self {
        self.inertia = inertia;
        self.cognitive = cognitive;
        self.social = social;
        self
    }

    pub fn with_position_bounds(mut self, lo: f64, hi: f64) -> Self {
        self.position_bounds = (lo, hi);
        self
    }

    pub fn with_velocity_bounds(mut self, lo: f64, hi: f64) -> Self {
        self.velocity_bounds = (lo, hi);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimensions == 0 {
            return Err(ConfigError::NonPositive { name: "dimensions" });
        }
        if self.num_particles == 0 {
            return Err(ConfigError::NonPositive {
                name: "num_particles",
            });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::NonPositive {
                name: "max_iterations",
            });
        }
        if self.threshold.is_nan() {
            return Err(ConfigError::NotFinite {
                name: "threshold",
                index: 0,
            });
        }
        for (name, value) in [
            ("inertia", self.inertia),
            ("cognitive", self.cognitive),
            ("social", self.social),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange {
                    name,
                    value,
                    min: 0.0,
                    max: f64::INFINITY,
                });
            }
        }
        check_bounds("position_bounds", self.position_bounds)?;
        check_bounds("velocity_bounds", self.velocity_bounds)?;
        Ok(())
    }
}

fn check_bounds(name: &'static str, (lo, hi): (f64, f64)) -> Result<(), ConfigError> {
    if lo.is_finite() && hi.is_finite() && lo < hi {
        Ok(())
    } else {
        Err(ConfigError::InvalidBounds { name, lo, hi })
    }
}
