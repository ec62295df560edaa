//! PSO execution loop.

use super::config::PsoConfig;
use super::types::{Paraboloid, PsoObjective, Swarm};
use crate::error::ConfigError;
use crate::random::rng_from_seed;
use rand::Rng;
use tracing::{debug, info, trace};

/// Upper bound on the history entries reserved up front.
const MAX_HISTORY_RESERVE: usize = 1 << 16;

/// Result of a PSO run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoResult {
    /// Best position found.
    pub best_position: Vec<f64>,

    /// Fitness of the best position.
    pub best_fitness: f64,

    /// Number of evaluation passes performed.
    pub iterations: usize,

    /// Whether the run ended because the fitness threshold was reached.
    pub stopped_early: bool,

    /// Global best fitness after each evaluation pass.
    pub fitness_history: Vec<f64>,
}

/// Executes Particle Swarm Optimization.
pub struct PsoRunner;

impl PsoRunner {
    /// Runs PSO with an RNG built from `config.seed`.
    pub fn run<O>(objective: &O, config: &PsoConfig) -> Result<PsoResult, ConfigError>
    where
        O: PsoObjective + ?Sized,
    {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(objective, config, &mut rng)
    }

    /// Runs PSO with a caller-supplied RNG. `config.seed` is ignored.
    pub fn run_with_rng<O, R>(
        objective: &O,
        config: &PsoConfig,
        rng: &mut R,
    ) -> Result<PsoResult, ConfigError>
    where
        O: PsoObjective + ?Sized,
        R: Rng,
    {
        config.validate()?;

        debug!(
            dimensions = config.dimensions,
            particles = config.num_particles,
            max_iterations = config.max_iterations,
            threshold = config.threshold,
            "starting particle swarm"
        );

        let mut swarm = Swarm::initialize(objective, config, rng)?;
        let mut fitness_history = Vec::with_capacity(config.max_iterations.min(MAX_HISTORY_RESERVE));
        let mut stopped_early = false;
        let mut iterations = 0usize;

        for iteration in 0..config.max_iterations {
            let previous = swarm.global_best_fitness();
            let best = swarm.evaluate(objective);
            iterations += 1;
            fitness_history.push(best);

            if best > previous {
                trace!(iteration, fitness = best, "global best improved");
            }

            if best >= config.threshold {
                info!(iteration, fitness = best, "early stopping");
                stopped_early = true;
                break;
            }

            swarm.update(config, rng);
        }

        info!(
            iterations,
            fitness = swarm.global_best_fitness(),
            stopped_early,
            "particle swarm finished"
        );

        Ok(PsoResult {
            best_position: swarm.global_best_position().to_vec(),
            best_fitness: swarm.global_best_fitness(),
            iterations,
            stopped_early,
            fitness_history,
        })
    }
}

/// Maximizes the reference paraboloid `-(x² + y² - 4x - 6y)`.
///
/// Returns the best position and its fitness. `dimensions` must be 2.
///
/// # Examples
///
/// ```
/// use u_swarm::pso::particle_swarm_optimization;
///
/// let (position, fitness) = particle_swarm_optimization(2, 20, 5000, 2.0).unwrap();
/// assert_eq!(position.len(), 2);
/// assert!(fitness >= 2.0);
/// ```
pub fn particle_swarm_optimization(
    dimensions: usize,
    num_particles: usize,
    max_iterations: usize,
    threshold: f64,
) -> Result<(Vec<f64>, f64), ConfigError> {
    let config = PsoConfig::new(dimensions, num_particles, max_iterations, threshold);
    let result = PsoRunner::run(&Paraboloid::reference(), &config)?;
    Ok((result.best_position, result.best_fitness))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenario_stops_early() {
        let objective = Paraboloid::reference();
        let config = PsoConfig::new(2, 20, 5000, 2.0).with_seed(42);

        let result = PsoRunner::run(&objective, &config).unwrap();

        assert!(result.stopped_early);
        assert!(result.best_fitness >= 2.0);
        assert!(result.best_fitness <= 13.0 + 1e-12);
        assert!(result.iterations < 5000);
        assert_eq!(result.fitness_history.len(), result.iterations);
        // Stops on the first pass that reaches the threshold.
        let (last, earlier) = result.fitness_history.split_last().unwrap();
        assert!(*last >= 2.0);
        assert!(earlier.iter().all(|&f| f < 2.0));
    }

    #[test]
    fn test_converges_to_paraboloid_maximum() {
        let objective = Paraboloid::reference();
        let config = PsoConfig::new(2, 20, 1000, f64::INFINITY).with_seed(42);

        let result = PsoRunner::run(&objective, &config).unwrap();

        assert!(!result.stopped_early);
        assert_eq!(result.iterations, 1000);
        assert!(
            result.best_fitness > 13.0 - 1e-4,
            "expected fitness near 13, got {}",
            result.best_fitness
        );
        assert!((result.best_position[0] - 2.0).abs() < 1e-2);
        assert!((result.best_position[1] - 3.0).abs() < 1e-2);
    }

    #[test]
    fn test_fitness_history_non_decreasing() {
        let objective = Paraboloid::new(vec![1.0, -2.0, 0.5]);
        let config = PsoConfig::new(3, 10, 300, f64::INFINITY).with_seed(7);

        let result = PsoRunner::run(&objective, &config).unwrap();

        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "global best should be non-decreasing: {} < {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_threshold_reached_on_first_pass() {
        let objective = |_: &[f64]| 1.0;
        let config = PsoConfig::new(4, 5, 100, 0.5).with_seed(1);

        let result = PsoRunner::run(&objective, &config).unwrap();

        assert!(result.stopped_early);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let objective = Paraboloid::reference();
        let config = PsoConfig::new(2, 10, 50, f64::INFINITY).with_seed(123);

        let a = PsoRunner::run(&objective, &config).unwrap();
        let b = PsoRunner::run(&objective, &config).unwrap();

        assert_eq!(a.best_position, b.best_position);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let config = PsoConfig::new(3, 10, 50, 2.0);
        let err = PsoRunner::run(&Paraboloid::reference(), &config).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_huge_iteration_budget_does_not_preallocate() {
        let objective = |_: &[f64]| 1.0;
        let config = PsoConfig::new(2, 3, usize::MAX, 0.5).with_seed(4);

        let result = PsoRunner::run(&objective, &config).unwrap();

        assert!(result.stopped_early);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let objective = Paraboloid::reference();
        assert!(PsoRunner::run(&objective, &PsoConfig::new(2, 0, 50, 2.0)).is_err());
        assert!(PsoRunner::run(&objective, &PsoConfig::new(2, 10, 0, 2.0)).is_err());
    }

    #[test]
    fn test_entry_point() {
        let (position, fitness) = particle_swarm_optimization(2, 20, 5000, 2.0).unwrap();
        assert_eq!(position.len(), 2);
        assert!(fitness >= 2.0);
        assert!(particle_swarm_optimization(0, 20, 5000, 2.0).is_err());
    }
}
