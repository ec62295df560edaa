//! Cuckoo Search execution loop.

use super::config::CuckooConfig;
use super::levy::LevyFlight;
use super::types::{KnapsackProblem, NestPopulation};
use crate::error::ConfigError;
use crate::random::rng_from_seed;
use rand::Rng;
use tracing::{debug, info};

/// Upper bound on the history entries reserved up front.
const MAX_HISTORY_RESERVE: usize = 1 << 16;

/// Result of a Cuckoo Search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CuckooResult {
    /// Best selection found (`true` = item packed).
    pub best_binary: Vec<bool>,

    /// Real-valued nest that produced the best selection.
    pub best_real: Vec<f64>,

    /// Fitness of the best selection (its total value when feasible).
    pub best_value: f64,

    /// Total weight of the best selection.
    pub total_weight: f64,

    /// Number of iterations executed.
    pub iterations: usize,

    /// Best fitness after initialization and after each iteration.
    pub fitness_history: Vec<f64>,
}

/// Executes binary Cuckoo Search on a knapsack instance.
pub struct CuckooRunner;

impl CuckooRunner {
    /// Runs Cuckoo Search with an RNG built from `config.seed`.
    pub fn run(problem: &KnapsackProblem, config: &CuckooConfig) -> Result<CuckooResult, ConfigError> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs Cuckoo Search with a caller-supplied RNG. `config.seed` is ignored.
    pub fn run_with_rng<R: Rng>(
        problem: &KnapsackProblem,
        config: &CuckooConfig,
        rng: &mut R,
    ) -> Result<CuckooResult, ConfigError> {
        config.validate()?;
        let levy = LevyFlight::new(config.lambda)?;

        debug!(
            items = problem.len(),
            capacity = problem.capacity(),
            nests = config.population_size,
            abandon_fraction = config.abandon_fraction,
            max_iterations = config.max_iterations,
            "starting cuckoo search"
        );

        let mut population =
            NestPopulation::initialize(problem, config.population_size, config.init_bounds, rng)?;

        let mut fitness_history = Vec::with_capacity(history_capacity(config.max_iterations));
        fitness_history.push(population.best().fitness);

        for _ in 0..config.max_iterations {
            population.explore(problem, &levy, config.step_scale, rng);
            population.abandon(problem, config.abandon_fraction, config.init_bounds, rng);
            fitness_history.push(population.best().fitness);
        }

        let best = population.best();
        info!(
            fitness = best.fitness,
            iterations = config.max_iterations,
            "cuckoo search finished"
        );

        Ok(CuckooResult {
            best_binary: best.binary.clone(),
            best_real: best.real.clone(),
            best_value: best.fitness,
            total_weight: problem.total_weight(&best.binary),
            iterations: config.max_iterations,
            fitness_history,
        })
    }
}

/// One entry after initialization plus one per iteration, capped.
fn history_capacity(max_iterations: usize) -> usize {
    max_iterations.saturating_add(1).min(MAX_HISTORY_RESERVE)
}

/// Solves a knapsack instance with the given `n`, `Pa` and `Maxt`.
///
/// Returns the best selection and its value.
///
/// # Examples
///
/// ```
/// use u_swarm::cuckoo::cuckoo_search_knapsack;
///
/// let (selection, value) = cuckoo_search_knapsack(
///     vec![2.0, 3.0, 4.0, 5.0],
///     vec![3.0, 4.0, 5.0, 6.0],
///     5.0,
///     25,
///     0.25,
///     200,
/// )
/// .unwrap();
/// assert_eq!(selection.len(), 4);
/// assert!(value <= 7.0);
/// ```
pub fn cuckoo_search_knapsack(
    weights: Vec<f64>,
    values: Vec<f64>,
    capacity: f64,
    n: usize,
    pa: f64,
    max_t: usize,
) -> Result<(Vec<bool>, f64), ConfigError> {
    let problem = KnapsackProblem::new(weights, values, capacity)?;
    let config = CuckooConfig::default()
        .with_population_size(n)
        .with_abandon_fraction(pa)
        .with_max_iterations(max_t);
    let result = CuckooRunner::run(&problem, &config)?;
    Ok((result.best_binary, result.best_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuckoo::INFEASIBLE_FITNESS;

    fn small_problem() -> KnapsackProblem {
        KnapsackProblem::new(vec![2.0, 3.0, 4.0, 5.0], vec![3.0, 4.0, 5.0, 6.0], 5.0).unwrap()
    }

    #[test]
    fn test_small_instance_finds_optimum() {
        let problem = small_problem();
        for seed in 0..5 {
            let config = CuckooConfig::default().with_seed(seed);
            let result = CuckooRunner::run(&problem, &config).unwrap();

            assert_eq!(result.best_value, 7.0, "seed {seed}");
            assert_eq!(result.best_binary, vec![true, true, false, false]);
            assert_eq!(result.total_weight, 5.0);
        }
    }

    #[test]
    fn test_value_never_exceeds_optimum() {
        let problem = small_problem();
        let config = CuckooConfig::default().with_max_iterations(3).with_seed(99);
        let result = CuckooRunner::run(&problem, &config).unwrap();
        assert!(result.best_value <= 7.0);
        assert_eq!(result.best_value, problem.fitness(&result.best_binary));
    }

    #[test]
    fn test_fitness_history_non_decreasing() {
        let problem = KnapsackProblem::new(
            vec![12.0, 7.0, 11.0, 8.0, 9.0, 6.0, 5.0, 14.0, 3.0, 10.0],
            vec![24.0, 13.0, 23.0, 15.0, 16.0, 11.0, 9.0, 30.0, 4.0, 18.0],
            26.0,
        )
        .unwrap();
        let config = CuckooConfig::default().with_max_iterations(200).with_seed(42);

        let result = CuckooRunner::run(&problem, &config).unwrap();

        assert_eq!(result.iterations, 200);
        assert_eq!(result.fitness_history.len(), 201);
        for window in result.fitness_history.windows(2) {
            assert!(window[1] >= window[0]);
        }
        assert!(result.total_weight <= 26.0);
        assert!(result.best_value > 0.0);
    }

    #[test]
    fn test_all_items_too_heavy() {
        // Only the empty selection is feasible.
        let problem = KnapsackProblem::new(vec![10.0, 20.0], vec![5.0, 5.0], 1.0).unwrap();
        let config = CuckooConfig::default().with_max_iterations(50).with_seed(1);

        let result = CuckooRunner::run(&problem, &config).unwrap();

        assert!(result.best_value == 0.0 || result.best_value == INFEASIBLE_FITNESS);
        if result.best_value == 0.0 {
            assert_eq!(result.best_binary, vec![false, false]);
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let problem = small_problem();
        let config = CuckooConfig::default().with_max_iterations(30).with_seed(8);

        let a = CuckooRunner::run(&problem, &config).unwrap();
        let b = CuckooRunner::run(&problem, &config).unwrap();

        assert_eq!(a.best_binary, b.best_binary);
        assert_eq!(a.best_real, b.best_real);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_history_capacity_saturates() {
        assert_eq!(history_capacity(10), 11);
        assert_eq!(history_capacity(usize::MAX), MAX_HISTORY_RESERVE);
        assert_eq!(history_capacity(1 << 40), MAX_HISTORY_RESERVE);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let problem = small_problem();
        let config = CuckooConfig::default().with_abandon_fraction(1.0);
        assert!(CuckooRunner::run(&problem, &config).is_err());
    }

    #[test]
    fn test_entry_point_validation() {
        let err = cuckoo_search_knapsack(vec![1.0, 2.0], vec![1.0], 3.0, 25, 0.25, 10).unwrap_err();
        assert!(matches!(err, ConfigError::LengthMismatch { .. }));

        assert!(cuckoo_search_knapsack(vec![1.0], vec![1.0], 3.0, 0, 0.25, 10).is_err());
        assert!(cuckoo_search_knapsack(vec![1.0], vec![1.0], 3.0, 25, 0.0, 10).is_err());
        assert!(cuckoo_search_knapsack(vec![1.0], vec![1.0], 3.0, 25, 0.25, 0).is_err());
    }
}
