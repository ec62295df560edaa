//! Knapsack instance, nests and population state for Cuckoo Search.

use super::binary::binarize;
use super::levy::LevyFlight;
use crate::error::ConfigError;
use rand::Rng;
use tracing::trace;

/// Fitness assigned to any selection that exceeds the capacity.
pub const INFEASIBLE_FITNESS: f64 = -1.0;

/// A 0/1 knapsack instance. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackProblem {
    weights: Vec<f64>,
    values: Vec<f64>,
    capacity: f64,
}

impl KnapsackProblem {
    /// Validates and builds an instance.
    ///
    /// Requires at least one item, equal-length `weights` and `values`,
    /// positive finite weights, finite values and a positive finite capacity.
    pub fn new(weights: Vec<f64>, values: Vec<f64>, capacity: f64) -> Result<Self, ConfigError> {
        if weights.is_empty() {
            return Err(ConfigError::NonPositive { name: "item count" });
        }
        if values.len() != weights.len() {
            return Err(ConfigError::LengthMismatch {
                name: "values",
                expected: weights.len(),
                actual: values.len(),
            });
        }
        if let Some(index) = weights.iter().position(|w| !w.is_finite()) {
            return Err(ConfigError::NotFinite {
                name: "weights",
                index,
            });
        }
        if weights.iter().any(|&w| w <= 0.0) {
            return Err(ConfigError::NonPositive { name: "weights" });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(ConfigError::NotFinite {
                name: "values",
                index,
            });
        }
        if !capacity.is_finite() {
            return Err(ConfigError::NotFinite {
                name: "capacity",
                index: 0,
            });
        }
        if capacity <= 0.0 {
            return Err(ConfigError::NonPositive { name: "capacity" });
        }
        Ok(Self {
            weights,
            values,
            capacity,
        })
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn total_weight(&self, selection: &[bool]) -> f64 {
        sum_selected(selection, &self.weights)
    }

    pub fn total_value(&self, selection: &[bool]) -> f64 {
        sum_selected(selection, &self.values)
    }

    pub fn is_feasible(&self, selection: &[bool]) -> bool {
        self.total_weight(selection) <= self.capacity
    }

    /// Total value of the selection, or [`INFEASIBLE_FITNESS`] when it
    /// exceeds the capacity by any amount.
    pub fn fitness(&self, selection: &[bool]) -> f64 {
        if self.is_feasible(selection) {
            self.total_value(selection)
        } else {
            INFEASIBLE_FITNESS
        }
    }
}

fn sum_selected(selection: &[bool], amounts: &[f64]) -> f64 {
    selection
        .iter()
        .zip(amounts)
        .filter(|&(&bit, _)| bit)
        .map(|(_, &a)| a)
        .sum()
}

/// A real-valued nest and the selection derived from it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nest {
    pub real: Vec<f64>,
    pub binary: Vec<bool>,
    pub fitness: f64,
}

impl Nest {
    /// Binarizes `real` with fresh draws and evaluates the selection.
    pub fn from_real<R: Rng>(real: Vec<f64>, problem: &KnapsackProblem, rng: &mut R) -> Self {
        let binary = binarize(&real, rng);
        let fitness = problem.fitness(&binary);
        Self {
            real,
            binary,
            fitness,
        }
    }

    /// A nest drawn uniformly from `[lo, hi)` in every coordinate.
    pub fn random<R: Rng>(problem: &KnapsackProblem, (lo, hi): (f64, f64), rng: &mut R) -> Self {
        let real = (0..problem.len()).map(|_| rng.random_range(lo..hi)).collect();
        Self::from_real(real, problem, rng)
    }
}

/// Explicit Cuckoo Search state: the nests and the best nest seen so far.
///
/// [`explore`](NestPopulation::explore) and
/// [`abandon`](NestPopulation::abandon) are the two passes of one
/// iteration. The best record is only written inside those passes.
#[derive(Debug, Clone)]
pub struct NestPopulation {
    nests: Vec<Nest>,
    best: Nest,
}

impl NestPopulation {
    /// Draws `size` random nests in `bounds` and records the best one
    /// (lowest index among equals).
    pub fn initialize<R: Rng>(
        problem: &KnapsackProblem,
        size: usize,
        bounds: (f64, f64),
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::NonPositive {
                name: "population_size",
            });
        }
        let nests: Vec<Nest> = (0..size).map(|_| Nest::random(problem, bounds, rng)).collect();

        let mut best = &nests[0];
        for nest in &nests[1..] {
            if nest.fitness > best.fitness {
                best = nest;
            }
        }
        let best = best.clone();

        Ok(Self { nests, best })
    }

    /// Exploration pass: a Lévy step from every nest, kept only on strict
    /// improvement.
    pub fn explore<R: Rng>(
        &mut self,
        problem: &KnapsackProblem,
        levy: &LevyFlight,
        step_scale: f64,
        rng: &mut R,
    ) {
        let dim = problem.len();
        for i in 0..self.nests.len() {
            let step = levy.step(dim, rng);
            let real: Vec<f64> = self.nests[i]
                .real
                .iter()
                .zip(&step)
                .map(|(x, s)| x + step_scale * s)
                .collect();
            let candidate = Nest::from_real(real, problem, rng);

            if candidate.fitness > self.nests[i].fitness {
                self.nests[i] = candidate;
                self.record(i);
            }
        }
    }

    /// Abandonment pass: replaces the `floor(fraction · n)` lowest-fitness
    /// nests (ties by index) with fresh random nests.
    ///
    /// Returns the number of nests replaced.
    pub fn abandon<R: Rng>(
        &mut self,
        problem: &KnapsackProblem,
        fraction: f64,
        bounds: (f64, f64),
        rng: &mut R,
    ) -> usize {
        let count = abandon_count(fraction, self.nests.len());
        for idx in self.worst_indices(count) {
            self.nests[idx] = Nest::random(problem, bounds, rng);
            self.record(idx);
        }
        count
    }

    /// Indices of the `count` lowest-fitness nests, ascending by fitness
    /// with ties in population order.
    pub fn worst_indices(&self, count: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.nests.len()).collect();
        // `sort_by` is stable, so equal fitness keeps index order.
        order.sort_by(|&a, &b| self.nests[a].fitness.total_cmp(&self.nests[b].fitness));
        order.truncate(count);
        order
    }

    pub fn nests(&self) -> &[Nest] {
        &self.nests
    }

    pub fn best(&self) -> &Nest {
        &self.best
    }

    fn record(&mut self, idx: usize) {
        let nest = &self.nests[idx];
        if nest.fitness > self.best.fitness {
            trace!(nest = idx, fitness = nest.fitness, "best nest improved");
            self.best = nest.clone();
        }
    }
}

/// `floor(fraction · n)`.
pub fn abandon_count(fraction: f64, n: usize) -> usize {
    (fraction * n as f64).floor() as usize
}
