//! Objective trait, particles and swarm state for PSO.

use super::config::PsoConfig;
use crate::error::ConfigError;
use rand::Rng;

/// Defines a continuous objective for PSO.
///
/// PSO **maximizes** the fitness. Any `Fn(&[f64]) -> f64` closure is an
/// objective of unconstrained dimensionality.
///
/// # Examples
///
/// ```
/// use u_swarm::pso::PsoObjective;
///
/// let neg_sphere = |x: &[f64]| -x.iter().map(|v| v * v).sum::<f64>();
/// assert_eq!(neg_sphere.fitness(&[0.0, 0.0]), 0.0);
/// ```
pub trait PsoObjective: Send + Sync {
    /// Computes the fitness of a position. Higher is better.
    fn fitness(&self, position: &[f64]) -> f64;

    /// The dimensionality this objective is defined for, if fixed.
    fn dimensions(&self) -> Option<usize> {
        None
    }
}

impl<F> PsoObjective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn fitness(&self, position: &[f64]) -> f64 {
        self(position)
    }
}

/// Concave paraboloid `-Σ (x_i² - 2·c_i·x_i)` with its maximum at `center`.
///
/// The maximum value is `Σ c_i²`.
#[derive(Debug, Clone, PartialEq)]
pub struct Paraboloid {
    center: Vec<f64>,
}

impl Paraboloid {
    pub fn new(center: Vec<f64>) -> Self {
        Self { center }
    }

    /// The 2-D reference objective `-(x² + y² - 4x - 6y)`,
    /// maximum `13` at `(2, 3)`.
    pub fn reference() -> Self {
        Self::new(vec![2.0, 3.0])
    }

    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// Fitness at the center.
    pub fn optimum_fitness(&self) -> f64 {
        self.center.iter().map(|c| c * c).sum()
    }
}

impl PsoObjective for Paraboloid {
    fn fitness(&self, position: &[f64]) -> f64 {
        debug_assert_eq!(position.len(), self.center.len(), "position length");
        -position
            .iter()
            .zip(&self.center)
            .map(|(x, c)| x * x - 2.0 * c * x)
            .sum::<f64>()
    }

    fn dimensions(&self) -> Option<usize> {
        Some(self.center.len())
    }
}

/// One candidate solution in the swarm.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Particle {
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub personal_best_position: Vec<f64>,
    pub personal_best_fitness: f64,
}

/// Explicit swarm search state: all particles plus the global best.
///
/// The runner drives it with [`evaluate`](Swarm::evaluate) followed by
/// [`update`](Swarm::update); both are public so a single iteration can
/// be inspected in isolation.
#[derive(Debug, Clone)]
pub struct Swarm {
    particles: Vec<Particle>,
    global_best_position: Vec<f64>,
    global_best_fitness: f64,
}

impl Swarm {
    /// Creates a swarm with uniformly random positions and velocities.
    ///
    /// Personal bests start at the initial positions. The global best is
    /// unset (`-∞`, zero position) until the first [`evaluate`](Swarm::evaluate).
    ///
    /// Fails with [`ConfigError::DimensionMismatch`] when the objective has a
    /// fixed dimensionality different from `config.dimensions`.
    pub fn initialize<O, R>(
        objective: &O,
        config: &PsoConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError>
    where
        O: PsoObjective + ?Sized,
        R: Rng,
    {
        let d = config.dimensions;
        if let Some(expected) = objective.dimensions() {
            if expected != d {
                return Err(ConfigError::DimensionMismatch { expected, actual: d });
            }
        }
        let (pos_lo, pos_hi) = config.position_bounds;
        let (vel_lo, vel_hi) = config.velocity_bounds;

        let particles = (0..config.num_particles)
            .map(|_| {
                let position: Vec<f64> = (0..d).map(|_| rng.random_range(pos_lo..pos_hi)).collect();
                let velocity: Vec<f64> = (0..d).map(|_| rng.random_range(vel_lo..vel_hi)).collect();
                let personal_best_fitness = objective.fitness(&position);
                Particle {
                    personal_best_position: position.clone(),
                    position,
                    velocity,
                    personal_best_fitness,
                }
            })
            .collect();

        Ok(Self {
            particles,
            global_best_position: vec![0.0; d],
            global_best_fitness: f64::NEG_INFINITY,
        })
    }

    /// Evaluation pass over the whole swarm.
    ///
    /// Updates personal and global bests on strict improvement and returns
    /// the global best fitness after the pass.
    pub fn evaluate<O>(&mut self, objective: &O) -> f64
    where
        O: PsoObjective + ?Sized,
    {
        for p in &mut self.particles {
            let fitness = objective.fitness(&p.position);

            if fitness > p.personal_best_fitness {
                p.personal_best_fitness = fitness;
                p.personal_best_position.clone_from(&p.position);
            }

            if fitness > self.global_best_fitness {
                self.global_best_fitness = fitness;
                self.global_best_position.clone_from(&p.position);
            }
        }
        self.global_best_fitness
    }

    /// Update pass: new velocity and position for every particle.
    ///
    /// Draws `r1, r2 ∈ [0, 1)` once per particle. Positions are not clamped.
    pub fn update<R: Rng>(&mut self, config: &PsoConfig, rng: &mut R) {
        let w = config.inertia;
        let c1 = config.cognitive;
        let c2 = config.social;

        for p in &mut self.particles {
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();

            for (j, v) in p.velocity.iter_mut().enumerate() {
                let x = p.position[j];
                let cognitive = c1 * r1 * (p.personal_best_position[j] - x);
                let social = c2 * r2 * (self.global_best_position[j] - x);
                *v = w * *v + cognitive + social;
            }
            for (x, v) in p.position.iter_mut().zip(&p.velocity) {
                *x += v;
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn global_best_position(&self) -> &[f64] {
        &self.global_best_position
    }

    pub fn global_best_fitness(&self) -> f64 {
        self.global_best_fitness
    }
}
