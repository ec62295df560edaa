//! Particle Swarm Optimization (PSO).
//!
//! A population of particles moves through a continuous search space.
//! Each particle is pulled toward the best position it has visited
//! (cognitive term) and the best position found by the whole swarm
//! (social term), while keeping part of its previous velocity (inertia).
//!
//! Every iteration is two synchronous passes: the whole swarm is evaluated
//! first, then every particle moves. The global best used by the movement
//! pass therefore always reflects the complete evaluation pass.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"

mod config;
mod runner;
mod types;

pub use config::PsoConfig;
pub use runner::{particle_swarm_optimization, PsoResult, PsoRunner};
pub use types::{Paraboloid, Particle, PsoObjective, Swarm};
