//! Population-based swarm metaheuristics.
//!
//! Provides two independent optimizers:
//!
//! - **Particle Swarm Optimization (PSO)**: continuous-domain maximization
//!   of a scalar objective over real vectors, driven by inertia, cognitive
//!   (personal-best) and social (global-best) attraction.
//! - **Binary Cuckoo Search**: 0/1 knapsack maximization using real-valued
//!   nests, sigmoid binarization, Lévy-flight perturbation and abandonment
//!   of the worst nests.
//!
//! # Architecture
//!
//! The two algorithms share nothing but the error types and RNG helpers.
//! Each keeps its search state in an explicit value ([`pso::Swarm`],
//! [`cuckoo::NestPopulation`]) whose per-iteration passes can be driven
//! and inspected in isolation; the runners only sequence those passes.
//!
//! Both maximize: higher fitness is better.

pub mod console;
pub mod cuckoo;
pub mod error;
pub mod pso;
pub mod random;

pub use error::{ConfigError, InputError};
