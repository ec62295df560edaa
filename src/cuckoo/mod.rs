//! Binary Cuckoo Search for the 0/1 knapsack problem.
//!
//! Each nest is a real vector; its knapsack selection is obtained by a
//! stochastic sigmoid threshold per coordinate. Every iteration:
//!
//! 1. **Exploration**: each nest takes a scaled Lévy-flight step; the
//!    candidate replaces the nest only if its fitness is strictly better.
//! 2. **Abandonment**: the `floor(Pa · n)` worst nests are discarded and
//!    redrawn uniformly at random.
//!
//! Selections over the capacity score [`INFEASIBLE_FITNESS`] regardless of
//! how far over they are.
//!
//! # References
//!
//! - Yang & Deb (2009), "Cuckoo Search via Lévy Flights"
//! - Mantegna (1994), Lévy stable step generation

mod binary;
mod config;
mod levy;
mod runner;
mod types;

pub use binary::{binarize, sigmoid};
pub use config::CuckooConfig;
pub use levy::LevyFlight;
pub use runner::{cuckoo_search_knapsack, CuckooResult, CuckooRunner};
pub use types::{abandon_count, KnapsackProblem, Nest, NestPopulation, INFEASIBLE_FITNESS};
