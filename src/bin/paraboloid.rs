//! Maximizes `-(x² + y² - 4x - 6y)` with a 20-particle swarm and prints
//! the solution.

use tracing_subscriber::EnvFilter;
use u_swarm::pso::{Paraboloid, PsoConfig, PsoRunner};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = PsoConfig::new(2, 20, 5000, 2.0);
    let result = PsoRunner::run(&Paraboloid::reference(), &config)?;

    if result.stopped_early {
        println!("Early stopping at iteration {}", result.iterations - 1);
    }
    println!("SOLUTION FOUND:");
    println!("  Position: {:?}", result.best_position);
    println!("  Fitness: {}", result.best_fitness);
    Ok(())
}
