//! Console entry point: reads a knapsack instance and solves it with
//! binary Cuckoo Search.
//!
//! Set `RUST_LOG=debug` to see search progress on stderr.

use anyhow::Context;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;
use u_swarm::console::{read_session, write_report};
use u_swarm::cuckoo::CuckooRunner;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();

    let session = read_session(stdin.lock(), stdout.lock()).context("invalid knapsack input")?;
    let result = CuckooRunner::run(&session.problem, &session.config)?;

    let mut out = stdout.lock();
    write_report(&mut out, &session.problem, &result)?;
    out.flush()?;
    Ok(())
}
