//! Prompt-driven collection of a knapsack instance.
//!
//! Reads one answer per line. Required answers are the item count, the
//! weights, the values and the capacity; the three search parameters fall
//! back to their defaults on an empty line.

use crate::cuckoo::{CuckooConfig, CuckooResult, KnapsackProblem};
use crate::error::{ConfigError, InputError};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// A validated knapsack instance plus search parameters.
#[derive(Debug, Clone)]
pub struct KnapsackSession {
    pub problem: KnapsackProblem,
    pub config: CuckooConfig,
}

/// Prompts on `output` and reads answers from `input`.
///
/// Fails on the first invalid answer; nothing is searched until every
/// answer has been validated.
pub fn read_session<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> Result<KnapsackSession, InputError> {
    let defaults = CuckooConfig::default();

    let line = ask(&mut input, &mut output, "Enter the number of items:")?
        .ok_or(InputError::UnexpectedEof { prompt: "item count" })?;
    let count: usize = parse_token("item count", line.trim())?;
    if count == 0 {
        return Err(ConfigError::NonPositive { name: "item count" }.into());
    }

    let weights = ask_list(
        &mut input,
        &mut output,
        "Enter the weights of the items (space-separated):",
        "weights",
        count,
    )?;
    let values = ask_list(
        &mut input,
        &mut output,
        "Enter the values of the items (space-separated):",
        "values",
        count,
    )?;

    let line = ask(&mut input, &mut output, "Enter the knapsack capacity:")?
        .ok_or(InputError::UnexpectedEof { prompt: "capacity" })?;
    let capacity: f64 = parse_token("capacity", line.trim())?;

    let population_size = ask_or_default(
        &mut input,
        &mut output,
        &format!("Enter population size (default {}):", defaults.population_size),
        "population size",
        defaults.population_size,
    )?;
    let abandon_fraction = ask_or_default(
        &mut input,
        &mut output,
        &format!(
            "Enter abandonment probability Pa (default {}):",
            defaults.abandon_fraction
        ),
        "abandonment probability",
        defaults.abandon_fraction,
    )?;
    let max_iterations = ask_or_default(
        &mut input,
        &mut output,
        &format!("Enter maximum iterations Maxt (default {}):", defaults.max_iterations),
        "maximum iterations",
        defaults.max_iterations,
    )?;

    let problem = KnapsackProblem::new(weights, values, capacity)?;
    let config = defaults
        .with_population_size(population_size)
        .with_abandon_fraction(abandon_fraction)
        .with_max_iterations(max_iterations);
    config.validate()?;

    Ok(KnapsackSession { problem, config })
}

/// Prints the selection as a 0/1 vector with its total value and weight.
pub fn write_report<W: Write>(
    mut output: W,
    problem: &KnapsackProblem,
    result: &CuckooResult,
) -> std::io::Result<()> {
    let bits: Vec<&str> = result
        .best_binary
        .iter()
        .map(|&b| if b { "1" } else { "0" })
        .collect();
    writeln!(output)?;
    writeln!(output, "Best solution (items selected): [{}]", bits.join(" "))?;
    writeln!(output, "Total value: {}", result.best_value)?;
    writeln!(output, "Total weight: {}", problem.total_weight(&result.best_binary))?;
    Ok(())
}

/// Writes `prompt` and reads one line. `None` at end of input.
fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<String>, InputError> {
    writeln!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn ask_list<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    field: &'static str,
    expected: usize,
) -> Result<Vec<f64>, InputError> {
    let line = ask(input, output, prompt)?.ok_or(InputError::UnexpectedEof { prompt: field })?;
    let list = line
        .split_whitespace()
        .map(|token| parse_token(field, token))
        .collect::<Result<Vec<f64>, _>>()?;
    if list.len() != expected {
        return Err(ConfigError::LengthMismatch {
            name: field,
            expected,
            actual: list.len(),
        }
        .into());
    }
    Ok(list)
}

fn ask_or_default<R: BufRead, W: Write, T: FromStr>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    field: &'static str,
    default: T,
) -> Result<T, InputError> {
    match ask(input, output, prompt)? {
        Some(line) if !line.trim().is_empty() => parse_token(field, line.trim()),
        _ => Ok(default),
    }
}

fn parse_token<T: FromStr>(field: &'static str, token: &str) -> Result<T, InputError> {
    token.parse().map_err(|_| InputError::Parse {
        field,
        token: token.to_string(),
    })
}
