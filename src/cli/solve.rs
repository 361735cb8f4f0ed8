use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use crate::cli::{parse_word, CostPreset, OutputFormat, Strategy};
use crate::core::result::{MatchResult, SolveStatus};
use crate::core::word::Alphabet;
use crate::exec::Harness;
use crate::sat::{MaxhsSolver, SatConfig};
use crate::solver::distance::EditCosts;
use crate::solver::{fpt, greedy};

#[derive(Args)]
pub struct SolveArgs {
    /// First symbol sequence
    #[arg(required = true)]
    pub word_a: String,

    /// Second symbol sequence
    #[arg(required = true)]
    pub word_b: String,

    /// Solving strategy
    #[arg(long, value_enum, default_value = "exact")]
    pub strategy: Strategy,

    /// Edit cost preset (exact and greedy strategies)
    #[arg(long, value_enum, default_value = "uniform")]
    pub costs: CostPreset,

    /// Wall-clock budget in seconds; the computation is aborted and
    /// reported as timed out when it elapses
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Treat inputs as comma-separated symbol tokens instead of characters
    #[arg(long)]
    pub tokens: bool,

    /// External MaxSAT solver binary (maxsat strategy)
    #[arg(long, default_value = "maxhs")]
    pub solver_bin: PathBuf,

    /// Keep the generated WCNF file at this path (maxsat strategy)
    #[arg(long)]
    pub keep_wcnf: Option<PathBuf>,

    /// Drop the injectivity clauses, allowing two symbols to rename to the
    /// same target (maxsat strategy)
    #[arg(long)]
    pub no_bijective: bool,
}

/// Execute the solve subcommand.
///
/// # Errors
///
/// Returns an error if the harness misbehaves or the external MaxSAT
/// solver produces no solution. Timeouts are reported as results, not
/// errors.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (word_a, alphabet_a) = parse_word(&args.word_a, args.tokens);
    let (word_b, alphabet_b) = parse_word(&args.word_b, args.tokens);

    if verbose {
        eprintln!(
            "Input A: {} positions, {} distinct symbols ({})",
            word_a.len(),
            word_a.alphabet_size(),
            word_a.canonical_text()
        );
        eprintln!(
            "Input B: {} positions, {} distinct symbols ({})",
            word_b.len(),
            word_b.alphabet_size(),
            word_b.canonical_text()
        );
    }

    let costs = args.costs.costs();
    let options = StrategyOptions {
        strategy: args.strategy,
        costs,
        timeout: args.timeout.map(Duration::from_secs),
        solver_bin: args.solver_bin.clone(),
        keep_wcnf: args.keep_wcnf.clone(),
        bijective: !args.no_bijective,
    };
    let result = solve_pair(&options, &word_a, &word_b)?;

    match format {
        OutputFormat::Text => print_text(&result, &alphabet_a, &alphabet_b, args.tokens),
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Tsv => print_tsv(&result),
    }

    Ok(())
}

/// Strategy configuration shared by the solve and batch commands.
pub(crate) struct StrategyOptions {
    pub strategy: Strategy,
    pub costs: EditCosts,
    pub timeout: Option<Duration>,
    pub solver_bin: PathBuf,
    pub keep_wcnf: Option<PathBuf>,
    pub bijective: bool,
}

/// Dispatch one comparison to the selected strategy.
pub(crate) fn solve_pair(
    options: &StrategyOptions,
    word_a: &crate::core::word::ParameterizedWord,
    word_b: &crate::core::word::ParameterizedWord,
) -> anyhow::Result<MatchResult> {
    let result = match options.strategy {
        Strategy::Exact => match options.timeout {
            Some(deadline) => {
                let harness = Harness::current()?;
                harness.run_with_timeout(word_a, word_b, options.costs, deadline)?
            }
            None => fpt::solve(word_a, word_b, options.costs).into(),
        },
        Strategy::Greedy => greedy::solve(word_a, word_b, options.costs).into(),
        Strategy::Maxsat => {
            let mut solver = MaxhsSolver::new()
                .with_bin(&options.solver_bin)
                .with_config(SatConfig {
                    bijective: options.bijective,
                });
            if let Some(deadline) = options.timeout {
                solver = solver.with_timeout(deadline);
            }
            solver.solve(word_a, word_b, options.keep_wcnf.as_deref())?
        }
    };
    Ok(result)
}

impl From<fpt::FptSolution> for MatchResult {
    fn from(solution: fpt::FptSolution) -> Self {
        MatchResult::solved(
            solution.distance,
            solution.renaming,
            solution.rendered,
            solution.elapsed,
        )
    }
}

impl From<greedy::GreedySolution> for MatchResult {
    fn from(solution: greedy::GreedySolution) -> Self {
        MatchResult::solved(
            solution.distance,
            solution.renaming,
            solution.rendered,
            solution.elapsed,
        )
    }
}

fn print_text(result: &MatchResult, alphabet_a: &Alphabet, alphabet_b: &Alphabet, tokens: bool) {
    println!("Parameterized Match Result");
    println!("{}", "=".repeat(60));

    println!("\nStatus: {}", result.status);
    match result.distance {
        Some(distance) => println!("Distance: {distance}"),
        None => println!("Distance: -"),
    }

    if let Some(renaming) = &result.renaming {
        if renaming.is_empty() {
            println!("Renaming: (empty)");
        } else if tokens {
            println!("Renaming: {}", renaming.display_with(alphabet_a, alphabet_b));
        } else {
            println!("Renaming: {renaming}");
        }
    }

    if let Some((rendered_a, rendered_b)) = &result.rendered {
        println!("\nRendered A: {rendered_a}");
        println!("Rendered B: {rendered_b}");
    }

    println!("\nElapsed: {} ms", result.elapsed.as_millis());
}

fn print_json(result: &MatchResult) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "status": result.status,
        "distance": result.distance,
        "renaming": result.renaming.as_ref().map(std::string::ToString::to_string),
        "rendered_a": result.rendered.as_ref().map(|r| r.0.clone()),
        "rendered_b": result.rendered.as_ref().map(|r| r.1.clone()),
        "elapsed_ms": result.elapsed.as_millis() as u64,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(result: &MatchResult) {
    println!("status\tdistance\trenaming\trendered_a\trendered_b\telapsed_ms");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        result.status,
        result
            .distance
            .map_or_else(String::new, |d| d.to_string()),
        result
            .renaming
            .as_ref()
            .map_or_else(String::new, std::string::ToString::to_string),
        result.rendered.as_ref().map_or("", |r| r.0.as_str()),
        result.rendered.as_ref().map_or("", |r| r.1.as_str()),
        result.elapsed.as_millis(),
    );
}

impl MatchResult {
    /// One TSV row for the batch driver, without a trailing newline.
    #[must_use]
    pub(crate) fn tsv_row(&self, pair: &str) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            pair,
            self.distance.map_or_else(String::new, |d| d.to_string()),
            self.status,
            self.renaming
                .as_ref()
                .map_or_else(String::new, std::string::ToString::to_string),
            self.rendered.as_ref().map_or("", |r| r.0.as_str()),
            self.rendered.as_ref().map_or("", |r| r.1.as_str()),
            self.elapsed.as_millis(),
        )
    }
}
