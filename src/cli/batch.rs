use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::{parse_word, solve, CostPreset, OutputFormat, Strategy};

#[derive(Args)]
pub struct BatchArgs {
    /// TSV file of comparisons: one `name<TAB>word1<TAB>word2` per line;
    /// empty lines and lines starting with `#` are skipped
    #[arg(required = true)]
    pub pairs: PathBuf,

    /// Write result rows here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Solving strategy for every pair
    #[arg(long, value_enum, default_value = "exact")]
    pub strategy: Strategy,

    /// Edit cost preset (exact and greedy strategies)
    #[arg(long, value_enum, default_value = "uniform")]
    pub costs: CostPreset,

    /// Per-pair wall-clock budget in seconds; timed-out pairs become
    /// result rows, not failures
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Treat words as comma-separated symbol tokens instead of characters
    #[arg(long)]
    pub tokens: bool,

    /// External MaxSAT solver binary (maxsat strategy)
    #[arg(long, default_value = "maxhs")]
    pub solver_bin: PathBuf,

    /// Drop the injectivity clauses (maxsat strategy)
    #[arg(long)]
    pub no_bijective: bool,
}

/// Execute the batch subcommand: the thin batch-driver loop. Comparisons
/// are independent; each row is written as soon as its pair is done.
///
/// # Errors
///
/// Returns an error on unreadable input, malformed pair lines, or a hard
/// failure from the MaxSAT path (which is never retried here).
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: BatchArgs, _format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.pairs)
        .with_context(|| format!("cannot read pairs file {}", args.pairs.display()))?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };

    writeln!(
        out,
        "pair\tdistance\tstatus\trenaming\trendered_a\trendered_b\telapsed_ms"
    )?;

    let options = solve::StrategyOptions {
        strategy: args.strategy,
        costs: args.costs.costs(),
        timeout: args.timeout.map(std::time::Duration::from_secs),
        solver_bin: args.solver_bin.clone(),
        keep_wcnf: None,
        bijective: !args.no_bijective,
    };

    for (line_number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.splitn(3, '\t');
        let (name, text_a, text_b) = match (fields.next(), fields.next(), fields.next()) {
            (Some(name), Some(a), Some(b)) => (name, a, b),
            _ => anyhow::bail!(
                "line {} of {}: expected name<TAB>word1<TAB>word2",
                line_number + 1,
                args.pairs.display()
            ),
        };

        info!(pair = name, "comparing");
        let (word_a, _) = parse_word(text_a, args.tokens);
        let (word_b, _) = parse_word(text_b, args.tokens);

        let result = solve::solve_pair(&options, &word_a, &word_b)?;

        if verbose {
            eprintln!(
                "{}: {} in {} ms",
                name,
                result
                    .distance
                    .map_or_else(|| result.status.to_string(), |d| d.to_string()),
                result.elapsed.as_millis()
            );
        }

        writeln!(out, "{}", result.tsv_row(name))?;
    }

    Ok(())
}
