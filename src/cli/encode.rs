use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{parse_word, OutputFormat};
use crate::sat::{SatConfig, SatInstance};

#[derive(Args)]
pub struct EncodeArgs {
    /// First symbol sequence
    #[arg(required = true)]
    pub word_a: String,

    /// Second symbol sequence
    #[arg(required = true)]
    pub word_b: String,

    /// Write the WCNF file here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Treat inputs as comma-separated symbol tokens instead of characters
    #[arg(long)]
    pub tokens: bool,

    /// Drop the injectivity clauses
    #[arg(long)]
    pub no_bijective: bool,
}

/// Execute the encode subcommand: produce the boundary artifact for the
/// external MaxSAT solver without invoking it.
///
/// # Errors
///
/// Returns an error if the output file cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: EncodeArgs, _format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (word_a, alphabet_a) = parse_word(&args.word_a, args.tokens);
    let (word_b, alphabet_b) = parse_word(&args.word_b, args.tokens);

    let config = SatConfig {
        bijective: !args.no_bijective,
    };
    let mut instance = SatInstance::encode(&word_a, &word_b, &config);
    instance.add_comment(format!("input 1: {}", word_a.canonical_text()));
    instance.add_comment(format!("input 2: {}", word_b.canonical_text()));
    if args.tokens {
        instance.add_comment(format!("symbols 1: {alphabet_a}"));
        instance.add_comment(format!("symbols 2: {alphabet_b}"));
    }

    if verbose {
        eprintln!(
            "{} variables, {} clauses, hard weight {}",
            instance.num_vars(),
            instance.num_clauses(),
            instance.hard_weight()
        );
    }

    match &args.output {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            instance.write_wcnf(&mut file)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            instance.write_wcnf(&mut lock)?;
            lock.flush()?;
        }
    }

    Ok(())
}
