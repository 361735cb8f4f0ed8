//! Command-line interface for param-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **solve**: compare two symbol sequences with one solving strategy
//! - **batch**: run a file of comparison pairs and emit tabular results
//! - **encode**: write the weighted-CNF artifact for a pair without solving
//!
//! ## Usage
//!
//! ```text
//! # Exact distance between two canonical words
//! param-solver solve ABAB ABABAB
//!
//! # Cast-list style input: symbols are comma-separated tokens
//! param-solver solve --tokens "Medee,Jason,Medee" "Thesee,Jason,Thesee"
//!
//! # Exact solve with a 30 second wall-clock budget
//! param-solver solve ABABAB ABCBCACB --timeout 30
//!
//! # Delegate to an external MaxSAT solver
//! param-solver solve ABAB ABABAB --strategy maxsat --solver-bin /opt/maxhs
//!
//! # JSON output for scripting
//! param-solver solve ABAB ABABAB --format json
//! ```

use clap::{Parser, Subcommand};

use crate::core::word::{normalize, normalize_chars, Alphabet, ParameterizedWord};
use crate::solver::distance::EditCosts;

pub mod batch;
pub mod encode;
pub mod solve;
pub mod worker;

#[derive(Parser)]
#[command(name = "param-solver")]
#[command(version)]
#[command(about = "Compute renaming-aware distances between symbol sequences")]
#[command(
    long_about = "param-solver computes a distance between two symbol sequences under the constraint that the mapping between their alphabets is an injective renaming, not an identity comparison.\n\nThree strategies are available:\n- exact: exhaustive enumeration of renamings, exponential in alphabet size only\n- greedy: polynomial-time heuristic, no optimality guarantee\n- maxsat: reduction to weighted CNF, solved by an external MaxHS-compatible binary"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two symbol sequences
    Solve(solve::SolveArgs),

    /// Compare every pair listed in a TSV file
    Batch(batch::BatchArgs),

    /// Write the weighted-CNF encoding of a pair without solving it
    Encode(encode::EncodeArgs),

    /// Internal worker for the bounded execution harness
    #[command(hide = true)]
    SolveWorker(worker::WorkerArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Solving strategy selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Exact FPT enumeration of injective renamings
    Exact,
    /// Greedy alignment-guided heuristic
    Greedy,
    /// Weighted-MaxSAT reduction via an external solver
    Maxsat,
}

/// Edit cost presets exposed on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum CostPreset {
    /// All operations cost 1 (classical Levenshtein)
    Uniform,
    /// Insertions and deletions cost 10, substitutions 1
    IndelHeavy,
}

impl CostPreset {
    #[must_use]
    pub fn costs(self) -> EditCosts {
        match self {
            Self::Uniform => EditCosts::uniform(),
            Self::IndelHeavy => EditCosts::indel_heavy(),
        }
    }
}

/// Normalize a CLI word argument: characters by default, comma-separated
/// tokens with `--tokens`.
pub(crate) fn parse_word(text: &str, tokens: bool) -> (ParameterizedWord, Alphabet) {
    if tokens {
        normalize(text.split(',').map(str::trim).filter(|s| !s.is_empty()))
    } else {
        normalize_chars(text)
    }
}
