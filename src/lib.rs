//! # param-solver
//!
//! A library for computing distances between symbol sequences under
//! injective renamings ("parameterized matching").
//!
//! Two texts can use different names for the same recurring entities: two
//! editions of a play with renamed characters, two programs with renamed
//! identifiers. A plain edit distance treats every renamed occurrence as a
//! mismatch; the parameterized distance instead searches for the injective
//! mapping between the two alphabets that makes the sequences as close as
//! possible, and charges only for genuine structural differences.
//!
//! The optimization is NP-hard-flavored, so three strategies with distinct
//! trade-offs are provided:
//!
//! - **Exact FPT** ([`solver::fpt`]): enumerates every injective renaming;
//!   exponential in alphabet size, polynomial in sequence length. Wrap it
//!   in the [`exec`] harness to bound the runtime.
//! - **MaxSAT reduction** ([`sat`]): encodes a monotone non-crossing
//!   matching objective as weighted CNF and delegates to an external
//!   MaxHS-compatible solver.
//! - **Greedy heuristic** ([`solver::greedy`]): commits one symbol pair per
//!   round, guided by global sequence alignment; polynomial, approximate.
//!
//! ## Example
//!
//! ```rust
//! use param_solver::{normalize_chars, solve_fpt, EditCosts};
//!
//! // Same structure, different symbols: the renaming {A->X, B->Y} makes
//! // the words identical, so the distance is zero.
//! let (a, _) = normalize_chars("AABB");
//! let (b, _) = normalize_chars("XXYY");
//! let solution = solve_fpt(&a, &b, EditCosts::uniform());
//! assert_eq!(solution.distance, 0);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: canonical words, alphabets, renamings, and match results
//! - [`solver`]: the exact FPT and greedy strategies plus their kernels
//! - [`sat`]: the weighted-CNF reduction and external solver boundary
//! - [`exec`]: the bounded execution harness around the exact solver
//! - [`cli`]: command-line interface implementation

pub mod cli;
pub mod core;
pub mod exec;
pub mod sat;
pub mod solver;

// Re-export commonly used types for convenience
pub use crate::core::renaming::Renaming;
pub use crate::core::result::{MatchResult, SolveStatus};
pub use crate::core::word::{normalize, normalize_chars, Alphabet, ParameterizedWord};
pub use crate::exec::Harness;
pub use crate::sat::{MaxhsSolver, SatConfig, SatInstance};
pub use crate::solver::distance::EditCosts;

/// Exact parameterized distance: one entry point per solving strategy.
pub use crate::solver::fpt::solve as solve_fpt;

/// Greedy approximate parameterized distance.
pub use crate::solver::greedy::solve as solve_greedy;

/// MaxSAT-reduction parameterized distance through the default external
/// solver configuration; see [`MaxhsSolver`] for custom binaries, timeouts,
/// or encodings.
pub fn solve_maxsat(
    a: &ParameterizedWord,
    b: &ParameterizedWord,
) -> Result<MatchResult, sat::SatError> {
    MaxhsSolver::new().solve(a, b, None)
}
