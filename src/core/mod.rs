//! Core data types for parameterized matching.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`ParameterizedWord`]: A symbol sequence in canonical first-occurrence encoding
//! - [`Alphabet`]: The ordered set of original symbols behind a canonical word
//! - [`Renaming`]: A partial injective mapping between two alphabets
//! - [`MatchResult`], [`SolveStatus`]: The outcome of one comparison
//!
//! ## Canonical encoding
//!
//! Every input sequence is normalized before solving: the first distinct symbol
//! becomes `A`, the second `B`, and so on, in order of first appearance. Two
//! sequences with the same recurrence structure therefore normalize to the
//! same word regardless of the original symbol identities:
//!
//! | Input          | Canonical |
//! |----------------|-----------|
//! | `XXYY`         | `AABB`    |
//! | `Medee,Jason,Medee` | `ABA` |
//!
//! Solvers only ever see canonical words; the [`Alphabet`] maps canonical
//! letters back to the original symbols for reporting.

pub mod renaming;
pub mod result;
pub mod word;

pub use renaming::Renaming;
pub use result::{MatchResult, SolveStatus};
pub use word::{normalize, Alphabet, ParameterizedWord};
