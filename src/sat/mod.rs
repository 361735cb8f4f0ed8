//! MaxSAT reduction of the parameterized matching problem.
//!
//! This path solves a closely related objective: maximize the number of
//! monotone, non-crossing position matches between the two words, subject
//! to the matched positions being consistent with an injective symbol
//! renaming. The optimization is encoded as a weighted CNF instance
//! ([`SatInstance`]), handed to an external exact MaxSAT solver as a WCNF
//! file ([`MaxhsSolver`]), and the returned truth assignment is decoded
//! back into a distance and witness renaming.
//!
//! The WCNF file is a boundary artifact, not internal state; it is written
//! fresh per comparison and discarded unless the caller asks to keep it.

pub mod instance;
pub mod maxhs;

use std::io;

use thiserror::Error;

pub use instance::{DecodedSolution, SatConfig, SatInstance};
pub use maxhs::MaxhsSolver;

/// Errors on the MaxSAT path.
#[derive(Debug, Error)]
pub enum SatError {
    /// The external solver binary could not be started.
    #[error("failed to run MaxSAT solver '{bin}': {source}")]
    Spawn {
        bin: String,
        #[source]
        source: io::Error,
    },

    /// I/O failure writing the WCNF artifact or reading solver output.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The solver produced no truth-assignment line. The encoding is
    /// satisfiable by construction, so this signals an integration fault,
    /// not a legitimate "no solution" state. Never retried.
    #[error("no solution line in MaxSAT solver output")]
    NoSolutionLine,
}
