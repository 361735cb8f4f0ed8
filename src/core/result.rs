use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::renaming::Renaming;

/// Outcome classification for one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// The solver finished and produced a distance.
    Solved,
    /// The wall-clock deadline elapsed; partial work was discarded.
    TimedOut,
    /// The isolated unit of work died without reporting a result.
    Failed,
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solved => write!(f, "solved"),
            Self::TimedOut => write!(f, "timed_out"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Result of one comparison between two parameterized words.
///
/// Produced once per call and never mutated; the elapsed wall-clock time is
/// a required telemetry field on every status, including timeouts (where it
/// equals the deadline).
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Renaming-aware distance; `None` unless status is [`SolveStatus::Solved`].
    pub distance: Option<u64>,

    /// Witness renaming achieving the distance, mapping the first word's
    /// alphabet into the second word's.
    pub renaming: Option<Renaming>,

    /// The two words rendered under the witness renaming, in input order.
    pub rendered: Option<(String, String)>,

    /// Wall-clock time spent on this comparison.
    pub elapsed: Duration,

    /// Outcome classification. Callers must check this rather than treat a
    /// `None` distance as a crash.
    pub status: SolveStatus,
}

impl MatchResult {
    #[must_use]
    pub fn solved(
        distance: u64,
        renaming: Renaming,
        rendered: (String, String),
        elapsed: Duration,
    ) -> Self {
        Self {
            distance: Some(distance),
            renaming: Some(renaming),
            rendered: Some(rendered),
            elapsed,
            status: SolveStatus::Solved,
        }
    }

    /// The deadline elapsed; elapsed time is reported as the deadline value.
    #[must_use]
    pub fn timed_out(deadline: Duration) -> Self {
        Self {
            distance: None,
            renaming: None,
            rendered: None,
            elapsed: deadline,
            status: SolveStatus::TimedOut,
        }
    }

    #[must_use]
    pub fn failed(elapsed: Duration) -> Self {
        Self {
            distance: None,
            renaming: None,
            rendered: None,
            elapsed,
            status: SolveStatus::Failed,
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.status == SolveStatus::Solved
    }
}
