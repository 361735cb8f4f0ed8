//! Bounded execution harness for solvers with unpredictable runtime.
//!
//! The exact FPT solver has no internal time cap and no natural suspension
//! point, so cooperative cancellation cannot work: the unit of work must be
//! forcibly terminable mid-computation. The harness therefore re-invokes
//! the current executable as a child process running the hidden
//! `solve-worker` subcommand, blocks until the child reports its result or
//! the wall-clock deadline elapses, and kills the child on timeout.
//!
//! The reply channel is one line of exactly [`REPLY_FIELDS`] tab-separated
//! fields on the child's stdout. A field-count mismatch is a harness bug,
//! not a normal outcome, and surfaces as a fatal [`HarnessError`].
//! Cancellation is all-or-nothing: a timed-out child's partial work is
//! discarded, never resumed.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::result::MatchResult;
use crate::core::word::ParameterizedWord;
use crate::solver::distance::EditCosts;
use crate::solver::fpt::FptSolution;

/// Fields in a worker reply line: distance, renaming, both renderings,
/// elapsed milliseconds.
pub const REPLY_FIELDS: usize = 5;

/// Placeholder for an empty field in the reply line.
const EMPTY_FIELD: &str = "-";

/// Poll interval while waiting on the child.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Harness-internal failures. Timeouts are not errors; they come back as
/// a [`MatchResult`] with timed-out status.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The worker process could not be spawned.
    #[error("failed to spawn solver worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// The worker replied with the wrong number of fields.
    #[error("worker replied with {got} fields, expected {expected}")]
    FieldCount { expected: usize, got: usize },

    /// A reply field failed to parse.
    #[error("malformed worker reply field '{field}': '{value}'")]
    Field { field: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Wait for a child process with a deadline, by polling.
///
/// `Ok(None)` means the deadline elapsed with the child still running; the
/// caller decides whether to kill it.
pub(crate) trait ChildExt {
    fn wait_deadline(&mut self, deadline: Duration) -> std::io::Result<Option<ExitStatus>>;
}

impl ChildExt for Child {
    fn wait_deadline(&mut self, deadline: Duration) -> std::io::Result<Option<ExitStatus>> {
        let start = Instant::now();
        loop {
            match self.try_wait()? {
                Some(status) => return Ok(Some(status)),
                None => {
                    if start.elapsed() >= deadline {
                        return Ok(None);
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
            }
        }
    }
}

/// Runs the exact solver in an isolated, cancellable child process.
#[derive(Debug, Clone)]
pub struct Harness {
    exe: PathBuf,
}

impl Harness {
    /// Harness around the currently running executable.
    pub fn current() -> std::io::Result<Self> {
        Ok(Self {
            exe: std::env::current_exe()?,
        })
    }

    /// Harness around an explicit worker binary (tests use this to point
    /// at the built CLI).
    #[must_use]
    pub fn with_exe(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into() }
    }

    /// Run the exact FPT solver on one pair under a wall-clock deadline.
    ///
    /// Blocks until the child completes or the deadline elapses. On
    /// timeout the child is killed and the result carries status
    /// timed-out, no distance, and elapsed = the deadline value. A child
    /// that dies without a valid reply maps to status failed.
    pub fn run_with_timeout(
        &self,
        a: &ParameterizedWord,
        b: &ParameterizedWord,
        costs: EditCosts,
        deadline: Duration,
    ) -> Result<MatchResult, HarnessError> {
        let start = Instant::now();

        let mut child = Command::new(&self.exe)
            .arg("solve-worker")
            .arg(a.canonical_text())
            .arg(b.canonical_text())
            .arg("--substitution")
            .arg(costs.substitution.to_string())
            .arg("--insertion")
            .arg(costs.insertion.to_string())
            .arg("--deletion")
            .arg(costs.deletion.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(HarnessError::Spawn)?;

        match child.wait_deadline(deadline)? {
            Some(status) if status.success() => {
                let mut output = String::new();
                if let Some(mut stdout) = child.stdout.take() {
                    stdout.read_to_string(&mut output)?;
                }
                let line = output.lines().next().ok_or(HarnessError::FieldCount {
                    expected: REPLY_FIELDS,
                    got: 0,
                })?;
                debug!(elapsed_ms = start.elapsed().as_millis() as u64, "worker completed");
                parse_reply(line)
            }
            Some(status) => {
                warn!(%status, "solver worker exited abnormally");
                Ok(MatchResult::failed(start.elapsed()))
            }
            None => {
                // Deadline reached: terminate and discard the computation.
                child.kill()?;
                child.wait()?;
                debug!(deadline_ms = deadline.as_millis() as u64, "worker timed out");
                Ok(MatchResult::timed_out(deadline))
            }
        }
    }
}

/// Serialize a finished solution as the one-line worker reply.
pub fn write_reply(solution: &FptSolution, out: &mut impl Write) -> std::io::Result<()> {
    let renaming = solution.renaming.to_string();
    writeln!(
        out,
        "{}\t{}\t{}\t{}\t{}",
        solution.distance,
        non_empty(&renaming),
        non_empty(&solution.rendered.0),
        non_empty(&solution.rendered.1),
        solution.elapsed.as_millis()
    )
}

fn non_empty(field: &str) -> &str {
    if field.is_empty() {
        EMPTY_FIELD
    } else {
        field
    }
}

fn parse_reply(line: &str) -> Result<MatchResult, HarnessError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != REPLY_FIELDS {
        return Err(HarnessError::FieldCount {
            expected: REPLY_FIELDS,
            got: fields.len(),
        });
    }

    let distance: u64 = fields[0].parse().map_err(|_| HarnessError::Field {
        field: "distance",
        value: fields[0].to_string(),
    })?;
    let renaming = if fields[1] == EMPTY_FIELD {
        crate::core::renaming::Renaming::default()
    } else {
        fields[1].parse().map_err(|_| HarnessError::Field {
            field: "renaming",
            value: fields[1].to_string(),
        })?
    };
    let rendered_a = decode_field(fields[2]);
    let rendered_b = decode_field(fields[3]);
    let elapsed_ms: u64 = fields[4].parse().map_err(|_| HarnessError::Field {
        field: "elapsed_ms",
        value: fields[4].to_string(),
    })?;

    Ok(MatchResult::solved(
        distance,
        renaming,
        (rendered_a, rendered_b),
        Duration::from_millis(elapsed_ms),
    ))
}

fn decode_field(field: &str) -> String {
    if field == EMPTY_FIELD {
        String::new()
    } else {
        field.to_string()
    }
}

/// Worker-side entry: solve one pair exactly and emit the reply line.
pub fn run_worker(
    word_a: &str,
    word_b: &str,
    costs: EditCosts,
    out: &mut impl Write,
) -> std::io::Result<()> {
    let (a, _) = crate::core::word::normalize_chars(word_a);
    let (b, _) = crate::core::word::normalize_chars(word_b);
    let solution = crate::solver::fpt::solve(&a, &b, costs);
    write_reply(&solution, out)
}
