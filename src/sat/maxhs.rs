use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::core::result::MatchResult;
use crate::core::word::{indices_to_text, ParameterizedWord};
use crate::exec::ChildExt;
use crate::sat::instance::{SatConfig, SatInstance};
use crate::sat::SatError;

/// Driver for an external MaxHS-compatible weighted-MaxSAT solver.
///
/// The solver is a synchronous, blocking subprocess: the WCNF artifact is
/// written to disk, the binary is invoked on it, and stdout is scanned for
/// the solution line. A solver killed by the deadline yields the same
/// timed-out status as the process harness in [`crate::exec`].
#[derive(Debug, Clone)]
pub struct MaxhsSolver {
    bin: PathBuf,
    timeout: Duration,
    config: SatConfig,
}

impl MaxhsSolver {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    #[must_use]
    pub fn new() -> Self {
        Self {
            bin: PathBuf::from("maxhs"),
            timeout: Self::DEFAULT_TIMEOUT,
            config: SatConfig::default(),
        }
    }

    #[must_use]
    pub fn with_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.bin = bin.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: SatConfig) -> Self {
        self.config = config;
        self
    }

    /// Check whether the solver binary can be started at all.
    #[must_use]
    pub fn is_available(&self) -> bool {
        Command::new(&self.bin)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    /// Solve one pair via the MaxSAT reduction.
    ///
    /// `keep_wcnf` keeps the encoding at the given path instead of a
    /// discarded temporary file.
    ///
    /// # Errors
    ///
    /// [`SatError::NoSolutionLine`] if the solver exits without a truth
    /// assignment: the encoding is satisfiable by construction, so this is
    /// an integration fault and is propagated, never retried. Timeouts are
    /// not errors; they produce a timed-out [`MatchResult`].
    pub fn solve(
        &self,
        a: &ParameterizedWord,
        b: &ParameterizedWord,
        keep_wcnf: Option<&Path>,
    ) -> Result<MatchResult, SatError> {
        let start = Instant::now();

        let mut instance = SatInstance::encode(a, b, &self.config);
        instance.add_comment(format!("input 1: {}", a.canonical_text()));
        instance.add_comment(format!("input 2: {}", b.canonical_text()));

        // The WCNF file is the handoff artifact; keep it only on request.
        let mut scratch = None;
        let wcnf_path: PathBuf = match keep_wcnf {
            Some(path) => {
                let mut file = std::fs::File::create(path)?;
                instance.write_wcnf(&mut file)?;
                path.to_path_buf()
            }
            None => {
                let mut file = tempfile::Builder::new()
                    .prefix("param-solver-")
                    .suffix(".wcnf")
                    .tempfile()?;
                instance.write_wcnf(file.as_file_mut())?;
                file.as_file_mut().flush()?;
                let path = file.path().to_path_buf();
                scratch = Some(file);
                path
            }
        };

        debug!(
            vars = instance.num_vars(),
            clauses = instance.num_clauses(),
            wcnf = %wcnf_path.display(),
            "invoking MaxSAT solver"
        );

        let mut child = Command::new(&self.bin)
            .arg("-printSoln")
            .arg(&wcnf_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SatError::Spawn {
                bin: self.bin.display().to_string(),
                source,
            })?;

        let status = match child.wait_deadline(self.timeout)? {
            Some(status) => status,
            None => {
                child.kill()?;
                child.wait()?;
                warn!(timeout_s = self.timeout.as_secs(), "MaxSAT solver timed out");
                return Ok(MatchResult::timed_out(self.timeout));
            }
        };

        let mut output = String::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout.read_to_string(&mut output)?;
        }
        debug!(%status, bytes = output.len(), "MaxSAT solver finished");
        drop(scratch);

        let bits = extract_assignment(&output).ok_or(SatError::NoSolutionLine)?;
        let decoded = instance.decode_assignment(&bits);

        // Witness pair: the first word with the renaming applied, the
        // second word untouched.
        let renamed_a = indices_to_text(&decoded.renaming.apply(a.symbols()));
        let rendered = (renamed_a, b.canonical_text());

        Ok(MatchResult::solved(
            decoded.distance,
            decoded.renaming,
            rendered,
            start.elapsed(),
        ))
    }
}

impl Default for MaxhsSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the truth assignment out of solver stdout.
///
/// The solution block's `v` line lists the value of every variable in index
/// order; both the contiguous digit-string form and the spaced form decode
/// the same way once everything but `0`/`1` is dropped.
fn extract_assignment(output: &str) -> Option<Vec<bool>> {
    for line in output.lines() {
        if line.starts_with('v') {
            let bits: Vec<bool> = line
                .chars()
                .filter(|c| *c == '0' || *c == '1')
                .map(|c| c == '1')
                .collect();
            return Some(bits);
        }
    }
    None
}
