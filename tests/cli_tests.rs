//! End-to-end tests of the CLI and the process-isolation harness, driven
//! against the compiled binary.

use std::io::Write;
use std::time::{Duration, Instant};

use assert_cmd::Command;
use predicates::prelude::*;

use param_solver::{normalize_chars, EditCosts, Harness, SolveStatus};

fn bin() -> Command {
    Command::cargo_bin("param-solver").expect("binary builds")
}

#[test]
fn solve_exact_reports_distance() {
    bin()
        .args(["solve", "ABAB", "ABABAB"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance: 2"))
        .stdout(predicate::str::contains("Status: solved"));
}

#[test]
fn solve_detects_pure_renaming() {
    bin()
        .args(["solve", "AABB", "XXYY"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance: 0"));
}

#[test]
fn solve_json_output() {
    bin()
        .args(["solve", "AABB", "XXYY", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"distance\": 0"))
        .stdout(predicate::str::contains("\"status\": \"solved\""));
}

#[test]
fn solve_tsv_output_has_header_row() {
    bin()
        .args(["solve", "ABAB", "ABAB", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "status\tdistance\trenaming\trendered_a\trendered_b\telapsed_ms",
        ));
}

#[test]
fn solve_greedy_strategy() {
    bin()
        .args(["solve", "ABAB", "ABAB", "--strategy", "greedy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance: 0"));
}

#[test]
fn solve_token_symbols() {
    bin()
        .args([
            "solve",
            "--tokens",
            "Medee,Jason,Medee,Jason",
            "Thesee,Aegee,Thesee,Aegee",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance: 0"))
        .stdout(predicate::str::contains("Medee->Thesee"));
}

#[test]
fn solve_exact_times_out_within_bounded_overshoot() {
    // Eleven distinct symbols force 11! permutations: far beyond a one
    // second budget, so the harness must kill the worker at the deadline.
    let word = "ABCDEFGHIJKABCDEFGHIJK";
    let start = Instant::now();
    bin()
        .args(["solve", word, word, "--timeout", "1", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("timed_out"));
    assert!(
        start.elapsed() < Duration::from_secs(2),
        "timeout overshoot: {:?}",
        start.elapsed()
    );
}

#[test]
fn harness_timeout_synthesizes_timed_out_result() {
    let (a, _) = normalize_chars("ABCDEFGHIJKABCDEFGHIJK");
    let (b, _) = normalize_chars("ABCDEFGHIJKKJIHGFEDCBA");
    let harness = Harness::with_exe(env!("CARGO_BIN_EXE_param-solver"));
    let deadline = Duration::from_secs(1);

    let start = Instant::now();
    let result = harness
        .run_with_timeout(&a, &b, EditCosts::uniform(), deadline)
        .expect("harness runs");

    assert_eq!(result.status, SolveStatus::TimedOut);
    assert_eq!(result.distance, None);
    assert_eq!(result.elapsed, deadline);
    assert!(
        start.elapsed() < deadline * 2,
        "timeout overshoot: {:?}",
        start.elapsed()
    );
}

#[test]
fn harness_returns_solved_result_for_small_inputs() {
    let (a, _) = normalize_chars("ABAB");
    let (b, _) = normalize_chars("ABABAB");
    let harness = Harness::with_exe(env!("CARGO_BIN_EXE_param-solver"));

    let result = harness
        .run_with_timeout(&a, &b, EditCosts::uniform(), Duration::from_secs(30))
        .expect("harness runs");

    assert_eq!(result.status, SolveStatus::Solved);
    assert_eq!(result.distance, Some(2));
    assert!(result.renaming.is_some());
}

#[test]
fn encode_writes_wcnf_artifact() {
    bin()
        .args(["encode", "AB", "AB"])
        .assert()
        .success()
        .stdout(predicate::str::contains("p wcnf 8 17 4"))
        .stdout(predicate::str::contains("c input 1: AB"));
}

#[test]
fn encode_to_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("pair.wcnf");
    bin()
        .args(["encode", "ABAB", "ABA", "--output"])
        .arg(&path)
        .assert()
        .success();
    let content = std::fs::read_to_string(&path).expect("artifact written");
    assert!(content.contains("p wcnf "));
    assert!(content.lines().any(|l| l.starts_with("c ")));
}

#[test]
fn batch_emits_one_row_per_pair() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pairs = dir.path().join("pairs.tsv");
    let mut file = std::fs::File::create(&pairs).expect("pairs file");
    writeln!(file, "# comparison corpus").unwrap();
    writeln!(file, "identical\tABAB\tABAB").unwrap();
    writeln!(file, "renamed\tAABB\tXXYY").unwrap();
    writeln!(file, "grown\tABAB\tABABAB").unwrap();
    drop(file);

    let output = dir.path().join("results.tsv");
    bin()
        .args(["batch"])
        .arg(&pairs)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output).expect("results written");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4); // header + 3 rows
    assert!(lines[0].starts_with("pair\tdistance\tstatus"));
    assert!(lines[1].starts_with("identical\t0\tsolved"));
    assert!(lines[2].starts_with("renamed\t0\tsolved"));
    assert!(lines[3].starts_with("grown\t2\tsolved"));
}

#[test]
fn batch_rejects_malformed_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pairs = dir.path().join("pairs.tsv");
    std::fs::write(&pairs, "only-two-fields\tABAB\n").expect("pairs file");

    bin()
        .args(["batch"])
        .arg(&pairs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected name<TAB>word1<TAB>word2"));
}

#[test]
fn maxsat_strategy_fails_cleanly_without_solver() {
    // No MaxHS binary under this name: the spawn failure must surface as
    // an error, not a panic or a bogus result.
    bin()
        .args([
            "solve",
            "AB",
            "AB",
            "--strategy",
            "maxsat",
            "--solver-bin",
            "definitely-not-a-real-solver-binary",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to run MaxSAT solver"));
}

#[test]
fn maxsat_end_to_end_when_solver_installed() {
    // Exercised only where a real MaxHS binary is on PATH.
    let probe = param_solver::MaxhsSolver::new();
    if !probe.is_available() {
        eprintln!("skipping: no maxhs binary available");
        return;
    }

    let (a, _) = normalize_chars("ABAB");
    let (b, _) = normalize_chars("ABAB");
    let result = probe.solve(&a, &b, None).expect("solver runs");
    assert_eq!(result.status, SolveStatus::Solved);
    assert_eq!(result.distance, Some(0));
}
