//! Cross-strategy properties of the solving engine, checked over a fixed
//! corpus of small-alphabet words.

use param_solver::solver::{fpt, greedy};
use param_solver::{normalize_chars, EditCosts, SatConfig, SatInstance};

/// Small-alphabet words with varied structure, drawn from the shapes the
/// solvers are used on (recurring speakers with occasional one-off
/// symbols). Alphabet sizes stay small enough for the exact solver.
const CORPUS: &[&str] = &[
    "A",
    "AB",
    "ABAB",
    "AABB",
    "ABABAB",
    "ABCBCB",
    "ABACAD",
    "ABCABC",
    "AABABB",
    "ABCDCBA",
    "ABABCBC",
    "ABCBDBC",
];

fn factorial(n: u64) -> u64 {
    (1..=n).product()
}

fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

#[test]
fn fpt_distance_is_symmetric() {
    for a in CORPUS {
        for b in CORPUS {
            let (wa, _) = normalize_chars(a);
            let (wb, _) = normalize_chars(b);
            let forward = fpt::solve(&wa, &wb, EditCosts::uniform());
            let backward = fpt::solve(&wb, &wa, EditCosts::uniform());
            assert_eq!(forward.distance, backward.distance, "{a} vs {b}");
        }
    }
}

#[test]
fn greedy_distance_is_symmetric() {
    for a in CORPUS {
        for b in CORPUS {
            let (wa, _) = normalize_chars(a);
            let (wb, _) = normalize_chars(b);
            let forward = greedy::solve(&wa, &wb, EditCosts::uniform());
            let backward = greedy::solve(&wb, &wa, EditCosts::uniform());
            assert_eq!(forward.distance, backward.distance, "{a} vs {b}");
        }
    }
}

#[test]
fn fpt_self_distance_is_zero() {
    for a in CORPUS {
        let (wa, _) = normalize_chars(a);
        let solution = fpt::solve(&wa, &wa, EditCosts::uniform());
        assert_eq!(solution.distance, 0, "{a}");
        assert!(solution.renaming.is_identity(), "{a}");
    }
}

#[test]
fn exact_never_exceeds_greedy() {
    for a in CORPUS {
        for b in CORPUS {
            let (wa, _) = normalize_chars(a);
            let (wb, _) = normalize_chars(b);
            let exact = fpt::solve(&wa, &wb, EditCosts::uniform());
            let approx = greedy::solve(&wa, &wb, EditCosts::uniform());
            assert!(
                exact.distance <= approx.distance,
                "{a} vs {b}: exact {} > greedy {}",
                exact.distance,
                approx.distance
            );
        }
    }
}

#[test]
fn enumeration_counts_are_exact() {
    for a in CORPUS {
        for b in CORPUS {
            let (wa, _) = normalize_chars(a);
            let (wb, _) = normalize_chars(b);
            let s1 = u64::from(wa.alphabet_size().min(wb.alphabet_size()));
            let s2 = u64::from(wa.alphabet_size().max(wb.alphabet_size()));
            let solution = fpt::solve(&wa, &wb, EditCosts::uniform());
            assert_eq!(solution.permutations_examined, factorial(s1), "{a} vs {b}");
            assert_eq!(solution.subsets_examined, binomial(s2, s1), "{a} vs {b}");
        }
    }
}

#[test]
fn canonicalization_is_idempotent() {
    for a in CORPUS {
        let (word, _) = normalize_chars(a);
        let (again, _) = normalize_chars(&word.canonical_text());
        assert_eq!(word, again, "{a}");
    }
}

#[test]
fn decoded_distance_follows_match_count_formula() {
    // For any decoded assignment, distance must equal n + m - 2*matches.
    for (a, b) in [("AB", "AB"), ("ABAB", "ABA"), ("ABC", "AB")] {
        let (wa, _) = normalize_chars(a);
        let (wb, _) = normalize_chars(b);
        let instance = SatInstance::encode(&wa, &wb, &SatConfig::default());

        // All-false assignment: zero matches.
        let decoded = instance.decode_assignment(&vec![false; instance.num_vars()]);
        assert_eq!(decoded.distance, (wa.len() + wb.len()) as u64);

        // Match the first positions of both words.
        let mut bits = vec![false; instance.num_vars()];
        bits[0] = true; // x(0,0)
        let decoded = instance.decode_assignment(&bits);
        assert_eq!(decoded.match_count(), 1);
        assert_eq!(
            decoded.distance,
            (wa.len() + wb.len()) as u64 - 2 * decoded.match_count() as u64
        );
    }
}

#[test]
fn identity_pair_has_zero_distance() {
    let (a, _) = normalize_chars("AB");
    let (b, _) = normalize_chars("AB");
    let solution = fpt::solve(&a, &b, EditCosts::uniform());
    assert_eq!(solution.distance, 0);
    assert!(solution.renaming.is_identity());
}

#[test]
fn two_extra_positions_cost_two_insertions() {
    let (a, _) = normalize_chars("ABAB");
    let (b, _) = normalize_chars("ABABAB");
    let solution = fpt::solve(&a, &b, EditCosts::uniform());
    assert_eq!(solution.distance, 2);
    assert!(solution.renaming.is_identity());
}

#[test]
fn renaming_alone_is_free() {
    let (a, alpha_a) = normalize_chars("AABB");
    let (b, alpha_b) = normalize_chars("XXYY");
    let solution = fpt::solve(&a, &b, EditCosts::uniform());
    assert_eq!(solution.distance, 0);
    // Canonical identity corresponds to {A->X, B->Y} on the raw symbols.
    assert_eq!(
        solution.renaming.display_with(&alpha_a, &alpha_b),
        "A->X, B->Y"
    );
}

#[test]
fn degenerate_inputs_are_valid_for_all_strategies() {
    let cases = [("", ""), ("", "ABAB"), ("AAAA", "A"), ("A", "B")];
    for (a, b) in cases {
        let (wa, _) = normalize_chars(a);
        let (wb, _) = normalize_chars(b);
        let exact = fpt::solve(&wa, &wb, EditCosts::uniform());
        let approx = greedy::solve(&wa, &wb, EditCosts::uniform());
        assert!(exact.distance <= approx.distance, "{a:?} vs {b:?}");
        // Encoding must also accept them.
        let instance = SatInstance::encode(&wa, &wb, &SatConfig::default());
        let decoded = instance.decode_assignment(&vec![false; instance.num_vars()]);
        assert_eq!(decoded.distance, (wa.len() + wb.len()) as u64);
    }
}
