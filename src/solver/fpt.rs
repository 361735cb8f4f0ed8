use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::renaming::Renaming;
use crate::core::word::{indices_to_text, ParameterizedWord};
use crate::solver::distance::{distance, EditCosts};

/// Exact solution found by exhaustive enumeration of injective renamings.
#[derive(Debug, Clone)]
pub struct FptSolution {
    /// Minimum weighted edit distance over all injective renamings.
    pub distance: u64,

    /// The renaming achieving the minimum, mapping the first word's
    /// alphabet into the second word's.
    pub renaming: Renaming,

    /// Both words rendered under the optimal renaming, in input order.
    /// Kept for audit: the kernel distance of this pair is `distance`.
    pub rendered: (String, String),

    /// Exactly `s1!` for the smaller alphabet size `s1`.
    pub permutations_examined: u64,

    /// Exactly `C(s2, s1)` for the larger alphabet size `s2`.
    pub subsets_examined: u64,

    pub elapsed: Duration,
}

/// Iterative permutation generator over an index vector (Heap's algorithm).
///
/// Yields every permutation exactly once, including the single empty
/// permutation for an empty input. No recursion, no per-level copies; each
/// `next` performs one swap.
pub(crate) struct Permutations {
    items: Vec<u32>,
    counters: Vec<usize>,
    index: usize,
    first: bool,
}

impl Permutations {
    pub(crate) fn new(items: Vec<u32>) -> Self {
        let len = items.len();
        Self {
            items,
            counters: vec![0; len],
            index: 1,
            first: true,
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Vec<u32>> {
        if self.first {
            self.first = false;
            return Some(self.items.clone());
        }
        let n = self.items.len();
        while self.index < n {
            if self.counters[self.index] < self.index {
                if self.index % 2 == 0 {
                    self.items.swap(0, self.index);
                } else {
                    self.items.swap(self.counters[self.index], self.index);
                }
                self.counters[self.index] += 1;
                self.index = 1;
                return Some(self.items.clone());
            }
            self.counters[self.index] = 0;
            self.index += 1;
        }
        None
    }
}

/// Lexicographic k-subset iterator over the indices `0..n`.
///
/// Yields the single empty subset for `k == 0` and nothing for `k > n`.
pub(crate) struct Combinations {
    n: u32,
    indices: Vec<u32>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub(crate) fn new(n: u32, k: usize) -> Self {
        Self {
            n,
            indices: (0..k as u32).collect(),
            started: false,
            done: k as u64 > u64::from(n),
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Vec<u32>> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }
        let k = self.indices.len();
        if k == 0 {
            self.done = true;
            return None;
        }
        // Rightmost position that can still advance.
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] < self.n - (k as u32 - 1 - i as u32) - 1 {
                break;
            }
        }
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

/// Find the injective renaming minimizing the weighted edit distance,
/// exhaustively.
///
/// Enumerates every permutation of the smaller alphabet against every
/// same-size subset of the larger alphabet: `O(s1! * C(s2, s1) * poly)`
/// where `s1 <= s2` are the two alphabet sizes. Exponential purely in
/// alphabet size, never in word length. Unbounded runtime for large
/// alphabets is deliberate; wrap with [`crate::exec::Harness`] to cap it.
#[must_use]
pub fn solve(a: &ParameterizedWord, b: &ParameterizedWord, costs: EditCosts) -> FptSolution {
    let start = Instant::now();

    // Order so the factorial factor hits the smaller alphabet.
    let swapped = a.alphabet_size() > b.alphabet_size();
    let (small, large) = if swapped { (b, a) } else { (a, b) };
    let s1 = small.alphabet_size();
    let s2 = large.alphabet_size();

    // The larger word's rendering depends only on the subset, so relabel
    // once per subset instead of once per (permutation, subset) pair.
    let subsets: Vec<(Vec<u32>, Vec<u32>)> = Combinations::new(s2, s1 as usize)
        .map(|subset| {
            let relabeled = large.relabel(&subset);
            (subset, relabeled)
        })
        .collect();
    let subsets_examined = subsets.len() as u64;

    debug!(
        s1,
        s2,
        subsets = subsets_examined,
        "enumerating injective renamings"
    );

    let mut permutations_examined = 0u64;
    let mut best: Option<(u64, Vec<u32>, Vec<u32>, Vec<u32>, Vec<u32>)> = None;

    for perm in Permutations::new((0..s1).collect()) {
        permutations_examined += 1;
        let relabeled_small = small.relabel(&perm);
        for (subset, relabeled_large) in &subsets {
            let dist = distance(&relabeled_small, relabeled_large, costs);
            let improved = match &best {
                Some((current, ..)) => dist < *current,
                None => true,
            };
            if improved {
                best = Some((
                    dist,
                    perm.clone(),
                    subset.clone(),
                    relabeled_small.clone(),
                    relabeled_large.clone(),
                ));
            }
        }
    }

    // Both iterators yield at least one item for any s1 <= s2.
    let (dist, perm, subset, relabeled_small, relabeled_large) =
        best.expect("enumeration yields at least one candidate");

    // The pairing perm[t] <-> subset[t] both take output letter t; read as
    // a renaming from the smaller alphabet into the larger one.
    let pairs: Vec<(u32, u32)> = perm.iter().copied().zip(subset.iter().copied()).collect();
    let renaming = Renaming::from_pairs(pairs);

    let (renaming, rendered) = if swapped {
        (
            renaming.inverted(),
            (indices_to_text(&relabeled_large), indices_to_text(&relabeled_small)),
        )
    } else {
        (
            renaming,
            (indices_to_text(&relabeled_small), indices_to_text(&relabeled_large)),
        )
    };

    FptSolution {
        distance: dist,
        renaming,
        rendered,
        permutations_examined,
        subsets_examined,
        elapsed: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::word::normalize_chars;

    fn solve_texts(a: &str, b: &str, costs: EditCosts) -> FptSolution {
        let (wa, _) = normalize_chars(a);
        let (wb, _) = normalize_chars(b);
        solve(&wa, &wb, costs)
    }

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
    fn test_permutations_count_and_uniqueness() {
        for n in 0..6u32 {
            let perms: Vec<Vec<u32>> = Permutations::new((0..n).collect()).collect();
            assert_eq!(perms.len() as u64, factorial(u64::from(n)));
            let mut unique = perms.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), perms.len());
        }
    }

    #[test]
    fn test_combinations_count_and_order() {
        let combos: Vec<Vec<u32>> = Combinations::new(4, 2).collect();
        assert_eq!(
            combos,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
        for n in 0..7u32 {
            for k in 0..=n as usize {
                let count = Combinations::new(n, k).count() as u64;
                assert_eq!(count, binomial(u64::from(n), k as u64), "C({n}, {k})");
            }
        }
    }

    #[test]
    fn test_combinations_empty_subset() {
        let combos: Vec<Vec<u32>> = Combinations::new(3, 0).collect();
        assert_eq!(combos, vec![Vec::<u32>::new()]);
    }

    #[test]
    fn test_identical_words_distance_zero() {
        let solution = solve_texts("AB", "AB", EditCosts::uniform());
        assert_eq!(solution.distance, 0);
        assert!(solution.renaming.is_identity());
    }

    #[test]
    fn test_two_insertions() {
        let solution = solve_texts("ABAB", "ABABAB", EditCosts::uniform());
        assert_eq!(solution.distance, 2);
        assert!(solution.renaming.is_identity());
    }

    #[test]
    fn test_pure_renaming_is_free() {
        // AABB and XXYY share structure; {A->X, B->Y} reaches distance 0.
        let solution = solve_texts("AABB", "XXYY", EditCosts::uniform());
        assert_eq!(solution.distance, 0);
        assert!(solution.renaming.is_identity());
        assert_eq!(solution.rendered.0, solution.rendered.1);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ("ABAB", "ABABAB"),
            ("ABACBC", "ABCB"),
            ("AABB", "ABAB"),
            ("A", "ABABAB"),
            ("ABC", "CBCABA"),
        ];
        for (a, b) in pairs {
            let forward = solve_texts(a, b, EditCosts::uniform());
            let backward = solve_texts(b, a, EditCosts::uniform());
            assert_eq!(forward.distance, backward.distance, "{a} vs {b}");
        }
    }

    #[test]
    fn test_enumeration_counts_exact() {
        // s1 = 2 (ABAB), s2 = 3 (ABCBC): 2! permutations, C(3,2) subsets.
        let solution = solve_texts("ABAB", "ABCBC", EditCosts::uniform());
        assert_eq!(solution.permutations_examined, 2);
        assert_eq!(solution.subsets_examined, 3);

        let solution = solve_texts("ABCABC", "ABCDEABCDE", EditCosts::uniform());
        assert_eq!(solution.permutations_examined, factorial(3));
        assert_eq!(solution.subsets_examined, binomial(5, 3));
    }

    #[test]
    fn test_empty_word() {
        let solution = solve_texts("", "ABAB", EditCosts::uniform());
        assert_eq!(solution.distance, 4);
        assert!(solution.renaming.is_empty());
        let solution = solve_texts("", "", EditCosts::uniform());
        assert_eq!(solution.distance, 0);
    }

    #[test]
    fn test_single_symbol_alphabets() {
        let solution = solve_texts("AAA", "BBB", EditCosts::uniform());
        assert_eq!(solution.distance, 0);
        let solution = solve_texts("AA", "BBB", EditCosts::uniform());
        assert_eq!(solution.distance, 1);
    }

    #[test]
    fn test_renaming_maps_first_word_into_second() {
        // First word has the larger alphabet, forcing the internal swap;
        // the reported renaming must still map word 1 -> word 2.
        let solution = solve_texts("ABCBC", "ABAB", EditCosts::uniform());
        for &(source, target) in solution.renaming.pairs() {
            assert!(source < 3, "source {source} outside first word's alphabet");
            assert!(target < 2, "target {target} outside second word's alphabet");
        }
    }

    #[test]
    fn test_indel_heavy_costs() {
        // Same structure, different length: two positions must be inserted
        // at cost 10 each under the identity-preferring preset.
        let solution = solve_texts("ABAB", "ABABAB", EditCosts::indel_heavy());
        assert_eq!(solution.distance, 20);
    }
}
