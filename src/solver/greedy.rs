use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::renaming::Renaming;
use crate::core::word::{indices_to_text, ParameterizedWord};
use crate::solver::alignment::{global_align, AlignScoring};
use crate::solver::distance::{distance, EditCosts};

/// Approximate solution built by the greedy heuristic.
#[derive(Debug, Clone)]
pub struct GreedySolution {
    /// Weighted edit distance of the two final renderings. An upper bound
    /// on the exact optimum, never below it.
    pub distance: u64,

    /// The constructed injective renaming, mapping the first word's
    /// alphabet into the second word's.
    pub renaming: Renaming,

    /// Both words rendered under the constructed renaming, in input order.
    pub rendered: (String, String),

    /// Global alignment score of the final renderings.
    pub alignment_score: i64,

    pub elapsed: Duration,
}

/// Relabel a word under a partial map; unmapped symbols all take the
/// shared `placeholder` letter, one past the settled range.
fn relabel_partial(symbols: &[u32], map: &[Option<u32>], placeholder: u32) -> Vec<u32> {
    symbols
        .iter()
        .map(|&s| map[s as usize].unwrap_or(placeholder))
        .collect()
}

/// Build an injective renaming one symbol pair per round, greedily.
///
/// Each round tentatively maps every unsettled pair `(c1, c2)` to the next
/// output letter, renders both words (unsettled symbols elsewhere share a
/// placeholder letter), aligns the renderings globally, and scores the pair
/// by how many alignment columns place the just-settled letter opposite
/// itself. The best pair is committed irrevocably; there is no
/// backtracking. `O(s1^2 * s2)` alignment calls in total, against the
/// factorial enumeration of the exact solver. Strictly a heuristic, with
/// no optimality guarantee.
#[must_use]
pub fn solve(a: &ParameterizedWord, b: &ParameterizedWord, costs: EditCosts) -> GreedySolution {
    let start = Instant::now();

    // Equal alphabet sizes tie-break on the words themselves, so both
    // argument orders run the identical search and d(a,b) == d(b,a).
    let swapped = match a.alphabet_size().cmp(&b.alphabet_size()) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => a.symbols() > b.symbols(),
    };
    let (small, large) = if swapped { (b, a) } else { (a, b) };
    let s1 = small.alphabet_size();
    let s2 = large.alphabet_size();

    let scoring = AlignScoring::default();
    let mut map_small: Vec<Option<u32>> = vec![None; s1 as usize];
    let mut map_large: Vec<Option<u32>> = vec![None; s2 as usize];
    let mut unsettled_small: Vec<u32> = (0..s1).collect();
    let mut unsettled_large: Vec<u32> = (0..s2).collect();
    let mut commits: Vec<(u32, u32)> = Vec::with_capacity(s1 as usize);

    for round in 0..s1 {
        let current = round;
        let placeholder = current + 1;

        // Default to the first unsettled pair so a round with no aligned
        // occurrences still commits something and the loop always ends.
        let mut best_pair = (unsettled_small[0], unsettled_large[0]);
        let mut best_count = 0usize;

        for &c1 in &unsettled_small {
            let mut tentative_small = map_small.clone();
            tentative_small[c1 as usize] = Some(current);
            let rendered_small = relabel_partial(small.symbols(), &tentative_small, placeholder);

            for &c2 in &unsettled_large {
                let mut tentative_large = map_large.clone();
                tentative_large[c2 as usize] = Some(current);
                let rendered_large =
                    relabel_partial(large.symbols(), &tentative_large, placeholder);

                let alignment = global_align(&rendered_small, &rendered_large, scoring);
                let count = alignment.aligned_count(current);
                if count > best_count {
                    best_count = count;
                    best_pair = (c1, c2);
                }
            }
        }

        let (c1, c2) = best_pair;
        map_small[c1 as usize] = Some(current);
        map_large[c2 as usize] = Some(current);
        unsettled_small.retain(|&c| c != c1);
        unsettled_large.retain(|&c| c != c2);
        commits.push((c1, c2));
        debug!(round, c1, c2, aligned = best_count, "committed symbol pair");
    }

    // All smaller-alphabet symbols are settled; leftover larger-alphabet
    // symbols share the placeholder one past the settled range.
    let placeholder = s1;
    let final_small = relabel_partial(small.symbols(), &map_small, placeholder);
    let final_large = relabel_partial(large.symbols(), &map_large, placeholder);
    let alignment = global_align(&final_small, &final_large, scoring);
    let dist = distance(&final_small, &final_large, costs);

    let renaming = Renaming::from_pairs(commits);
    let (renaming, rendered) = if swapped {
        (
            renaming.inverted(),
            (indices_to_text(&final_large), indices_to_text(&final_small)),
        )
    } else {
        (
            renaming,
            (indices_to_text(&final_small), indices_to_text(&final_large)),
        )
    };

    GreedySolution {
        distance: dist,
        renaming,
        rendered,
        alignment_score: alignment.score,
        elapsed: start.elapsed(),
    }
}
