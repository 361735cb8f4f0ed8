use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::word::{canonical_letter, Alphabet};

/// A partial injective mapping from one word's alphabet to the other's,
/// stored as (source index, target index) pairs.
///
/// Invariant: no two pairs share a source and no two pairs share a target.
/// Solvers guarantee this by construction; [`Renaming::from_pairs`] checks
/// it in debug builds only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renaming {
    pairs: Vec<(u32, u32)>,
}

/// Error parsing the compact `A->C,B->D` renaming form.
#[derive(Debug, Error)]
#[error("invalid renaming entry: '{0}'")]
pub struct ParseRenamingError(String);

impl Renaming {
    #[must_use]
    pub fn from_pairs(pairs: Vec<(u32, u32)>) -> Self {
        debug_assert!(
            {
                let mut sources: Vec<u32> = pairs.iter().map(|p| p.0).collect();
                let mut targets: Vec<u32> = pairs.iter().map(|p| p.1).collect();
                sources.sort_unstable();
                sources.dedup();
                targets.sort_unstable();
                targets.dedup();
                sources.len() == pairs.len() && targets.len() == pairs.len()
            },
            "renaming must be injective"
        );
        Self { pairs }
    }

    /// The identity renaming on the first `size` canonical indices.
    #[must_use]
    pub fn identity(size: u32) -> Self {
        Self {
            pairs: (0..size).map(|i| (i, i)).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[must_use]
    pub fn pairs(&self) -> &[(u32, u32)] {
        &self.pairs
    }

    /// Target index for a source index, if mapped.
    #[must_use]
    pub fn target(&self, source: u32) -> Option<u32> {
        self.pairs.iter().find(|p| p.0 == source).map(|p| p.1)
    }

    /// Is this the identity mapping on its own domain?
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.pairs.iter().all(|&(s, t)| s == t)
    }

    /// Swap sources and targets. The inverse of an injection is an
    /// injection, so the invariant is preserved.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            pairs: self.pairs.iter().map(|&(s, t)| (t, s)).collect(),
        }
    }

    /// Apply the mapping to a canonical index sequence; unmapped indices
    /// pass through unchanged.
    #[must_use]
    pub fn apply(&self, symbols: &[u32]) -> Vec<u32> {
        symbols
            .iter()
            .map(|&s| self.target(s).unwrap_or(s))
            .collect()
    }

    /// Render the mapping with the original symbols of both words, e.g.
    /// `Medee->Cleandre, Jason->Jason`.
    #[must_use]
    pub fn display_with(&self, source: &Alphabet, target: &Alphabet) -> String {
        let mut out = String::new();
        for (i, &(s, t)) in self.pairs.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            match (source.symbol(s), target.symbol(t)) {
                (Some(a), Some(b)) => {
                    out.push_str(a);
                    out.push_str("->");
                    out.push_str(b);
                }
                _ => {
                    out.push(canonical_letter(s));
                    out.push_str("->");
                    out.push(canonical_letter(t));
                }
            }
        }
        out
    }
}

impl fmt::Display for Renaming {
    /// Compact canonical form: `A->C,B->D`. Also the wire form used by the
    /// execution harness, so it must stay parseable by [`FromStr`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &(s, t)) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}->{}", canonical_letter(s), canonical_letter(t))?;
        }
        Ok(())
    }
}

impl FromStr for Renaming {
    type Err = ParseRenamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::default());
        }
        let mut pairs = Vec::new();
        for entry in s.split(',') {
            let (from, to) = entry
                .split_once("->")
                .ok_or_else(|| ParseRenamingError(entry.to_string()))?;
            let source = single_letter_index(from)
                .ok_or_else(|| ParseRenamingError(entry.to_string()))?;
            let target = single_letter_index(to)
                .ok_or_else(|| ParseRenamingError(entry.to_string()))?;
            pairs.push((source, target));
        }
        Ok(Self { pairs })
    }
}

fn single_letter_index(s: &str) -> Option<u32> {
    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    (c as u32).checked_sub('A' as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::word::normalize;

    #[test]
    fn test_identity() {
        let r = Renaming::identity(3);
        assert!(r.is_identity());
        assert_eq!(r.len(), 3);
        assert_eq!(r.target(2), Some(2));
        assert_eq!(r.target(3), None);
    }

    #[test]
    fn test_display_round_trip() {
        let r = Renaming::from_pairs(vec![(0, 2), (1, 0)]);
        let text = r.to_string();
        assert_eq!(text, "A->C,B->A");
        let parsed: Renaming = text.parse().unwrap();
        assert_eq!(parsed, r);
    }

    #[test]
    fn test_empty_round_trip() {
        let r = Renaming::default();
        assert_eq!(r.to_string(), "");
        let parsed: Renaming = "".parse().unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("A-C".parse::<Renaming>().is_err());
        assert!("AB->C".parse::<Renaming>().is_err());
    }

    #[test]
    fn test_apply_passes_unmapped_through() {
        let r = Renaming::from_pairs(vec![(0, 2)]);
        assert_eq!(r.apply(&[0, 1, 0]), vec![2, 1, 2]);
    }

    #[test]
    fn test_inverted() {
        let r = Renaming::from_pairs(vec![(0, 1), (1, 2)]);
        let inv = r.inverted();
        assert_eq!(inv.target(1), Some(0));
        assert_eq!(inv.target(2), Some(1));
    }

    #[test]
    fn test_display_with_symbols() {
        let (_, source) = normalize(["Medee", "Jason"]);
        let (_, target) = normalize(["Cleandre", "Jason"]);
        let r = Renaming::from_pairs(vec![(0, 0), (1, 1)]);
        assert_eq!(r.display_with(&source, &target), "Medee->Cleandre, Jason->Jason");
    }
}
