use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// First canonical letter. Canonical indices render as consecutive code
/// points starting here, so index 0 is `A`, index 25 is `Z`, and larger
/// alphabets continue into the following Unicode range.
const CANONICAL_BASE: u32 = 'A' as u32;

/// Render a canonical alphabet index as its letter.
#[must_use]
pub fn canonical_letter(index: u32) -> char {
    char::from_u32(CANONICAL_BASE + index).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// The ordered set of original symbols observed in a sequence, in order of
/// first appearance. Doubles as the symbol table mapping canonical indices
/// back to the original symbols for result reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    symbols: Vec<String>,
}

impl Alphabet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The original symbol behind a canonical index, if in range.
    #[must_use]
    pub fn symbol(&self, index: u32) -> Option<&str> {
        self.symbols.get(index as usize).map(String::as_str)
    }

    /// Iterate over (canonical index, original symbol) pairs.
    pub fn entries(&self) -> impl Iterator<Item = (u32, &str)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (i as u32, s.as_str()))
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", canonical_letter(i as u32), symbol)?;
        }
        Ok(())
    }
}

/// A sequence of indices into an [`Alphabet`].
///
/// Invariant: indices are assigned by first occurrence, so the first symbol
/// is always index 0, and a new index only ever appears once all smaller
/// indices have appeared. Two structurally identical renaming patterns
/// always canonicalize to the same word. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterizedWord {
    symbols: Vec<u32>,
    alphabet_size: u32,
}

impl ParameterizedWord {
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of distinct symbols in the word.
    #[must_use]
    pub fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }

    #[must_use]
    pub fn symbols(&self) -> &[u32] {
        &self.symbols
    }

    /// The word in canonical letters (`ABAB...`).
    #[must_use]
    pub fn canonical_text(&self) -> String {
        self.symbols.iter().map(|&s| canonical_letter(s)).collect()
    }

    /// Relabel the word under a partial output-letter assignment.
    ///
    /// `assignment` lists alphabet indices in the order they take the output
    /// letters `0, 1, 2, ...`; every index of this word's alphabet that is
    /// not listed is padded with the next fresh letters past the assigned
    /// range, so padded symbols can never coincide with assigned ones.
    #[must_use]
    pub fn relabel(&self, assignment: &[u32]) -> Vec<u32> {
        let mut mapping: Vec<Option<u32>> = vec![None; self.alphabet_size as usize];
        let mut next = 0u32;
        for &index in assignment {
            if let Some(slot) = mapping.get_mut(index as usize) {
                *slot = Some(next);
            }
            next += 1;
        }
        for slot in &mut mapping {
            if slot.is_none() {
                *slot = Some(next);
                next += 1;
            }
        }
        self.symbols
            .iter()
            .map(|&s| mapping[s as usize].unwrap_or(s))
            .collect()
    }

    /// [`Self::relabel`] rendered as canonical text.
    #[must_use]
    pub fn render(&self, assignment: &[u32]) -> String {
        indices_to_text(&self.relabel(assignment))
    }
}

impl fmt::Display for ParameterizedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_text())
    }
}

/// Render a relabeled index sequence as canonical letters.
#[must_use]
pub fn indices_to_text(indices: &[u32]) -> String {
    indices.iter().map(|&s| canonical_letter(s)).collect()
}

/// Normalize a raw symbol sequence into a canonical word plus the symbol
/// table mapping canonical indices back to the original symbols.
///
/// Symbols only need equality; provenance is the caller's concern. An empty
/// input yields an empty word, which every solver accepts.
pub fn normalize<S, I>(sequence: I) -> (ParameterizedWord, Alphabet)
where
    S: Eq + std::hash::Hash + ToString,
    I: IntoIterator<Item = S>,
{
    let mut seen: HashMap<S, u32> = HashMap::new();
    let mut table: Vec<String> = Vec::new();
    let mut symbols: Vec<u32> = Vec::new();

    for symbol in sequence {
        let next = seen.len() as u32;
        let index = match seen.get(&symbol) {
            Some(&index) => index,
            None => {
                table.push(symbol.to_string());
                seen.insert(symbol, next);
                next
            }
        };
        symbols.push(index);
    }

    let alphabet_size = table.len() as u32;
    (
        ParameterizedWord {
            symbols,
            alphabet_size,
        },
        Alphabet { symbols: table },
    )
}

/// Normalize a string of single-character symbols.
#[must_use]
pub fn normalize_chars(text: &str) -> (ParameterizedWord, Alphabet) {
    normalize(text.chars())
}
