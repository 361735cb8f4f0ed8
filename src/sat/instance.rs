use std::io::{self, Write};

use crate::core::renaming::Renaming;
use crate::core::word::ParameterizedWord;

/// Encoding options.
#[derive(Debug, Clone, Copy)]
pub struct SatConfig {
    /// Emit the clauses making the renaming injective (no two source
    /// symbols share a target). This is the supported, validated mode;
    /// turning it off leaves only the function clauses.
    pub bijective: bool,
}

impl Default for SatConfig {
    fn default() -> Self {
        Self { bijective: true }
    }
}

/// One weighted clause: disjunction of signed literals.
#[derive(Debug, Clone)]
struct WeightedClause {
    weight: u64,
    literals: Vec<i64>,
}

/// A weighted CNF instance for one pair of canonical words.
///
/// Two variable families share one dense 1-based index space:
/// `x[i,j]` ("position i of word 1 aligns with position j of word 2") at
/// `i*m + j + 1`, then `y[a,b]` ("symbol a renames to symbol b") at
/// `n*m + a*k + b + 1`, where `n`, `m` are the word lengths and `k` the
/// combined alphabet size. The rectangles are small and contiguous, so
/// computed offsets replace any keyed map.
///
/// Built fresh per comparison and discarded after the external solver's
/// answer is decoded.
#[derive(Debug, Clone)]
pub struct SatInstance {
    n: usize,
    m: usize,
    k: usize,
    top: u64,
    comments: Vec<String>,
    clauses: Vec<WeightedClause>,
}

/// Assignment decoded from the external solver's output.
#[derive(Debug, Clone)]
pub struct DecodedSolution {
    /// Aligned position pairs (i, j), each counted once.
    pub matches: Vec<(usize, usize)>,

    /// Non-identity symbol renamings read off the true `y` variables.
    pub renaming: Renaming,

    /// `len(word1) + len(word2) - 2 * match_count`: every match removes
    /// one ordinary edit on each side.
    pub distance: u64,
}

impl DecodedSolution {
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

impl SatInstance {
    /// Encode the matching problem for two canonical words.
    #[must_use]
    pub fn encode(a: &ParameterizedWord, b: &ParameterizedWord, config: &SatConfig) -> Self {
        let n = a.len();
        let m = b.len();
        let k = a.alphabet_size().max(b.alphabet_size()) as usize;
        let u = a.symbols();
        let v = b.symbols();

        // Hard clauses must dominate any sum of soft weights; the soft
        // clauses are exactly the n*m unit match rewards.
        let top = (n * m) as u64;

        let mut instance = Self {
            n,
            m,
            k,
            top,
            comments: Vec::new(),
            clauses: Vec::new(),
        };

        // No position of word 1 matches two different positions of word 2.
        for i in 0..n {
            for j1 in 0..m {
                for j2 in j1 + 1..m {
                    instance.hard(vec![-instance.x(i, j1), -instance.x(i, j2)]);
                }
            }
        }

        // No position of word 2 matches two different positions of word 1.
        for j in 0..m {
            for i1 in 0..n {
                for i2 in i1 + 1..n {
                    instance.hard(vec![-instance.x(i1, j), -instance.x(i2, j)]);
                }
            }
        }

        // Matches never cross: i1 < i2 forbids pairing them with j2 < j1,
        // enforcing a monotone alignment.
        for i1 in 0..n {
            for i2 in i1 + 1..n {
                for j1 in 0..m {
                    for j2 in 0..j1 {
                        instance.hard(vec![-instance.x(i1, j1), -instance.x(i2, j2)]);
                    }
                }
            }
        }

        // The renaming is a function: one target per source symbol.
        for sym in 0..k {
            for b1 in 0..k {
                for b2 in b1 + 1..k {
                    instance.hard(vec![-instance.y(sym, b1), -instance.y(sym, b2)]);
                }
            }
        }

        // And injective, in the supported mode: one source per target.
        if config.bijective {
            for target in 0..k {
                for a1 in 0..k {
                    for a2 in a1 + 1..k {
                        instance.hard(vec![-instance.y(a1, target), -instance.y(a2, target)]);
                    }
                }
            }
        }

        // Matched positions force the corresponding symbol renaming.
        for i in 0..n {
            for j in 0..m {
                let lit = instance.y(u[i] as usize, v[j] as usize);
                instance.hard(vec![-instance.x(i, j), lit]);
            }
        }

        // The objective: reward every aligned position pair.
        for i in 0..n {
            for j in 0..m {
                let lit = instance.x(i, j);
                instance.soft(vec![lit]);
            }
        }

        instance
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }

    fn x(&self, i: usize, j: usize) -> i64 {
        (i * self.m + j + 1) as i64
    }

    fn y(&self, a: usize, b: usize) -> i64 {
        (self.n * self.m + a * self.k + b + 1) as i64
    }

    fn hard(&mut self, literals: Vec<i64>) {
        let weight = self.top;
        self.clauses.push(WeightedClause { weight, literals });
    }

    fn soft(&mut self, literals: Vec<i64>) {
        self.clauses.push(WeightedClause {
            weight: 1,
            literals,
        });
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.n * self.m + self.k * self.k
    }

    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn hard_weight(&self) -> u64 {
        self.top
    }

    /// Write the instance in the weighted-CNF text convention: `c` comment
    /// lines, a `p wcnf <vars> <clauses> <top>` header, then one clause per
    /// line as `<weight> <lits...> 0`.
    pub fn write_wcnf(&self, out: &mut impl Write) -> io::Result<()> {
        for comment in &self.comments {
            writeln!(out, "c {comment}")?;
        }
        writeln!(
            out,
            "p wcnf {} {} {}",
            self.num_vars(),
            self.num_clauses(),
            self.top
        )?;
        for clause in &self.clauses {
            write!(out, "{}", clause.weight)?;
            for lit in &clause.literals {
                write!(out, " {lit}")?;
            }
            writeln!(out, " 0")?;
        }
        Ok(())
    }

    #[must_use]
    pub fn to_wcnf_string(&self) -> String {
        let mut buffer = Vec::new();
        // Writing to a Vec<u8> cannot fail.
        let _ = self.write_wcnf(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Decode a truth assignment (variable index order, 1-based variable i
    /// at `bits[i-1]`) into matches, a renaming, and the distance.
    ///
    /// Missing trailing bits are read as false; surplus bits are ignored.
    #[must_use]
    pub fn decode_assignment(&self, bits: &[bool]) -> DecodedSolution {
        let mut matches = Vec::new();
        let mut pairs = Vec::new();

        let x_count = self.n * self.m;
        for (index, &value) in bits.iter().take(self.num_vars()).enumerate() {
            if !value {
                continue;
            }
            if index < x_count {
                matches.push((index / self.m, index % self.m));
            } else {
                let offset = index - x_count;
                let (a, b) = (offset / self.k, offset % self.k);
                if a != b {
                    pairs.push((a as u32, b as u32));
                }
            }
        }

        let match_count = matches.len() as u64;
        let distance = (self.n + self.m) as u64 - 2 * match_count;

        DecodedSolution {
            matches,
            renaming: Renaming::from_pairs(pairs),
            distance,
        }
    }
}
