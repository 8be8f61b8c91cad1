//! The seed heuristic.
//!
//! `a` is split into disjoint seeds of length `k`. A seed that does not occur
//! exactly anywhere in `b` can not be aligned without at least one edit, and
//! since seeds are disjoint these edits are distinct. So the number of such
//! unmatched seeds starting at or after `i` lower bounds the remaining cost
//! from any `Pos(i, j)`.
//!
//! The heuristic is admissible but not consistent: it drops by one along a
//! cost-0 match entering an unmatched seed. It does satisfy
//! `h(u) <= 1 + h(v)` for every edge `u -> v`.
use super::*;
use crate::error::Error;
use crate::matches::KmerIndex;
use crate::seeds::{fixed_length_seeds, TrailingSeed};

/// How to choose the seed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthConfig {
    Fixed(I),
    /// `ceil(log_σ |a|)`, where `σ` is the number of distinct symbols.
    /// Capped by the sequence lengths and at least 1.
    Auto,
}

impl LengthConfig {
    pub fn k(&self, a: Seq, b: Seq) -> I {
        match *self {
            LengthConfig::Fixed(k) => k,
            LengthConfig::Auto => {
                let k = auto_seed_length(a.len(), alphabet_size(a, b));
                max(1, min(k, min(a.len(), b.len()) as I))
            }
        }
    }
}

fn alphabet_size(a: Seq, b: Seq) -> usize {
    let mut seen = [false; 256];
    for &c in a.iter().chain(b) {
        seen[c as usize] = true;
    }
    seen.iter().filter(|&&s| s).count()
}

/// The smallest `k` with `σ^k >= n`, i.e. `ceil(log_σ n)`.
/// Alphabets with fewer than 2 symbols are treated as binary.
pub fn auto_seed_length(n: usize, sigma: usize) -> I {
    let sigma = max(sigma, 2) as u128;
    let mut k = 0;
    let mut power = 1u128;
    while power < n as u128 {
        power *= sigma;
        k += 1;
    }
    k
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SH {
    pub length: LengthConfig,
    pub trailing: TrailingSeed,
}

impl SH {
    pub fn new(k: I) -> Self {
        Self {
            length: LengthConfig::Fixed(k),
            trailing: TrailingSeed::Drop,
        }
    }

    pub fn auto() -> Self {
        Self {
            length: LengthConfig::Auto,
            trailing: TrailingSeed::Drop,
        }
    }

    pub fn with_trailing(self, trailing: TrailingSeed) -> Self {
        Self { trailing, ..self }
    }
}

impl Heuristic for SH {
    type Instance = SHI;

    fn build(&self, a: Seq, b: Seq) -> Result<Self::Instance> {
        SHI::new(a, b, *self)
    }

    fn name(&self) -> String {
        "SH".into()
    }
}

pub struct SHI {
    params: SH,
    seeds: Seeds,
    target: Pos,
    stats: HeuristicStats,
}

impl SHI {
    fn new(a: Seq, b: Seq, params: SH) -> Result<Self> {
        let k = params.length.k(a, b);
        if k <= 0 {
            return Err(Error::NonPositiveSeedLength { k });
        }
        for (name, seq) in [('a', a), ('b', b)] {
            if k as usize > seq.len() {
                return Err(Error::SeedLongerThanSequence {
                    k,
                    name,
                    len: seq.len(),
                });
            }
        }

        let mut seeds = fixed_length_seeds(a, k, params.trailing);
        let index = KmerIndex::new(a, b, k);
        // Only built when the trailing partial seed is kept.
        let mut short_index = None;
        for seed in &mut seeds {
            let kmer = &a[seed.start as usize..seed.end as usize];
            seed.matches = if seed.len() == k {
                index.occurrences(kmer).len()
            } else {
                short_index
                    .get_or_insert_with(|| KmerIndex::new(a, b, seed.len()))
                    .occurrences(kmer)
                    .len()
            };
        }
        let seeds = Seeds::new(a, k, seeds);

        let stats = HeuristicStats {
            k,
            num_seeds: seeds.seeds.len() as I,
            num_unmatched: seeds.num_unmatched(),
            num_matches: seeds.seeds.iter().map(|s| s.matches).sum(),
            h0: seeds.num_unmatched(),
        };
        log::debug!(
            "SH k={k} trailing={:?}: {} seeds, {} unmatched, {} matches, {} distinct kmers in b",
            params.trailing,
            stats.num_seeds,
            stats.num_unmatched,
            stats.num_matches,
            index.len()
        );

        Ok(SHI {
            params,
            seeds,
            target: Pos::target(a, b),
            stats,
        })
    }
}

impl HeuristicInstance for SHI {
    fn h(&self, pos: Pos) -> Cost {
        assert!(
            0 <= pos.1 && pos.1 <= self.target.1,
            "Position {pos} lies outside the edit graph with target {}",
            self.target
        );
        self.seeds.potential(pos)
    }

    fn stats(&self) -> HeuristicStats {
        self.stats
    }

    fn seeds(&self) -> Option<&Seeds> {
        Some(&self.seeds)
    }

    fn params_string(&self) -> String {
        format!("{:?}", self.params)
    }
}
