use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// What to do with the last `|a| mod k` characters of `a`, which do not form
/// a full seed.
#[derive(Debug, PartialEq, Eq, Default, Clone, Copy, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSeed {
    /// Drop the partial block.
    #[default]
    Drop,
    /// Keep the partial block as a shorter seed.
    Keep,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seed {
    pub start: I,
    pub end: I,
    /// The number of exact occurrences of this seed in `b`.
    pub matches: usize,
}

impl Seed {
    #[inline]
    pub fn len(&self) -> I {
        self.end - self.start
    }

    #[inline]
    pub fn is_matched(&self) -> bool {
        self.matches > 0
    }
}

/// Split `a` into consecutive seeds of length `k`, starting at multiples of `k`.
pub fn fixed_length_seeds(a: Seq, k: I, trailing: TrailingSeed) -> Vec<Seed> {
    let n = a.len() as I;
    let num_full = n / k;
    let mut seeds = (0..num_full)
        .map(|s| Seed {
            start: s * k,
            end: s * k + k,
            matches: 0,
        })
        .collect_vec();
    if trailing == TrailingSeed::Keep && num_full * k < n {
        seeds.push(Seed {
            start: num_full * k,
            end: n,
            matches: 0,
        });
    }
    seeds
}

#[derive(Default, Debug, Clone)]
pub struct Seeds {
    pub k: I,
    /// Sorted by start. Seed `t` starts at `t*k`.
    pub seeds: Vec<Seed>,
    /// `potential[t]` is the number of unmatched seeds with index at least `t`.
    pub potential: Vec<Cost>,
    n: I,
}

impl Seeds {
    /// Seeds must be consecutive and start at multiples of `k`.
    pub fn new(a: Seq, k: I, seeds: Vec<Seed>) -> Self {
        assert!(k > 0);
        assert!(seeds
            .iter()
            .enumerate()
            .all(|(t, seed)| seed.start == t as I * k && seed.start < seed.end));
        assert!(seeds.last().map_or(true, |s| s.end <= a.len() as I));

        let mut potential = vec![0; seeds.len() + 1];
        for (t, seed) in seeds.iter().enumerate().rev() {
            potential[t] = potential[t + 1] + !seed.is_matched() as Cost;
        }
        Seeds {
            k,
            seeds,
            potential,
            n: a.len() as I,
        }
    }

    pub fn n(&self) -> I {
        self.n
    }

    /// The number of unmatched seeds that start at or after `i`.
    ///
    /// Each of those needs at least one edit to be crossed, so this is a lower
    /// bound on the remaining cost from any `Pos(i, _)`.
    #[inline]
    pub fn potential(&self, Pos(i, _): Pos) -> Cost {
        assert!(
            0 <= i && i <= self.n,
            "Position i={i} lies outside sequence a of length {}",
            self.n
        );
        let t = ((i + self.k - 1) / self.k) as usize;
        self.potential[min(t, self.seeds.len())]
    }

    pub fn num_unmatched(&self) -> Cost {
        self.potential[0]
    }
}
