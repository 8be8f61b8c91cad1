//! Exact lookup of seeds of `a` in `b`.
//!
//! All (sliding-window) k-mers of `b` are put in a hashmap once, after which
//! each seed of `a` is a single lookup.
use bio::alphabets::{Alphabet, RankTransform};
use smallvec::SmallVec;

use crate::prelude::*;

/// Start positions in `b` of a k-mer.
type Positions = SmallVec<[I; 2]>;

/// An index of all length-`k` windows of `b`.
pub enum KmerIndex<'a> {
    /// k-mers packed into a `usize` of ranks, with the first character in the
    /// high-order bits. Built with a rolling window in `O(|b|)`.
    Packed {
        k: I,
        rt: RankTransform,
        width: usize,
        map: HashMap<usize, Positions>,
    },
    /// Fallback for k-mers that do not fit in a `usize`.
    Raw {
        k: I,
        map: HashMap<Seq<'a>, Positions>,
    },
}

impl<'a> KmerIndex<'a> {
    /// Index the `k`-mers of `b`. The alphabet is taken from both sequences,
    /// so that any k-mer of `a` can be queried.
    pub fn new(a: Seq, b: Seq<'a>, k: I) -> Self {
        assert!(k > 0, "k-mers must have positive length");
        let rt = RankTransform::new(&Alphabet::new(a.iter().chain(b.iter())));
        let width = rt.get_width();
        let num_kmers = (b.len() + 1).saturating_sub(k as usize);

        if width * k as usize <= usize::BITS as usize {
            let mut map = HashMap::<usize, Positions>::default();
            map.reserve(num_kmers);
            for (j, q) in (0..).zip(rt.qgrams(k as u32, b)) {
                map.entry(q).or_default().push(j);
            }
            KmerIndex::Packed { k, rt, width, map }
        } else {
            let mut map = HashMap::<Seq<'a>, Positions>::default();
            map.reserve(num_kmers);
            for (j, w) in (0..).zip(b.windows(k as usize)) {
                map.entry(w).or_default().push(j);
            }
            KmerIndex::Raw { k, map }
        }
    }

    pub fn k(&self) -> I {
        match self {
            KmerIndex::Packed { k, .. } | KmerIndex::Raw { k, .. } => *k,
        }
    }

    /// Number of distinct k-mers in `b`.
    pub fn len(&self) -> usize {
        match self {
            KmerIndex::Packed { map, .. } => map.len(),
            KmerIndex::Raw { map, .. } => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All start positions in `b` where `kmer` occurs.
    pub fn occurrences(&self, kmer: Seq) -> &[I] {
        assert_eq!(kmer.len(), self.k() as usize, "Query has the wrong length.");
        let positions = match self {
            KmerIndex::Packed { rt, width, map, .. } => {
                let mut q = 0usize;
                for &c in kmer {
                    q <<= *width;
                    q |= rt.get(c) as usize;
                }
                map.get(&q)
            }
            KmerIndex::Raw { map, .. } => map.get(kmer),
        };
        positions.map_or(&[], |p| p.as_slice())
    }

    pub fn contains(&self, kmer: Seq) -> bool {
        !self.occurrences(kmer).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_all_occurrences() {
        let b = b"ACGTACGA";
        let index = KmerIndex::new(b"TTT", b, 3);
        assert!(matches!(index, KmerIndex::Packed { .. }));
        assert_eq!(index.occurrences(b"ACG"), &[0, 4]);
        assert_eq!(index.occurrences(b"GTA"), &[2]);
        assert!(index.occurrences(b"TTT").is_empty());
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn raw_fallback_for_long_kmers() {
        // 4 symbols need 2 bits each, so 40-mers do not fit in 64 bits.
        let b: Vec<u8> = b"ACGT".iter().copied().cycle().take(100).collect();
        let index = KmerIndex::new(b"", &b, 40);
        assert!(matches!(index, KmerIndex::Raw { .. }));
        assert_eq!(index.occurrences(&b[4..44]).len(), 16);
        let mut other = b[4..44].to_vec();
        other[10] = b'A';
        assert!(!index.contains(&other));
    }

    #[test]
    fn symbols_only_in_a() {
        let index = KmerIndex::new(b"NNNN", b"ACGT", 2);
        assert!(!index.contains(b"NN"));
        assert!(index.contains(b"CG"));
    }

    #[test]
    fn single_symbol_alphabet() {
        let index = KmerIndex::new(b"AAA", b"AAAA", 2);
        assert_eq!(index.occurrences(b"AA"), &[0, 1, 2]);
    }
}
