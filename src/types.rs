//! Basic types shared by the graph, the heuristics and the search.
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    ops::Add,
};

/// Type for positions in a sequence, and derived quantities.
pub type I = i32;
/// Type for the cost of an alignment.
pub type Cost = i32;
/// A borrowed sequence.
pub type Seq<'a> = &'a [u8];
/// An owned sequence.
pub type Sequence = Vec<u8>;

/// A node `(i, j)` of the edit graph: the first `i` characters of `a` and
/// the first `j` characters of `b` have been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos(pub I, pub I);

impl Pos {
    pub fn start() -> Self {
        Pos(0, 0)
    }

    pub fn target(a: Seq, b: Seq) -> Self {
        Pos(a.len() as I, b.len() as I)
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Debug>::fmt(self, f)
    }
}

/// Partial ordering by
/// (a,b) <= (c,d) when a<=c and b<=d.
/// (a,b) < (c,d) when a<=c and b<=d and a<c or b<d.
impl PartialOrd for Pos {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let a = self.0.cmp(&other.0);
        let b = self.1.cmp(&other.1);
        if a == b {
            return Some(a);
        }
        if a == Ordering::Equal {
            return Some(b);
        }
        if b == Ordering::Equal {
            return Some(a);
        }
        None
    }
}

impl Add for Pos {
    type Output = Pos;

    #[inline]
    fn add(self, Pos(i, j): Self) -> Self::Output {
        Pos(self.0 + i, self.1 + j)
    }
}

pub fn seq_to_string(seq: Seq) -> String {
    String::from_utf8_lossy(seq).into_owned()
}
