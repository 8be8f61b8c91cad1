//! Types related to the edit graph.
use smallvec::SmallVec;

use crate::types::*;

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    // The root, or an unvisited state.
    #[default]
    None,
    Match,
    Substitution,
    /// Consume a character of `a` only: `(i, j) -> (i+1, j)`.
    Deletion,
    /// Consume a character of `b` only: `(i, j) -> (i, j+1)`.
    Insertion,
}

impl Edge {
    /// The position this edge into `pos` starts at.
    pub fn back(&self, &Pos(i, j): &Pos) -> Option<Pos> {
        let p = match self {
            Edge::None => None?,
            Edge::Match | Edge::Substitution => Pos(i - 1, j - 1),
            Edge::Deletion => Pos(i - 1, j),
            Edge::Insertion => Pos(i, j - 1),
        };
        (p.0 >= 0 && p.1 >= 0).then_some(p)
    }

    pub fn cost(&self) -> Cost {
        match self {
            Edge::Match => 0,
            Edge::None => panic!("Cost of None!"),
            _ => 1,
        }
    }
}

/// The implicit edit graph over two sequences.
///
/// Nodes are all `Pos(i, j)` with `0 <= i <= |a|` and `0 <= j <= |b|`.
/// Edges are computed on demand; nothing beyond the two sequences is stored.
#[derive(Clone, Copy, Debug)]
pub struct EditGraph<'a> {
    pub a: Seq<'a>,
    pub b: Seq<'a>,
    pub target: Pos,
}

impl<'a> EditGraph<'a> {
    pub fn new(a: Seq<'a>, b: Seq<'a>) -> EditGraph<'a> {
        EditGraph {
            a,
            b,
            target: Pos::target(a, b),
        }
    }

    #[inline]
    pub fn start(&self) -> Pos {
        Pos(0, 0)
    }

    #[inline]
    pub fn target(&self) -> Pos {
        self.target
    }

    #[inline]
    pub fn is_goal(&self, pos: Pos) -> bool {
        self.assert_in_bounds(pos);
        pos == self.target
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        Pos(0, 0) <= pos && pos <= self.target
    }

    #[inline]
    fn assert_in_bounds(&self, pos: Pos) {
        assert!(
            self.contains(pos),
            "Position {pos} lies outside the edit graph with target {}",
            self.target
        );
    }

    #[inline]
    pub fn is_match(&self, Pos(i, j): Pos) -> Option<Pos> {
        if self.a.get(i as usize)? == self.b.get(j as usize)? {
            Some(Pos(i + 1, j + 1))
        } else {
            None
        }
    }

    /// Map a function `f` over all the outgoing edges of the given position.
    ///
    /// Edges are visited in the order diagonal, deletion, insertion.
    #[inline]
    pub fn iterate_outgoing_edges<F>(&self, p: Pos, mut f: F)
    where
        F: FnMut(Pos, Edge),
    {
        self.assert_in_bounds(p);
        let diagonal = if self.is_match(p).is_some() {
            Edge::Match
        } else {
            Edge::Substitution
        };
        for (dp, edge) in [
            (Pos(1, 1), diagonal),
            (Pos(1, 0), Edge::Deletion),
            (Pos(0, 1), Edge::Insertion),
        ] {
            let pos = p + dp;
            if pos <= self.target {
                f(pos, edge)
            }
        }
    }

    /// The successors of `p` together with the cost of the edge to them.
    pub fn neighbors(&self, p: Pos) -> SmallVec<[(Pos, Cost); 3]> {
        let mut out = SmallVec::new();
        self.iterate_outgoing_edges(p, |pos, edge| out.push((pos, edge.cost())));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_inside() {
        let g = EditGraph::new(b"AC", b"AG");
        assert_eq!(
            g.neighbors(Pos(0, 0)).as_slice(),
            &[(Pos(1, 1), 0), (Pos(1, 0), 1), (Pos(0, 1), 1)]
        );
        assert_eq!(
            g.neighbors(Pos(1, 1)).as_slice(),
            &[(Pos(2, 2), 1), (Pos(2, 1), 1), (Pos(1, 2), 1)]
        );
    }

    #[test]
    fn neighbors_on_border() {
        let g = EditGraph::new(b"AC", b"AG");
        assert_eq!(g.neighbors(Pos(2, 0)).as_slice(), &[(Pos(2, 1), 1)]);
        assert_eq!(g.neighbors(Pos(0, 2)).as_slice(), &[(Pos(1, 2), 1)]);
        assert!(g.neighbors(Pos(2, 2)).is_empty());
    }

    #[test]
    fn goal() {
        let g = EditGraph::new(b"AC", b"A");
        assert!(g.is_goal(Pos(2, 1)));
        assert!(!g.is_goal(Pos(1, 1)));
        let empty = EditGraph::new(b"", b"");
        assert!(empty.is_goal(empty.start()));
        assert!(empty.neighbors(Pos(0, 0)).is_empty());
    }

    #[test]
    #[should_panic(expected = "outside the edit graph")]
    fn out_of_bounds_query() {
        EditGraph::new(b"AC", b"A").neighbors(Pos(3, 0));
    }

    #[test]
    fn edge_back() {
        assert_eq!(Edge::Match.back(&Pos(2, 3)), Some(Pos(1, 2)));
        assert_eq!(Edge::Deletion.back(&Pos(2, 3)), Some(Pos(1, 3)));
        assert_eq!(Edge::Insertion.back(&Pos(2, 3)), Some(Pos(2, 2)));
        assert_eq!(Edge::Insertion.back(&Pos(2, 0)), None);
        assert_eq!(Edge::None.back(&Pos(2, 3)), None);
    }
}
