//!
//! # A* edit distance
//!
//! Exact unit-cost edit distance between two sequences, computed with A*
//! on the edit graph.
//!
//! It can be used in a few ways:
//! - Build a heuristic instance with [`Heuristic::build`] and call [`astar`] directly.
//! - Create a reusable [`AstarEd`] object from a typed heuristic.
//! - Create an [`AstarEdParams`] object from [`HeuristicArgs`], which
//!   instantiates the heuristic for you.
//!
//! Two heuristics are provided: [`ZeroCost`], which turns A* into Dijkstra,
//! and the seed heuristic [`SH`], which counts the seeds of `a` that do not
//! occur in `b`.
//!
//! ```
//! use astar_edit_distance::{AstarEd, SH};
//! let result = AstarEd { h: SH::new(2) }.align(b"ACGTAC", b"ACTTAC").unwrap();
//! assert_eq!(result.distance, 1);
//! ```
pub mod astar;
pub mod cli;
pub mod edit_graph;
pub mod error;
pub mod generate;
pub mod heuristic;
pub mod matches;
pub mod queue;
pub mod seeds;
pub mod stats;
pub mod types;
#[cfg(test)]
mod tests;

// The main alignment function.
pub use astar::{astar, SearchResult};
pub use error::{Error, Result};
pub use heuristic::{
    CheckConsistency, Heuristic, HeuristicArgs, HeuristicInstance, HeuristicMapper,
    HeuristicType, LengthConfig, ZeroCost, SH,
};
pub use seeds::TrailingSeed;
pub use types::*;

mod prelude {
    pub use crate::types::*;
    pub use rustc_hash::FxHashMap as HashMap;
    pub use std::cmp::{max, min};
}

// ------------ Root alignment interface follows from here ------------

use prelude::max;
use serde::{Deserialize, Serialize};

/// The main entrypoint for running A* with some parameters.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct AstarEdParams {
    pub heuristic: HeuristicArgs,
}

/// Alternative configuration using a typed `Heuristic` instance instead of a fixed config.
#[derive(Debug, Clone, Copy)]
pub struct AstarEd<H: Heuristic> {
    pub h: H,
}

impl AstarEdParams {
    pub fn new(heuristic: HeuristicArgs) -> Self {
        Self { heuristic }
    }

    pub fn aligner(&self) -> Box<dyn AstarEdAligner> {
        struct Runner;
        impl HeuristicMapper for Runner {
            type R = Box<dyn AstarEdAligner>;
            fn call<H: Heuristic + 'static>(&self, h: H) -> Box<dyn AstarEdAligner> {
                Box::new(AstarEd { h })
            }
        }

        self.heuristic.map(Runner)
    }

    pub fn align(&self, a: Seq, b: Seq) -> Result<SearchResult> {
        self.aligner().align(a, b)
    }
}

impl<H: Heuristic> AstarEd<H> {
    /// Build the heuristic for `a` and `b` and run A*.
    ///
    /// Fails only when the heuristic can not be built for this pair.
    pub fn align(&self, a: Seq, b: Seq) -> Result<SearchResult> {
        let start = instant::Instant::now();
        let h = self.h.build(a, b)?;
        let precomp = start.elapsed().as_secs_f64();

        let mut result = astar(a, b, &h);
        result.stats.timing.precomp = precomp;
        result.stats.timing.total = start.elapsed().as_secs_f64();
        Ok(result)
    }
}

/// Helper trait to work with a `Box<dyn AstarEdAligner>` where the type of the
/// heuristic is hidden.
pub trait AstarEdAligner {
    fn align(&self, a: Seq, b: Seq) -> Result<SearchResult>;
    fn name(&self) -> String;
}

impl<H: Heuristic> AstarEdAligner for AstarEd<H> {
    fn align(&self, a: Seq, b: Seq) -> Result<SearchResult> {
        AstarEd::align(self, a, b)
    }

    fn name(&self) -> String {
        self.h.name()
    }
}

/// The edit distance between `a` and `b`, using the seed heuristic with an
/// automatically chosen seed length.
pub fn edit_distance(a: Seq, b: Seq) -> Cost {
    match SH::auto().build(a, b) {
        Ok(h) => astar(a, b, &h).distance,
        // One of the sequences is empty.
        Err(_) => max(a.len(), b.len()) as Cost,
    }
}
