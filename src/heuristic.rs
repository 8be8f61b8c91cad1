//! Heuristics that lower bound the remaining cost to the end of the edit graph.
//!
//! A heuristic is split into two parts:
//! - a [`Heuristic`] holding the settings, which is cheap to copy around;
//! - a [`HeuristicInstance`], built from the settings for one specific pair
//!   of sequences and answering `h(pos)` queries.
//!
//! All heuristics must be *admissible*: `h(pos)` may never exceed the true
//! remaining cost from `pos` to the target. A* trusts this blindly. An
//! overestimating heuristic does not crash the search; it silently returns a
//! non-optimal distance. Wrap a heuristic in [`CheckConsistency`] (via
//! [`Heuristic::checked`]) to assert local bounds while testing.
mod cli;
pub mod sh;
pub mod wrappers;
pub mod zero;

use derive_more::AddAssign;

use crate::error::Result;
use crate::prelude::*;
use crate::seeds::Seeds;

pub use cli::*;
pub use sh::*;
pub use wrappers::*;
pub use zero::*;

#[derive(Clone, AddAssign, Default, Copy, Debug)]
pub struct HeuristicStats {
    /// The seed length used.
    pub k: I,
    pub num_seeds: I,
    /// Seeds without an exact occurrence in `b`.
    pub num_unmatched: I,
    /// Total number of exact occurrences of seeds in `b`.
    pub num_matches: usize,
    /// The value of the heuristic at the start.
    pub h0: Cost,
}

/// An object containing the settings for a heuristic.
pub trait Heuristic: std::fmt::Debug + Copy {
    type Instance: HeuristicInstance;

    /// Build the heuristic for the given sequences.
    ///
    /// Invalid settings for this pair (e.g. a seed longer than one of the
    /// sequences) are reported here, before any search starts.
    fn build(&self, a: Seq, b: Seq) -> Result<Self::Instance>;

    fn name(&self) -> String;

    /// Assert local consistency bounds on every evaluation.
    fn checked(self) -> CheckConsistency<Self> {
        CheckConsistency { h: self }
    }
}

/// An instantiation of a heuristic for a specific pair of sequences.
///
/// Instances are immutable once built and can be shared by reference between
/// concurrent searches.
pub trait HeuristicInstance {
    /// A lower bound on the cost from `pos` to the target.
    fn h(&self, pos: Pos) -> Cost;

    fn stats(&self) -> HeuristicStats {
        Default::default()
    }

    fn seeds(&self) -> Option<&Seeds> {
        None
    }

    /// A descriptive string of the heuristic settings, used for failing assertions.
    fn params_string(&self) -> String {
        "".into()
    }
}
