use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::*;
use crate::seeds::TrailingSeed;

/// The type of the heuristic. Defaults to SH.
#[derive(Debug, PartialEq, Eq, Default, Clone, Copy, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicType {
    /// A heuristic that returns 0. A* reduces to Dijkstra.
    Zero,
    /// Seed heuristic.
    #[default]
    SH,
}

/// Heuristic arguments.
#[derive(Parser, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[clap(next_help_heading = "Heuristic")]
#[serde(deny_unknown_fields)]
pub struct HeuristicArgs {
    #[clap(short = 'H', long, default_value_t, value_enum, display_order = 10)]
    #[serde(rename = "type")]
    pub heuristic: HeuristicType,

    /// Seed length
    ///
    /// Defaults to ceil(log_σ |a|), capped by the sequence lengths.
    #[clap(short, value_name = "k", display_order = 10)]
    #[serde(default)]
    pub k: Option<I>,

    /// What to do with the last |a| mod k characters of a.
    #[clap(long, default_value_t, value_enum, hide_short_help = true)]
    #[serde(default)]
    pub trailing: TrailingSeed,

    /// Assert local consistency bounds on every evaluation of the heuristic.
    ///
    /// Slow; only useful for debugging new heuristics.
    #[clap(long, hide_short_help = true)]
    #[serde(default)]
    pub check_consistency: bool,
}

impl Default for HeuristicArgs {
    fn default() -> Self {
        Self {
            heuristic: HeuristicType::SH,
            k: None,
            trailing: TrailingSeed::Drop,
            check_consistency: false,
        }
    }
}

/// A summary string used in logs and the stats table.
impl Display for HeuristicArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.heuristic {
            HeuristicType::Zero => write!(f, "Zero")?,
            HeuristicType::SH => {
                match self.k {
                    Some(k) => write!(f, "Seed Heuristic (k={k})")?,
                    None => write!(f, "Seed Heuristic (k=auto)")?,
                }
                if self.trailing == TrailingSeed::Keep {
                    write!(f, " + trailing seed")?;
                }
            }
        }
        if self.check_consistency {
            write!(f, " (checked)")?;
        }
        Ok(())
    }
}

pub trait HeuristicMapper {
    type R;
    fn call<H: Heuristic + 'static>(&self, h: H) -> Self::R;
}

impl HeuristicArgs {
    /// The seed heuristic configured by these arguments.
    pub fn sh(&self) -> SH {
        let length = match self.k {
            Some(k) => LengthConfig::Fixed(k),
            None => LengthConfig::Auto,
        };
        SH {
            length,
            trailing: self.trailing,
        }
    }

    /// Apply a generic function F to the instantiated heuristic.
    pub fn map<F: HeuristicMapper>(&self, f: F) -> F::R {
        match (self.heuristic, self.check_consistency) {
            (HeuristicType::Zero, false) => f.call(ZeroCost),
            (HeuristicType::Zero, true) => f.call(ZeroCost.checked()),
            (HeuristicType::SH, false) => f.call(self.sh()),
            (HeuristicType::SH, true) => f.call(self.sh().checked()),
        }
    }
}
