use super::*;

// # ZERO HEURISTIC
// Turns A* into Dijkstra. Used as the baseline for all other heuristics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroCost;

impl Heuristic for ZeroCost {
    type Instance = ZeroCostI;

    fn build(&self, a: Seq, b: Seq) -> Result<Self::Instance> {
        Ok(ZeroCostI {
            target: Pos::target(a, b),
        })
    }

    fn name(&self) -> String {
        "Zero".into()
    }
}

pub struct ZeroCostI {
    target: Pos,
}

impl HeuristicInstance for ZeroCostI {
    fn h(&self, pos: Pos) -> Cost {
        assert!(
            Pos(0, 0) <= pos && pos <= self.target,
            "Position {pos} lies outside the edit graph with target {}",
            self.target
        );
        0
    }

    fn params_string(&self) -> String {
        "ZeroCost".into()
    }
}
