use super::*;

/// Wraps a heuristic and asserts on every evaluation that
/// - `h(pos) >= 0`,
/// - `h(pos) <= 1 + h(next)` for each successor `next` of `pos`,
/// - `h(target) == 0`.
///
/// Every edge costs at most 1, so these are necessary conditions for an
/// admissible heuristic that never drops faster than the cost it saves.
/// This evaluates the wrapped heuristic up to 4 times per query and is only
/// meant for testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckConsistency<H: Heuristic> {
    pub h: H,
}

impl<H: Heuristic> Heuristic for CheckConsistency<H> {
    type Instance = CheckConsistencyI<H::Instance>;

    fn build(&self, a: Seq, b: Seq) -> Result<Self::Instance> {
        Ok(CheckConsistencyI {
            h: self.h.build(a, b)?,
            target: Pos::target(a, b),
        })
    }

    fn name(&self) -> String {
        self.h.name() + "+check"
    }
}

pub struct CheckConsistencyI<HI: HeuristicInstance> {
    h: HI,
    target: Pos,
}

impl<HI: HeuristicInstance> HeuristicInstance for CheckConsistencyI<HI> {
    fn h(&self, pos: Pos) -> Cost {
        let h = self.h.h(pos);
        assert!(
            h >= 0,
            "Negative value h({pos}) = {h} for {}",
            self.h.params_string()
        );
        if pos == self.target {
            assert!(
                h == 0,
                "Nonzero value h({pos}) = {h} at the target for {}",
                self.h.params_string()
            );
        }
        for dp in [Pos(1, 1), Pos(1, 0), Pos(0, 1)] {
            let next = pos + dp;
            if !(next <= self.target) {
                continue;
            }
            let next_h = self.h.h(next);
            assert!(
                h <= 1 + next_h,
                "Inconsistent: h({pos}) = {h} but h({next}) = {next_h} for {}",
                self.h.params_string()
            );
        }
        h
    }

    fn stats(&self) -> HeuristicStats {
        self.h.stats()
    }

    fn seeds(&self) -> Option<&Seeds> {
        self.h.seeds()
    }

    fn params_string(&self) -> String {
        format!("CheckConsistency({})", self.h.params_string())
    }
}
