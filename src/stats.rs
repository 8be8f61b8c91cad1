use std::{
    fmt::Display,
    io::{stdout, Write},
    sync::atomic::{AtomicBool, Ordering},
};

use derive_more::AddAssign;

use crate::heuristic::HeuristicStats;
use crate::prelude::*;

#[derive(Default, Clone, Copy, AddAssign, Debug)]
pub struct Timing {
    /// precomp + astar
    pub total: f64,
    /// building the heuristic
    pub precomp: f64,
    /// running A*
    pub astar: f64,
}

/// Counters for one search, or the sum over several searches.
///
/// Summing with `+=` also sums `sample_size`, and all printed values are
/// averaged over it.
#[derive(Default, Clone, AddAssign, Debug)]
pub struct AstarStats {
    pub len_a: usize,
    pub len_b: usize,
    /// The computed distance.
    pub distance: Cost,
    /// states popped from the queue and expanded
    pub expanded: usize,
    /// states pushed to the queue
    pub explored: usize,
    /// expanded states whose `g` improved afterwards
    pub reopened: usize,

    pub h: HeuristicStats,

    pub timing: Timing,
    pub sample_size: usize,
}

static PRINTED_HEADER: AtomicBool = AtomicBool::new(false);

impl AstarStats {
    pub fn init(a: Seq, b: Seq) -> Self {
        Self {
            len_a: a.len(),
            len_b: b.len(),
            sample_size: 1,
            ..Default::default()
        }
    }

    /// Print a row of the table. The header is printed before the first row.
    pub fn print(&self) {
        self.print_internal(true);
    }

    /// Like `print`, but without a newline, so the next row can overwrite it.
    pub fn print_no_newline(&self) {
        self.print_internal(false);
    }

    fn format_raw<T: Display>(
        &self,
        align: char,
        width: usize,
        title: &str,
        val: T,
    ) -> (String, String) {
        if align == '<' {
            (format!("{:<width$}", title), format!("{:<width$}", val))
        } else {
            (format!("{:>width$}", title), format!("{:>width$}", val))
        }
    }

    fn format_flt<T: Display>(
        &self,
        align: char,
        mut width: usize,
        title: &str,
        val: T,
    ) -> (String, String) {
        let val = val.to_string();
        // make sure to not discard things before the decimal point.
        let point = val.find('.').unwrap_or(val.len());
        width = width.max(point);
        let val = if val.len() > width {
            &val[0..width]
        } else {
            val.as_str()
        };
        self.format_raw(align, width, title, val)
    }

    fn format_avg<T: Display + num_traits::AsPrimitive<f32>>(
        &self,
        align: char,
        width: usize,
        title: &str,
        val: T,
    ) -> (String, String) {
        self.format_flt(align, width, title, val.as_() / self.sample_size as f32)
    }

    /// The table header and the values of this row, as separate columns.
    pub fn values(&self) -> (Vec<String>, Vec<String>) {
        [
            self.format_raw('>', 7, "nr", self.sample_size),
            self.format_avg('>', 10, "|a|", self.len_a),
            self.format_avg('>', 10, "|b|", self.len_b),
            self.format_avg('>', 3, "k", self.h.k),
            self.format_avg('>', 7, "seeds", self.h.num_seeds),
            self.format_avg('>', 7, "unmatch", self.h.num_unmatched),
            self.format_flt(
                '>',
                7,
                "match/s",
                self.h.num_matches as f32 / max(self.h.num_seeds, 1) as f32,
            ),
            self.format_avg('>', 9, "expanded", self.expanded),
            self.format_avg('>', 9, "explored", self.explored),
            self.format_avg('>', 8, "reopened", self.reopened),
            self.format_flt(
                '>',
                8,
                "band",
                self.expanded as f32 / max(self.len_a, 1) as f32,
            ),
            self.format_avg('>', 8, "t", 1000. * self.timing.total),
            self.format_avg('>', 5, "pre", 1000. * self.timing.precomp),
            self.format_avg('>', 5, "A*", 1000. * self.timing.astar),
            self.format_avg('>', 7, "ed", self.distance),
            self.format_flt(
                '>',
                4,
                "e%",
                100.0 * self.distance as f32 / max(self.len_a, 1) as f32,
            ),
            self.format_avg('>', 6, "h0", self.h.h0),
        ]
        .into_iter()
        .unzip()
    }

    fn print_internal(&self, newline: bool) {
        let (header, values) = self.values();
        if !PRINTED_HEADER.swap(true, Ordering::Relaxed) {
            println!("{}", header.join(" "));
        }
        print!("{}", values.join(" "));
        if newline {
            println!();
        } else {
            print!("\r");
            let _ = stdout().flush();
        }
    }
}
