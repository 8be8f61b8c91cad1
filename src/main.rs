use anyhow::{Context, Result};
use astar_edit_distance::{cli::Cli, stats::AstarStats, AstarEdParams, Pos, Seq};
use clap::Parser;
use itertools::Itertools;
use std::ops::ControlFlow;

/// Count the matches and edits along a path through the edit graph.
fn path_summary(a: Seq, b: Seq, path: &[Pos]) -> (usize, usize) {
    let mut matches = 0;
    let mut edits = 0;
    for (&Pos(i, j), &Pos(ni, nj)) in path.iter().tuple_windows() {
        let diagonal = ni == i + 1 && nj == j + 1;
        if diagonal && a[i as usize] == b[j as usize] {
            matches += 1;
        } else {
            edits += 1;
        }
    }
    (matches, edits)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let params = AstarEdParams::new(args.heuristic);
    let aligner = params.aligner();
    log::info!("Aligning with {} ({})", aligner.name(), args.heuristic);

    let mut avg_result = AstarStats::default();
    let mut error = None;

    // Process the input.
    args.process_input_pairs(|a: Seq, b: Seq| {
        // Run the pair.
        let r = match aligner.align(a, b) {
            Ok(r) => r,
            Err(e) => {
                error = Some(e);
                return ControlFlow::Break(());
            }
        };

        if args.path {
            let (matches, edits) = path_summary(a, b, &r.path());
            println!("path: {matches} matches, {edits} edits");
        }

        // Record and print stats.
        if args.silent == 0 {
            r.stats.print();
        }
        avg_result += r.stats;
        if args.silent <= 1 {
            avg_result.print_no_newline();
        }
        ControlFlow::Continue(())
    })
    .context("Failed to read the input pairs")?;

    if let Some(e) = error {
        return Err(e).context("Failed to align a pair");
    }

    if avg_result.sample_size > 0 {
        avg_result.print();

        if let Some(output) = &args.output {
            let (header, vals) = avg_result.values();

            std::fs::write(
                output,
                format!(
                    "{}\n{}\n",
                    header.iter().map(|x| x.trim()).join("\t"),
                    vals.iter().map(|x| x.trim()).join("\t")
                ),
            )
            .with_context(|| format!("Failed to write statistics to {}", output.display()))?;
        }
    }
    Ok(())
}
