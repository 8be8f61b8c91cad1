//! Command line arguments of the `astar-ed` binary, and reading of input pairs.
use bio::io::fasta;
use clap::{value_parser, Parser};
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    ops::ControlFlow,
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    generate::{generate_pair, GenerateArgs},
    heuristic::HeuristicArgs,
    prelude::*,
};

#[derive(Parser, Debug)]
#[clap(author, about)]
pub struct Cli {
    /// The .seq, .txt, or Fasta file with sequence pairs to align, or a directory of them.
    #[clap(short, long, value_parser = value_parser!(PathBuf), display_order = 1)]
    pub input: Option<PathBuf>,

    /// Options to generate input pairs when no input file is given.
    #[clap(flatten)]
    pub generate: GenerateArgs,

    /// Write the generated pairs to this Fasta file, to rerun them later with `-i`.
    #[arg(
        long,
        value_name = "file.fa",
        value_parser = value_parser!(PathBuf),
        conflicts_with = "input"
    )]
    pub save_pairs: Option<PathBuf>,

    /// Where to write a tab separated summary of the statistics.
    #[arg(short, long, value_parser = value_parser!(PathBuf))]
    pub output: Option<PathBuf>,

    /// Parameters and settings for the heuristic.
    #[clap(flatten)]
    pub heuristic: HeuristicArgs,

    /// Print less. Pass twice for summary line only.
    ///
    /// Do not print a new line per alignment, but instead overwrite the previous one.
    /// Pass twice to only print a summary line and avoid all terminal clutter, e.g. for benchmarking.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub silent: u8,

    /// Log more. Pass up to three times for info, debug and trace output.
    ///
    /// Overridden by RUST_LOG when it is set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Reconstruct the path and print its number of matches and edits.
    #[arg(long)]
    pub path: bool,
}

impl Cli {
    /// Call the given function for each pair in the input, or for each generated pair.
    pub fn process_input_pairs(
        &self,
        mut run_pair: impl FnMut(Seq, Seq) -> ControlFlow<()>,
    ) -> Result<()> {
        let mut run_cropped_pair = |mut a: Seq, mut b: Seq| -> ControlFlow<()> {
            // Shrink if needed.
            if let Some(n) = self.generate.length {
                a = &a[..min(a.len(), n)];
                b = &b[..min(b.len(), n)];
            }
            run_pair(a, b)
        };

        if let Some(input) = &self.input {
            let files = if input.is_file() {
                vec![input.clone()]
            } else {
                let mut files = input
                    .read_dir()?
                    .map(|entry| entry.map(|e| e.path()))
                    .collect::<std::io::Result<Vec<_>>>()?;
                files.sort();
                files
            };

            for f in files {
                for (a, b) in read_pairs(&f)? {
                    if run_cropped_pair(&a, &b).is_break() {
                        return Ok(());
                    }
                }
            }
        } else {
            let opt = self
                .generate
                .to_generate_options()
                .ok_or(Error::MissingInput)?;
            let seed = self.generate.seed.unwrap_or_else(|| {
                let seed = ChaCha8Rng::from_entropy().gen_range(0..u64::MAX);
                log::info!("Seed: {seed}");
                seed
            });
            let ref mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut generated = vec![];
            for _ in 0..self.generate.cnt {
                let (a, b) = generate_pair(&opt, rng);
                let done = run_pair(&a, &b).is_break();
                if self.save_pairs.is_some() {
                    generated.push((a, b));
                }
                if done {
                    break;
                }
            }
            if let Some(path) = &self.save_pairs {
                write_pairs(path, &generated)?;
            }
        }
        Ok(())
    }
}

/// Read all sequence pairs from a single file.
///
/// - `.seq`: pairs of lines, the first starting with `>` and the second with `<`.
/// - `.txt`: pairs of lines.
/// - `.fa`, `.fna`, `.fasta`: pairs of consecutive records.
pub fn read_pairs(path: &Path) -> Result<Vec<(Sequence, Sequence)>> {
    let invalid = |reason: String| Error::Input {
        path: path.to_owned(),
        reason,
    };
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let seqs: Vec<Sequence> = match ext {
        "seq" | "txt" => {
            let mut seqs = vec![];
            // Split on bytes, so that any symbol is allowed, as in Fasta input.
            for (idx, line) in BufReader::new(File::open(path)?).split(b'\n').enumerate() {
                let mut line = line?;
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                if ext == "seq" {
                    let marker = if idx % 2 == 0 { b'>' } else { b'<' };
                    if line.first() != Some(&marker) {
                        return Err(invalid(format!(
                            "line {} must start with '{}'",
                            idx + 1,
                            marker as char
                        )));
                    }
                    line.remove(0);
                }
                seqs.push(line);
            }
            seqs
        }
        "fa" | "fna" | "fasta" => fasta::Reader::new(BufReader::new(File::open(path)?))
            .records()
            .map_ok(|record| record.seq().to_vec())
            .collect::<std::io::Result<_>>()?,
        ext => {
            return Err(invalid(format!(
                "unknown file extension {ext:?}. Must be in {{seq,txt,fna,fa,fasta}}."
            )))
        }
    };
    if seqs.len() % 2 != 0 {
        return Err(invalid(format!(
            "odd number of sequences ({}); sequences must come in pairs",
            seqs.len()
        )));
    }
    log::debug!("Read {} pairs from {}", seqs.len() / 2, path.display());
    Ok(seqs.into_iter().tuples().collect_vec())
}

/// Write pairs as consecutive Fasta records `a0, b0, a1, b1, ...`, the layout
/// `read_pairs` expects.
pub fn write_pairs(path: &Path, pairs: &[(Sequence, Sequence)]) -> Result<()> {
    let mut writer = fasta::Writer::new(File::create(path)?);
    for (idx, (a, b)) in pairs.iter().enumerate() {
        writer.write(&format!("a{idx}"), None, a)?;
        writer.write(&format!("b{idx}"), None, b)?;
    }
    writer.flush()?;
    log::info!("Wrote {} pairs to {}", pairs.len(), path.display());
    Ok(())
}
