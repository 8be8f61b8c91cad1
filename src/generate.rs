//! Random sequence pairs for testing and benchmarking.
use clap::{Parser, ValueEnum};
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

#[derive(ValueEnum, Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorModel {
    /// Substitutions, insertions and deletions at uniformly random positions.
    #[default]
    Uniform,
    /// Make a single gap (insertion or deletion) of size e*n.
    Gap,
    /// Delete a region of size e*n and insert it again elsewhere.
    Move,
}

#[derive(Parser, Clone, Debug)]
#[clap(next_help_heading = "Generated input")]
pub struct GenerateArgs {
    /// The number of sequence pairs to generate
    #[clap(short = 'x', long, default_value_t = 1, display_order = 2)]
    pub cnt: usize,

    /// Length of generated sequences
    ///
    /// When reading pairs from a file, longer sequences are cropped to this length.
    #[clap(short = 'n', long, display_order = 3, required_unless_present = "input")]
    pub length: Option<usize>,

    /// Input error rate
    #[clap(short, long, display_order = 4, required_unless_present = "input")]
    pub error_rate: Option<f32>,

    #[clap(
        long,
        value_enum,
        default_value_t,
        value_name = "MODEL",
        hide_short_help = true
    )]
    pub error_model: ErrorModel,

    /// Seed to initialize RNG for reproducability
    #[clap(long)]
    pub seed: Option<u64>,
}

impl GenerateArgs {
    /// `None` when the length or error rate is missing.
    pub fn to_generate_options(&self) -> Option<GenerateOptions> {
        Some(GenerateOptions {
            length: self.length?,
            error_rate: self.error_rate?,
            error_model: self.error_model,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateOptions {
    pub length: usize,
    pub error_rate: f32,
    pub error_model: ErrorModel,
}

const ALPH: [u8; 4] = *b"ACGT";

enum Mutation {
    // Replace char at pos.
    Substitution(usize, u8),
    // Insert char before pos.
    Insertion(usize, u8),
    // Delete char at pos.
    Deletion(usize),
}

fn rand_char(rng: &mut impl Rng) -> u8 {
    ALPH[rng.gen_range(0..4)]
}

pub fn random_sequence(n: usize, rng: &mut impl Rng) -> Sequence {
    (0..n).map(|_| rand_char(rng)).collect_vec()
}

fn random_mutation(len_b: usize, rng: &mut impl Rng) -> Mutation {
    // Substitution / insertion / deletion all with equal probability.
    // For length 0 sequences, only generate insertions.
    match if len_b == 0 {
        1
    } else {
        rng.gen_range(0..3usize)
    } {
        0 => Mutation::Substitution(rng.gen_range(0..len_b), rand_char(rng)),
        1 => Mutation::Insertion(rng.gen_range(0..len_b + 1), rand_char(rng)),
        _ => Mutation::Deletion(rng.gen_range(0..len_b)),
    }
}

/// A random sequence `a` of the given length, and a mutated copy `b`.
///
/// `ceil(e * n)` mutations are applied. Uniform mutations may overlap, so the
/// edit distance can be lower.
pub fn generate_pair(opt: &GenerateOptions, rng: &mut impl Rng) -> (Sequence, Sequence) {
    let a = random_sequence(opt.length, rng);
    let num_mutations = (opt.error_rate * opt.length as f32).ceil() as usize;
    let mut b = a.clone();
    match opt.error_model {
        ErrorModel::Uniform => {
            for _ in 0..num_mutations {
                match random_mutation(b.len(), rng) {
                    Mutation::Substitution(i, c) => b[i] = c,
                    Mutation::Insertion(i, c) => b.insert(i, c),
                    Mutation::Deletion(i) => {
                        b.remove(i);
                    }
                }
            }
        }
        ErrorModel::Gap => {
            let num_mutations = min(num_mutations, b.len());
            if rng.gen_bool(0.5) {
                // deletion
                let start = rng.gen_range(0..=b.len() - num_mutations);
                b.drain(start..start + num_mutations);
            } else {
                // insertion
                let start = rng.gen_range(0..=b.len());
                let text = random_sequence(num_mutations, rng);
                b.splice(start..start, text);
            }
        }
        ErrorModel::Move => {
            let num_mutations = min(num_mutations, b.len());
            // deletion
            let start = rng.gen_range(0..=b.len() - num_mutations);
            let piece = b.drain(start..start + num_mutations).collect_vec();
            // insertion
            let start = rng.gen_range(0..=b.len());
            b.splice(start..start, piece);
        }
    }
    (a, b)
}

/// A reproducible uniform pair, for quick testing.
pub fn setup_sequences_with_seed(seed: u64, n: usize, e: f32) -> (Sequence, Sequence) {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    generate_pair(
        &GenerateOptions {
            length: n,
            error_rate: e,
            error_model: ErrorModel::Uniform,
        },
        &mut rng,
    )
}

pub fn setup_sequences(n: usize, e: f32) -> (Sequence, Sequence) {
    setup_sequences_with_seed(31415, n, e)
}
