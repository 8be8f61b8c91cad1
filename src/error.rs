//! Errors reported by heuristic construction and input handling.
use std::path::PathBuf;
use thiserror::Error;

use crate::types::I;

#[derive(Debug, Error)]
pub enum Error {
    /// The seed length must be at least 1.
    #[error("seed length k={k} must be positive")]
    NonPositiveSeedLength { k: I },

    /// A seed can not be longer than either of the sequences.
    #[error("seed length k={k} exceeds the length of sequence {name} ({len})")]
    SeedLongerThanSequence { k: I, name: char, len: usize },

    /// An input file could not be interpreted as sequence pairs.
    #[error("invalid input {}: {reason}", path.display())]
    Input { path: PathBuf, reason: String },

    /// Neither an input file nor generation settings were given.
    #[error("no input: pass -i <file>, or -n <length> and -e <error rate> to generate pairs")]
    MissingInput,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
