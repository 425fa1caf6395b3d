//! Error types shared by the tools

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot open input {path:?}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read input")]
    Read(#[source] io::Error),

    #[error("cannot create output directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create output file {path:?}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid size '{value}', expected e.g. 64KB, 8MB or 1GB")]
    InvalidSize { value: String },

    #[error("mush file {path:?} is corrupt at byte {offset}")]
    CorruptMushes { path: PathBuf, offset: u64 },

    #[error("invalid letters '{letters}', expected 1 to {max} of a-z")]
    InvalidLetters { letters: String, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
