//! Command-line interface definitions for wordlist-clean, wordlist-separate
//! and wordlist-mush
//!
//! The clean and separate tools take exactly one input file. A wrong number of
//! inputs is not a clap error: the tool prints its one-line usage message and
//! does nothing.

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::{Error, Result};

/// Usage message of wordlist-clean
pub const CLEAN_USAGE: &str = "Please include a single parameter with the name of the file to clean";

/// Usage message of wordlist-separate
pub const SEPARATE_USAGE: &str = "Please include a single parameter with the name of the file to split";

/// Wrong number of input files
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{message}")]
pub struct UsageError {
    message: &'static str,
}

/// Flags shared by all tools
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Dry run - show what would be done without writing files
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Write buffer size per output file (default: 1MB)
    #[arg(long, value_name = "SIZE", default_value = "1MB")]
    pub buffer_size: String,
}

/// Strip every line that is not a lowercase word
///
/// Keeps the lines made only of the letters a-z and writes them, in order,
/// to <FILE>-cleaned.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordlist-clean",
    version,
    about = "Strip every line that is not a lowercase word",
    after_help = "EXAMPLE:\n    wordlist-clean words.txt        # writes words.txt-cleaned"
)]
pub struct CleanArgs {
    /// Word list to clean
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Split a word list into one file per word length
///
/// Lines of length 1 to 15 go to <FILE>-seperated/list-<LENGTH>, in input
/// order. Empty and longer lines are dropped.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordlist-separate",
    version,
    about = "Split a word list into one file per word length",
    after_help = "EXAMPLE:\n    wordlist-separate words.txt     # writes words.txt-seperated/list-1 .. list-15"
)]
pub struct SeparateArgs {
    /// Word list to split
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Index separated word lists by their letters and look words up
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordlist-mush",
    version,
    about = "Index separated word lists by their letters and look words up",
    after_help = "EXAMPLE:\n    wordlist-mush build words.txt-seperated mushes\n    wordlist-mush find --mushes mushes retains"
)]
pub struct MushArgs {
    #[command(subcommand)]
    pub command: MushCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum MushCommand {
    /// Write a sorted mush file for each bucket of a separated directory
    Build(BuildArgs),

    /// List the words that can be spelled from a set of letters
    Find(FindArgs),
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Directory written by wordlist-separate
    #[arg(value_name = "SEPARATED_DIR")]
    pub source: PathBuf,

    /// Directory to write the mush files to
    #[arg(value_name = "MUSH_DIR")]
    pub dest: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct FindArgs {
    /// Letters to spell words from (1 to 15 of a-z)
    #[arg(value_name = "LETTERS")]
    pub letters: String,

    /// Directory written by `wordlist-mush build`
    #[arg(short, long, value_name = "MUSH_DIR")]
    pub mushes: PathBuf,

    /// Only list words that use every letter
    #[arg(long, default_value_t = false)]
    pub exact: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl MushArgs {
    pub fn common(&self) -> &CommonArgs {
        match &self.command {
            MushCommand::Build(args) => &args.common,
            MushCommand::Find(args) => &args.common,
        }
    }
}

impl CleanArgs {
    /// The single input file, or the usage error
    pub fn input(&self) -> std::result::Result<&Path, UsageError> {
        single_input(&self.inputs, CLEAN_USAGE)
    }
}

impl SeparateArgs {
    /// The single input file, or the usage error
    pub fn input(&self) -> std::result::Result<&Path, UsageError> {
        single_input(&self.inputs, SEPARATE_USAGE)
    }
}

fn single_input<'a>(
    inputs: &'a [PathBuf],
    usage: &'static str,
) -> std::result::Result<&'a Path, UsageError> {
    match inputs {
        [input] => Ok(input),
        _ => Err(UsageError { message: usage }),
    }
}

impl CommonArgs {
    /// Parse buffer size string to bytes
    pub fn parse_buffer_size(&self) -> Result<usize> {
        parse_size(&self.buffer_size)
    }

    /// Default log level, before `RUST_LOG` is applied
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Error
        } else {
            LevelFilter::Info
        }
    }

    /// Set up logging; `RUST_LOG` takes precedence over the flags
    pub fn init_logging(&self) {
        let default_filter = self.log_level().to_string().to_lowercase();
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
            .format_timestamp(None)
            .init();
    }
}

/// Parse human-readable size string to bytes
pub fn parse_size(size_str: &str) -> Result<usize> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if let Some(num) = size_str.strip_suffix("GB") {
        (num, 1024 * 1024 * 1024)
    } else if let Some(num) = size_str.strip_suffix("MB") {
        (num, 1024 * 1024)
    } else if let Some(num) = size_str.strip_suffix("KB") {
        (num, 1024)
    } else if let Some(num) = size_str.strip_suffix('B') {
        (num, 1)
    } else {
        (size_str.as_str(), 1)
    };

    let invalid = || Error::InvalidSize {
        value: size_str.clone(),
    };

    let num: usize = num_str.trim().parse().map_err(|_| invalid())?;
    match num.checked_mul(multiplier) {
        Some(0) | None => Err(invalid()),
        Some(bytes) => Ok(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_args(argv: &[&str]) -> CleanArgs {
        CleanArgs::try_parse_from(std::iter::once("wordlist-clean").chain(argv.iter().copied()))
            .unwrap()
    }

    fn separate_args(argv: &[&str]) -> SeparateArgs {
        SeparateArgs::try_parse_from(std::iter::once("wordlist-separate").chain(argv.iter().copied()))
            .unwrap()
    }

    fn mush_args(argv: &[&str]) -> MushArgs {
        MushArgs::try_parse_from(std::iter::once("wordlist-mush").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_single_input() {
        let args = clean_args(&["words.txt"]);
        assert_eq!(args.input().unwrap(), Path::new("words.txt"));
    }

    #[test]
    fn test_no_input_is_usage_error() {
        let err = clean_args(&[]).input().unwrap_err();
        assert_eq!(err.to_string(), CLEAN_USAGE);

        let err = separate_args(&[]).input().unwrap_err();
        assert_eq!(err.to_string(), SEPARATE_USAGE);
    }

    #[test]
    fn test_two_inputs_is_usage_error() {
        let err = separate_args(&["a.txt", "b.txt"]).input().unwrap_err();
        assert_eq!(err.to_string(), SEPARATE_USAGE);
    }

    #[test]
    fn test_common_flags() {
        let args = separate_args(&["-q", "--dry-run", "--buffer-size", "64KB", "words.txt"]);

        assert!(args.common.quiet);
        assert!(args.common.dry_run);
        assert!(!args.common.verbose);
        assert_eq!(args.common.parse_buffer_size().unwrap(), 64 * 1024);
        assert_eq!(args.common.log_level(), LevelFilter::Error);
    }

    #[test]
    fn test_default_flags() {
        let args = clean_args(&["words.txt"]);

        assert_eq!(args.common.parse_buffer_size().unwrap(), 1024 * 1024);
        assert_eq!(args.common.log_level(), LevelFilter::Info);
    }

    #[test]
    fn test_mush_build_args() {
        let args = mush_args(&["build", "words-seperated", "mushes", "-v"]);

        assert!(args.common().verbose);
        match args.command {
            MushCommand::Build(build) => {
                assert_eq!(build.source, PathBuf::from("words-seperated"));
                assert_eq!(build.dest, PathBuf::from("mushes"));
            }
            other => panic!("expected build, got {:?}", other),
        }
    }

    #[test]
    fn test_mush_find_args() {
        let args = mush_args(&["find", "-m", "mushes", "--exact", "-q", "retains"]);

        assert!(args.common().quiet);
        match args.command {
            MushCommand::Find(find) => {
                assert_eq!(find.letters, "retains");
                assert_eq!(find.mushes, PathBuf::from("mushes"));
                assert!(find.exact);
            }
            other => panic!("expected find, got {:?}", other),
        }
    }

    #[test]
    fn test_mush_find_requires_dir() {
        let result = MushArgs::try_parse_from(["wordlist-mush", "find", "retains"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("64MB").unwrap(), 64 * 1024 * 1024);
        assert_eq!(parse_size("1GB").unwrap(), 1024 * 1024 * 1024);
        assert_eq!(parse_size("1024KB").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("512b").unwrap(), 512);
        assert_eq!(parse_size("4096").unwrap(), 4096);
    }

    #[test]
    fn test_parse_size_invalid() {
        assert!(matches!(parse_size("lots"), Err(Error::InvalidSize { .. })));
        assert!(matches!(parse_size("0MB"), Err(Error::InvalidSize { .. })));
    }
}
