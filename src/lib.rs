//! # Wordlist Prep
//!
//! Tools for preparing word lists, e.g. for a Scrabble word finder.
//!
//! ## Features
//!
//! - **Cleaning**: keep only the lines made of lowercase letters `a-z`
//! - **Separating**: split a list into one file per word length (1 to 15)
//! - **Anagram lookup**: index the length buckets by letters and list every
//!   word that can be spelled from a set of letters
//! - **Order preserving**: cleaning and separating keep the input order of the lines they emit
//! - **Byte oriented**: input is scanned as raw bytes, `\n`, `\r\n` and `\r` endings are accepted
//!
//! ## Usage
//!
//! ```bash
//! # Writes words.txt-cleaned
//! wordlist-clean words.txt
//!
//! # Writes words.txt-cleaned-seperated/list-1 .. list-15
//! wordlist-separate words.txt-cleaned
//!
//! # Writes mushes/list-1 .. list-15, then looks up letters
//! wordlist-mush build words.txt-cleaned-seperated mushes
//! wordlist-mush find --mushes mushes retains
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wordlist_prep::output::BucketSet;
//! use wordlist_prep::processor::{Cleaner, RunConfig, Separator};
//!
//! let mut cleaned: Vec<u8> = Vec::new();
//! Cleaner::new(RunConfig::default())
//!     .clean(&b"cat\nDog\n123\nbird\n"[..], &mut cleaned)
//!     .unwrap();
//! assert_eq!(cleaned, b"cat\nbird\n");
//!
//! let mut buckets = BucketSet::in_memory();
//! Separator::new(RunConfig::default())
//!     .separate(&cleaned[..], &mut buckets)
//!     .unwrap();
//! assert_eq!(buckets.get(4).unwrap(), b"bird\n");
//! ```

pub mod cli;
pub mod error;
pub mod filter;
pub mod finder;
pub mod line;
pub mod mush;
pub mod output;
pub mod processor;
pub mod progress;

pub use cli::{CleanArgs, MushArgs, SeparateArgs};
pub use error::{Error, Result};
pub use finder::{Mushifier, WordFinder};
pub use processor::{Cleaner, RunConfig, Separator};
