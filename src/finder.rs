//! Anagram lookup over separated word lists
//!
//! [`Mushifier`] turns every `list-N` bucket of a separated directory into a
//! mush file of the same name. [`WordFinder`] uses those files to list the
//! words that can be spelled from a handful of letters.

use bstr::ByteSlice;
use bytesize::ByteSize;
use indicatif::ProgressBar;
use std::collections::btree_map::{BTreeMap, Entry};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::filter::{MAX_WORD_LEN, MIN_WORD_LEN};
use crate::line::scan_lines;
use crate::mush::{letter_combinations, Mush, MushIndex};
use crate::output::{bucket_file_name, ensure_output_dir, LineSink, OutputWriter};
use crate::processor::{open_input, print_dry_run, RunConfig, READ_BUFFER_SIZE};
use crate::progress::{
    create_bytes_progress_bar, print_bucket_listing, print_bullet, print_header, print_info,
    print_mush_summary, print_success,
};

/// Outcome of a mush build
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MushReport {
    pub files: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub words: u64,
    /// Lines that are not words of a-z, or are too long to mush
    pub skipped: u64,
}

/// Builds one sorted mush file per bucket
pub struct Mushifier {
    config: RunConfig,
}

impl Mushifier {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Mush every word of one bucket, skipping the lines that are not words
    pub fn mush<R: BufRead>(&self, reader: R, report: &mut MushReport) -> Result<MushIndex> {
        self.mush_with_progress(reader, report, &ProgressBar::hidden())
    }

    fn mush_with_progress<R: BufRead>(
        &self,
        reader: R,
        report: &mut MushReport,
        pb: &ProgressBar,
    ) -> Result<MushIndex> {
        let mut mushes = Vec::new();

        report.bytes_read += scan_lines(reader, |line| {
            pb.inc(line.raw_len() as u64);

            match Mush::from_word(line.content()) {
                Some(mush) => {
                    mushes.push(mush);
                    report.words += 1;
                }
                None => {
                    log::debug!("Skipping {:?}", line.content().as_bstr());
                    report.skipped += 1;
                }
            }
            Ok(())
        })?;

        Ok(MushIndex::new(mushes))
    }

    /// Mush `source/list-1` .. `list-15` into the same names under `dest`
    pub fn process(&self, source: &Path, dest: &Path) -> Result<MushReport> {
        // Every bucket is opened before anything is written
        let inputs = (MIN_WORD_LEN..=MAX_WORD_LEN)
            .map(|length| -> Result<(usize, File, u64)> {
                let (file, size) = open_input(&source.join(bucket_file_name(length)))?;
                Ok((length, file, size))
            })
            .collect::<Result<Vec<_>>>()?;
        let total_size: u64 = inputs.iter().map(|(_, _, size)| size).sum();
        log::debug!("Mushing {:?} ({} bytes) into {:?}", source, total_size, dest);

        if self.config.dry_run {
            if !self.config.quiet {
                let outputs: Vec<_> = inputs
                    .iter()
                    .map(|(length, _, _)| dest.join(bucket_file_name(*length)))
                    .collect();
                print_dry_run(source, total_size, &outputs);
            }
            return Ok(MushReport::default());
        }

        if !self.config.quiet {
            print_header("Building mush files...");
            print_info(&format!("Input:  {:?} ({})", source, ByteSize(total_size)));
            print_info(&format!("Output: {:?}", dest));
        }

        ensure_output_dir(dest)?;
        let pb = create_bytes_progress_bar(total_size, "Mushing...", self.config.quiet);
        let started = Instant::now();

        let mut report = MushReport::default();
        let mut listing = Vec::with_capacity(inputs.len());

        for (length, file, _) in inputs {
            let index = self.mush_with_progress(
                BufReader::with_capacity(READ_BUFFER_SIZE, file),
                &mut report,
                &pb,
            )?;
            if index.is_empty() {
                log::debug!("Bucket {} holds no words", length);
            }

            let mut output =
                OutputWriter::create(dest.join(bucket_file_name(length)), self.config.buffer_size)?;
            index.write_to(&mut output)?;
            output.flush()?;

            report.files += 1;
            report.bytes_written += output.bytes_written();
            listing.push((length, output.path().to_path_buf(), index.len() as u64, output.bytes_written()));
        }
        pb.finish_and_clear();

        if report.skipped > 0 {
            log::warn!("Skipped {} lines that are not words", report.skipped);
        }

        if !self.config.quiet {
            print_success("Mush files created:");
            print_bucket_listing(
                listing
                    .iter()
                    .map(|(length, path, words, bytes)| (*length, path.as_path(), *words, *bytes)),
            );
            print_mush_summary(&report, started.elapsed());
        }

        Ok(report)
    }
}

/// Words found for a set of letters
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FindReport {
    /// Shortest first, then alphabetical
    pub words: Vec<String>,
    /// Whether the letters, in the order given, are a word themselves
    pub is_word: bool,
}

/// Looks words up in a directory of mush files, loading each bucket the
/// first time it is needed
pub struct WordFinder {
    config: RunConfig,
    dir: PathBuf,
    indexes: BTreeMap<usize, MushIndex>,
}

impl WordFinder {
    pub fn new(config: RunConfig, dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            dir: dir.into(),
            indexes: BTreeMap::new(),
        }
    }

    /// Use `index` for words of `length` instead of reading it from disk
    pub fn insert(&mut self, length: usize, index: MushIndex) {
        self.indexes.insert(length, index);
    }

    fn index(&mut self, length: usize) -> Result<&MushIndex> {
        match self.indexes.entry(length) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let index = MushIndex::load(&self.dir.join(bucket_file_name(length)))?;
                Ok(entry.insert(index))
            }
        }
    }

    /// Words spelled by `letters`: every selection of them when `exact` is
    /// off, only ones using all of them when it is on
    pub fn find_words(&mut self, letters: &[u8], exact: bool) -> Result<Vec<String>> {
        let target = target_mush(letters)?;

        let combinations = if exact {
            vec![target.word()]
        } else {
            letter_combinations(letters).into_iter().collect()
        };

        let mut words = Vec::new();
        for combination in combinations {
            let Some(mush) = Mush::from_word(&combination) else {
                continue;
            };
            let index = self.index(mush.word_len())?;
            words.extend(
                index
                    .find_anagrams(&mush)
                    .map(|m| String::from_utf8_lossy(&m.word()).into_owned()),
            );
        }

        words.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        Ok(words)
    }

    /// Whether `letters` is a word of the list
    pub fn is_word(&mut self, letters: &[u8]) -> Result<bool> {
        let target = target_mush(letters)?;
        let index = self.index(target.word_len())?;
        let found = index.find_anagrams(&target).any(|m| m.word() == letters);
        Ok(found)
    }

    /// Look up `letters` and print the words found
    pub fn process(&mut self, letters: &str, exact: bool) -> Result<FindReport> {
        target_mush(letters.as_bytes())?;
        log::debug!("Looking up {:?} in {:?}", letters, self.dir);

        if self.config.dry_run {
            if !self.config.quiet {
                let outputs: Vec<_> = (MIN_WORD_LEN..=letters.len())
                    .map(|length| self.dir.join(bucket_file_name(length)))
                    .collect();
                print_header("DRY RUN - Mush files that would be read");
                for path in outputs {
                    print_bullet(&format!("{:?}", path));
                }
            }
            return Ok(FindReport::default());
        }

        let started = Instant::now();
        let report = FindReport {
            words: self.find_words(letters.as_bytes(), exact)?,
            is_word: self.is_word(letters.as_bytes())?,
        };
        log::debug!("Found {} words in {:?}", report.words.len(), started.elapsed());

        if self.config.quiet {
            for word in &report.words {
                println!("{}", word);
            }
        } else {
            print_header("Found the following matches:");
            for word in &report.words {
                print_bullet(word);
            }
            print_info(&format!("{} words", report.words.len()));
            if report.is_word {
                print_success(&format!("'{}' is itself a word", letters));
            }
        }

        Ok(report)
    }
}

/// Mush of the letters being looked up, checked against the bucket range
fn target_mush(letters: &[u8]) -> Result<Mush> {
    let invalid = || Error::InvalidLetters {
        letters: letters.to_str_lossy().into_owned(),
        max: MAX_WORD_LEN,
    };

    if letters.len() > MAX_WORD_LEN {
        return Err(invalid());
    }
    Mush::from_word(letters).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn index(words: &str) -> MushIndex {
        let mut report = MushReport::default();
        Mushifier::new(RunConfig::default())
            .mush(Cursor::new(words.as_bytes()), &mut report)
            .unwrap()
    }

    fn finder(buckets: &[(usize, &str)]) -> WordFinder {
        let mut finder = WordFinder::new(RunConfig::default(), "unused");
        for length in MIN_WORD_LEN..=MAX_WORD_LEN {
            finder.insert(length, index(""));
        }
        for (length, words) in buckets {
            finder.insert(*length, index(words));
        }
        finder
    }

    fn write_buckets(dir: &Path, buckets: &[(usize, &str)]) {
        fs::create_dir_all(dir).unwrap();
        for length in MIN_WORD_LEN..=MAX_WORD_LEN {
            let words = buckets
                .iter()
                .find(|(l, _)| *l == length)
                .map_or("", |(_, w)| *w);
            fs::write(dir.join(bucket_file_name(length)), words).unwrap();
        }
    }

    #[test]
    fn test_mush_skips_non_words() {
        let mut report = MushReport::default();
        let index = Mushifier::new(RunConfig::default())
            .mush(Cursor::new(&b"cat\nDog\n\nact\nabcdefghijklmnopq\n"[..]), &mut report)
            .unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(report.words, 2);
        assert_eq!(report.skipped, 3);
        assert_eq!(report.bytes_read, 31);
    }

    #[test]
    fn test_find_words_with_sub_words() {
        let mut finder = finder(&[(1, "a\n"), (2, "at\nta\n"), (3, "cat\nact\ntac\ndog\n")]);

        let words = finder.find_words(b"tac", false).unwrap();
        assert_eq!(words, vec!["a", "at", "ta", "act", "cat", "tac"]);
    }

    #[test]
    fn test_find_words_exact() {
        let mut finder = finder(&[(2, "at\n"), (3, "cat\nact\ndog\n")]);

        let words = finder.find_words(b"tca", true).unwrap();
        assert_eq!(words, vec!["act", "cat"]);
    }

    #[test]
    fn test_find_words_respects_letter_counts() {
        let mut finder = finder(&[(3, "too\ntot\n"), (4, "toot\n")]);

        assert_eq!(finder.find_words(b"oot", false).unwrap(), vec!["too"]);
        assert_eq!(finder.find_words(b"toot", false).unwrap(), vec!["too", "tot", "toot"]);
    }

    #[test]
    fn test_is_word() {
        let mut finder = finder(&[(3, "cat\nact\n")]);

        assert!(finder.is_word(b"cat").unwrap());
        assert!(!finder.is_word(b"tac").unwrap());
    }

    #[test]
    fn test_invalid_letters() {
        let mut finder = finder(&[]);

        for letters in ["", "Cat", "c4t", "abcdefghijklmnop"] {
            let result = finder.find_words(letters.as_bytes(), false);
            assert!(matches!(result, Err(Error::InvalidLetters { .. })), "{:?}", letters);
        }
    }

    #[test]
    fn test_build_then_find() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("words.txt-seperated");
        let dest = temp_dir.path().join("mushes");
        write_buckets(&source, &[(3, "tea\neat\nate\n"), (4, "teas\nseat\neats\n")]);

        let report = Mushifier::new(RunConfig::default())
            .process(&source, &dest)
            .unwrap();
        assert_eq!(report.files, 15);
        assert_eq!(report.words, 6);
        assert_eq!(report.bytes_written, 6 * crate::mush::RECORD_SIZE as u64);
        for length in MIN_WORD_LEN..=MAX_WORD_LEN {
            assert!(dest.join(bucket_file_name(length)).is_file());
        }

        let mut finder = WordFinder::new(RunConfig::default(), &dest);
        let found = finder.process("east", false).unwrap();
        assert_eq!(found.words, vec!["ate", "eat", "tea", "eats", "seat", "teas"]);
        assert!(!found.is_word);
    }

    #[test]
    fn test_build_missing_bucket_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("words.txt-seperated");
        let dest = temp_dir.path().join("mushes");
        write_buckets(&source, &[]);
        fs::remove_file(source.join("list-9")).unwrap();

        let result = Mushifier::new(RunConfig::default()).process(&source, &dest);
        assert!(matches!(result, Err(Error::OpenInput { .. })));
        assert!(!dest.exists());
    }

    #[test]
    fn test_find_missing_mush_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut finder = WordFinder::new(RunConfig::default(), temp_dir.path());

        let result = finder.find_words(b"cat", true);
        assert!(matches!(result, Err(Error::OpenInput { .. })));
    }
}
