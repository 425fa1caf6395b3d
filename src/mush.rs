//! Letter signatures for anagram lookup
//!
//! A [`Mush`] records which letters a word holds, how many of each, and at
//! which positions. The mushes of one bucket are kept sorted by their letter
//! set, so every anagram of a set of letters is found with one binary search.
//!
//! On disk a bucket is a flat run of fixed-size records:
//!
//! | Bytes | Field |
//! |---|---|
//! | 4 | letter set, bit `n` for the `n`th letter of `a-z` (little endian) |
//! | 1 | word length |
//! | 52 | 26 position masks, bit `p` for position `p` (little endian `u16`) |
//! | 26 | count of each letter |

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::output::LineSink;

/// Letters in the alphabet
const LETTERS: usize = 26;

/// Longest word a mush can hold (one bit per position in a `u16`)
pub const MAX_MUSH_LEN: usize = 16;

/// Size of one encoded mush
pub const RECORD_SIZE: usize = 4 + 1 + LETTERS * 2 + LETTERS;

const POSITIONS_AT: usize = 5;
const COUNTS_AT: usize = POSITIONS_AT + LETTERS * 2;

/// Letter signature of one word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mush {
    key: u32,
    word_len: u8,
    positions: [u16; LETTERS],
    counts: [u8; LETTERS],
}

impl Mush {
    /// Mush a word. `None` if it is empty, longer than [`MAX_MUSH_LEN`] or
    /// holds anything but `a-z`.
    pub fn from_word(word: &[u8]) -> Option<Self> {
        if word.is_empty() || word.len() > MAX_MUSH_LEN {
            return None;
        }

        let mut mush = Self {
            key: 0,
            word_len: word.len() as u8,
            positions: [0; LETTERS],
            counts: [0; LETTERS],
        };
        for (pos, &b) in word.iter().enumerate() {
            if !b.is_ascii_lowercase() {
                return None;
            }
            let letter = (b - b'a') as usize;
            mush.key |= 1 << letter;
            mush.positions[letter] |= 1 << pos;
            mush.counts[letter] += 1;
        }
        Some(mush)
    }

    /// Set of letters present, one bit per letter
    pub fn key(&self) -> u32 {
        self.key
    }

    pub fn word_len(&self) -> usize {
        self.word_len as usize
    }

    /// Rebuild the word from its letter positions
    pub fn word(&self) -> Vec<u8> {
        let mut word = vec![0u8; self.word_len()];
        for (letter, &mask) in self.positions.iter().enumerate() {
            for (pos, slot) in word.iter_mut().enumerate() {
                if mask & (1 << pos) != 0 {
                    *slot = b'a' + letter as u8;
                }
            }
        }
        word
    }

    /// Same letters, each the same number of times
    #[inline]
    pub fn is_anagram_of(&self, other: &Mush) -> bool {
        self.word_len == other.word_len && self.counts == other.counts
    }

    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut record = [0u8; RECORD_SIZE];
        record[..4].copy_from_slice(&self.key.to_le_bytes());
        record[4] = self.word_len;
        for (i, mask) in self.positions.iter().enumerate() {
            let at = POSITIONS_AT + i * 2;
            record[at..at + 2].copy_from_slice(&mask.to_le_bytes());
        }
        record[COUNTS_AT..].copy_from_slice(&self.counts);
        record
    }

    /// Decode one record. `None` if its fields disagree with each other.
    pub fn from_bytes(record: &[u8]) -> Option<Self> {
        if record.len() != RECORD_SIZE {
            return None;
        }

        let mut key = [0u8; 4];
        key.copy_from_slice(&record[..4]);
        let mut positions = [0u16; LETTERS];
        for (i, mask) in positions.iter_mut().enumerate() {
            let at = POSITIONS_AT + i * 2;
            *mask = u16::from_le_bytes([record[at], record[at + 1]]);
        }
        let mut counts = [0u8; LETTERS];
        counts.copy_from_slice(&record[COUNTS_AT..]);

        let mush = Self {
            key: u32::from_le_bytes(key),
            word_len: record[4],
            positions,
            counts,
        };
        mush.is_consistent().then_some(mush)
    }

    /// Every position is taken by exactly one letter, and the key and counts
    /// match the positions
    fn is_consistent(&self) -> bool {
        let len = self.word_len();
        if len == 0 || len > MAX_MUSH_LEN || self.key >> LETTERS != 0 {
            return false;
        }

        let mut taken = 0u32;
        for letter in 0..LETTERS {
            let mask = u32::from(self.positions[letter]);
            if mask & taken != 0
                || mask.count_ones() != u32::from(self.counts[letter])
                || (self.key >> letter) & 1 != u32::from(mask != 0)
            {
                return false;
            }
            taken |= mask;
        }
        taken == (1u32 << len) - 1
    }
}

/// The mushes of one bucket, sorted by letter set
#[derive(Debug, Clone)]
pub struct MushIndex {
    mushes: Vec<Mush>,
}

impl MushIndex {
    pub fn new(mut mushes: Vec<Mush>) -> Self {
        // Stable, so words sharing a letter set keep their list order
        mushes.sort_by_key(Mush::key);
        Self { mushes }
    }

    /// Load a mush file written by [`MushIndex::write_to`]
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::OpenInput {
            path: path.to_path_buf(),
            source,
        })?;
        let mut bytes = Vec::new();
        BufReader::new(file)
            .read_to_end(&mut bytes)
            .map_err(Error::Read)?;

        let index = Self::decode(&bytes, path)?;
        log::debug!("Loaded {} mushes from {:?}", index.len(), path);
        Ok(index)
    }

    /// Decode a run of records, checking each one and their order
    pub fn decode(bytes: &[u8], path: &Path) -> Result<Self> {
        let corrupt = |record: usize| Error::CorruptMushes {
            path: path.to_path_buf(),
            offset: (record * RECORD_SIZE) as u64,
        };

        let records = bytes.chunks_exact(RECORD_SIZE);
        if !records.remainder().is_empty() {
            return Err(corrupt(bytes.len() / RECORD_SIZE));
        }

        let mut mushes: Vec<Mush> = Vec::with_capacity(bytes.len() / RECORD_SIZE);
        for (i, record) in records.enumerate() {
            let mush = Mush::from_bytes(record).ok_or_else(|| corrupt(i))?;
            if mushes.last().is_some_and(|prev| prev.key > mush.key) {
                return Err(corrupt(i));
            }
            mushes.push(mush);
        }
        Ok(Self { mushes })
    }

    /// Write every mush as a raw record, in index order
    pub fn write_to<S: LineSink>(&self, sink: &mut S) -> Result<()> {
        for mush in &self.mushes {
            sink.write_raw(&mush.to_bytes())?;
        }
        Ok(())
    }

    /// Every stored mush with exactly the letters of `target`
    pub fn find_anagrams<'a>(&'a self, target: &'a Mush) -> impl Iterator<Item = &'a Mush> + 'a {
        let start = self.mushes.partition_point(|m| m.key < target.key);
        self.mushes[start..]
            .iter()
            .take_while(move |m| m.key == target.key)
            .filter(move |m| m.is_anagram_of(target))
    }

    pub fn len(&self) -> usize {
        self.mushes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mushes.is_empty()
    }
}

/// Every distinct selection of one or more of `letters`, each sorted
pub fn letter_combinations(letters: &[u8]) -> BTreeSet<Vec<u8>> {
    let mut sorted = letters.to_vec();
    sorted.sort_unstable();

    (1u32..1 << sorted.len())
        .map(|mask| {
            sorted
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, &b)| b)
                .collect()
        })
        .collect()
}
