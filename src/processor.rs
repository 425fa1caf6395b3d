//! Core processing engine
//!
//! [`Cleaner`] keeps the lines that are words, [`Separator`] splits lines into
//! per-length buckets. Both make a single sequential pass over their input.

use bytesize::ByteSize;
use colored::*;
use indicatif::ProgressBar;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::CommonArgs;
use crate::error::{Error, Result};
use crate::filter::{LengthRouter, WordValidator, BUCKET_COUNT, MAX_WORD_LEN, MIN_WORD_LEN};
use crate::line::scan_lines;
use crate::output::{
    bucket_file_name, cleaned_path, ensure_output_dir, separated_dir, BucketSet, LineSink,
    OutputWriter, DEFAULT_BUFFER_SIZE,
};
use crate::progress::{
    create_bytes_progress_bar, print_bucket_listing, print_bullet, print_clean_summary,
    print_header, print_info, print_separate_summary, print_success,
};

/// Read buffer for input files
pub(crate) const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Run configuration shared by both tools
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub buffer_size: usize,
    pub dry_run: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl RunConfig {
    pub fn from_args(args: &CommonArgs) -> Result<Self> {
        Ok(Self {
            buffer_size: args.parse_buffer_size()?,
            dry_run: args.dry_run,
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            dry_run: false,
            quiet: true,
            verbose: false,
        }
    }
}

/// Outcome of a clean run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub lines_read: u64,
    pub bytes_read: u64,
    pub words_kept: u64,
}

impl CleanReport {
    pub fn rejected(&self) -> u64 {
        self.lines_read - self.words_kept
    }
}

/// Outcome of a separate run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeparateReport {
    pub lines_read: u64,
    pub bytes_read: u64,
    /// Lines per bucket, index 0 holds length `MIN_WORD_LEN`
    pub bucket_counts: [u64; BUCKET_COUNT],
}

impl SeparateReport {
    /// Lines routed to the bucket for `length`
    pub fn count(&self, length: usize) -> u64 {
        length
            .checked_sub(MIN_WORD_LEN)
            .and_then(|i| self.bucket_counts.get(i))
            .copied()
            .unwrap_or(0)
    }

    pub fn routed(&self) -> u64 {
        self.bucket_counts.iter().sum()
    }

    /// Lines too short or too long for any bucket
    pub fn dropped(&self) -> u64 {
        self.lines_read - self.routed()
    }
}

pub(crate) fn open_input(path: &Path) -> Result<(File, u64)> {
    let open_error = |source| Error::OpenInput {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(open_error)?;
    let size = file.metadata().map_err(open_error)?.len();
    Ok((file, size))
}

pub(crate) fn print_dry_run(input: &Path, size: u64, outputs: &[PathBuf]) {
    print_header("DRY RUN - No files will be written");

    println!("\n  {} Input:", "▶".green());
    print_bullet(&format!("{:?} ({})", input, ByteSize(size)));

    println!("\n  {} Outputs:", "▶".green());
    for path in outputs {
        print_bullet(&format!("{:?}", path));
    }
}

/// Keeps only the lines that are words
pub struct Cleaner {
    config: RunConfig,
    validator: WordValidator,
}

impl Cleaner {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            validator: WordValidator::new(),
        }
    }

    /// Copy every word from `reader` to `sink`, in input order
    pub fn clean<R: BufRead, S: LineSink>(&self, reader: R, sink: &mut S) -> Result<CleanReport> {
        self.clean_with_progress(reader, sink, &ProgressBar::hidden())
    }

    fn clean_with_progress<R: BufRead, S: LineSink>(
        &self,
        reader: R,
        sink: &mut S,
        pb: &ProgressBar,
    ) -> Result<CleanReport> {
        let mut report = CleanReport::default();

        report.bytes_read = scan_lines(reader, |line| {
            report.lines_read += 1;
            pb.inc(line.raw_len() as u64);

            if self.validator.is_word(&line) {
                sink.write_line(line.content())?;
                report.words_kept += 1;
            }
            Ok(())
        })?;

        Ok(report)
    }

    /// Clean `input` into `<input>-cleaned`
    pub fn process(&self, input: &Path) -> Result<CleanReport> {
        let output_path = cleaned_path(input);
        let (file, size) = open_input(input)?;
        log::debug!("Cleaning {:?} ({} bytes) into {:?}", input, size, output_path);

        if self.config.dry_run {
            if !self.config.quiet {
                print_dry_run(input, size, &[output_path]);
            }
            return Ok(CleanReport::default());
        }

        if !self.config.quiet {
            print_header("Cleaning word list...");
            print_info(&format!("Input:  {:?} ({})", input, ByteSize(size)));
            print_info(&format!("Output: {:?}", output_path));
        }

        let mut output = OutputWriter::create(output_path.clone(), self.config.buffer_size)?;
        let pb = create_bytes_progress_bar(size, "Cleaning...", self.config.quiet);
        let started = Instant::now();

        let report = self.clean_with_progress(
            BufReader::with_capacity(READ_BUFFER_SIZE, file),
            &mut output,
            &pb,
        )?;
        output.flush()?;
        pb.finish_and_clear();

        log::debug!(
            "Kept {} of {} lines in {:?}",
            output.lines_written(),
            report.lines_read,
            output_path
        );

        if !self.config.quiet {
            print_success(&format!("Output written to: {:?}", output.path()));
            print_clean_summary(&report, output.bytes_written(), started.elapsed());
        }

        Ok(report)
    }
}

/// Splits lines into one bucket per length
pub struct Separator {
    config: RunConfig,
    router: LengthRouter,
}

impl Separator {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            router: LengthRouter::new(),
        }
    }

    /// Route every line of `reader` to its length bucket, dropping the lines
    /// that fit no bucket.
    ///
    /// An unterminated final line is copied byte for byte, so its bucket
    /// file ends without a terminator.
    pub fn separate<R: BufRead, S: LineSink>(
        &self,
        reader: R,
        buckets: &mut BucketSet<S>,
    ) -> Result<SeparateReport> {
        self.separate_with_progress(reader, buckets, &ProgressBar::hidden())
    }

    fn separate_with_progress<R: BufRead, S: LineSink>(
        &self,
        reader: R,
        buckets: &mut BucketSet<S>,
        pb: &ProgressBar,
    ) -> Result<SeparateReport> {
        let mut report = SeparateReport::default();

        report.bytes_read = scan_lines(reader, |line| {
            report.lines_read += 1;
            pb.inc(line.raw_len() as u64);

            if let Some(length) = self.router.route(&line) {
                if line.is_terminated() {
                    buckets.write_line(length, line.content())?;
                } else {
                    buckets.write_raw(length, line.content())?;
                }
                report.bucket_counts[length - MIN_WORD_LEN] += 1;
            }
            Ok(())
        })?;

        Ok(report)
    }

    /// Split `input` into `<input>-seperated/list-1` .. `list-15`
    pub fn process(&self, input: &Path) -> Result<SeparateReport> {
        let output_dir = separated_dir(input);
        let (file, size) = open_input(input)?;
        log::debug!("Separating {:?} ({} bytes) into {:?}", input, size, output_dir);

        if self.config.dry_run {
            if !self.config.quiet {
                let outputs: Vec<_> = self
                    .router
                    .lengths()
                    .map(|len| output_dir.join(bucket_file_name(len)))
                    .collect();
                print_dry_run(input, size, &outputs);
            }
            return Ok(SeparateReport::default());
        }

        if !self.config.quiet {
            print_header(&format!(
                "Separating word list (lengths {}-{})...",
                MIN_WORD_LEN, MAX_WORD_LEN
            ));
            print_info(&format!("Input:  {:?} ({})", input, ByteSize(size)));
            print_info(&format!("Output: {:?}", output_dir));
        }

        if output_dir.is_dir() {
            log::debug!("Reusing existing directory {:?}", output_dir);
        }
        ensure_output_dir(&output_dir)?;
        let mut buckets = BucketSet::create(&output_dir, self.config.buffer_size)?;

        let pb = create_bytes_progress_bar(size, "Separating...", self.config.quiet);
        let started = Instant::now();

        let report = self.separate_with_progress(
            BufReader::with_capacity(READ_BUFFER_SIZE, file),
            &mut buckets,
            &pb,
        )?;
        buckets.flush_all()?;
        pb.finish_and_clear();

        log::debug!(
            "Routed {} of {} lines into {:?}",
            report.routed(),
            report.lines_read,
            output_dir
        );

        if !self.config.quiet {
            let bytes_written: u64 = buckets.iter().map(|(_, w)| w.bytes_written()).sum();
            print_success("Output files created:");
            print_bucket_listing(
                buckets
                    .iter()
                    .map(|(len, writer)| (len, writer.path(), report.count(len), writer.bytes_written())),
            );
            print_separate_summary(&report, bytes_written, started.elapsed());
        }

        Ok(report)
    }
}
