//! Progress display module
//!
//! Provides styled status lines, the byte progress bar and run summaries.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use crate::finder::MushReport;
use crate::processor::{CleanReport, SeparateReport};

/// Print the application banner
pub fn print_banner(tool: &str) {
    let title = format!("WORDLIST-PREP :: {}", tool.to_uppercase());
    let width = 60;

    println!("{}", format!("╔{}╗", "═".repeat(width)).green());
    println!("{}", format!("║{:^width$}║", title, width = width).green().bold());
    println!("{}", format!("╚{}╝", "═".repeat(width)).green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a bytes-based progress bar, hidden when `quiet`
pub fn create_bytes_progress_bar(total_bytes: u64, msg: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total_bytes);

    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
            .expect("progress template is valid")
            .progress_chars("█▓░")
    );

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

fn print_rule() {
    println!("{}", "═".repeat(60).green());
}

fn print_timing(bytes: u64, lines: u64, elapsed: Duration) {
    let secs = elapsed.as_secs_f64();
    let (lines_per_sec, bytes_per_sec) = if secs > 0.0 {
        (lines as f64 / secs, bytes as f64 / secs)
    } else {
        (0.0, 0.0)
    };

    println!();
    println!("  {} {}", "Duration:       ".green(), format_duration(elapsed));
    println!("  {} {:.2} lines/sec", "Throughput:     ".green(), lines_per_sec);
    println!("  {} {}/sec", "Speed:          ".green(), ByteSize(bytes_per_sec as u64));
}

/// Print final statistics for a clean run
pub fn print_clean_summary(report: &CleanReport, bytes_written: u64, elapsed: Duration) {
    println!();
    print_rule();
    println!("{}", "                     CLEANING COMPLETE".green().bold());
    print_rule();
    println!();

    println!("  {} {}", "Data read:      ".green(), ByteSize(report.bytes_read));
    println!("  {} {}", "Total lines:    ".green(), format_number(report.lines_read));
    println!("  {} {}", "Rejected:       ".yellow(), format_number(report.rejected()));
    println!("  {} {}", "Words kept:     ".green().bold(),
        format_number(report.words_kept).green().bold());
    println!("  {} {}", "Data written:   ".green(), ByteSize(bytes_written));

    print_timing(report.bytes_read, report.lines_read, elapsed);
    println!();
    print_rule();
}

/// Print final statistics for a separate run
pub fn print_separate_summary(report: &SeparateReport, bytes_written: u64, elapsed: Duration) {
    println!();
    print_rule();
    println!("{}", "                    SEPARATING COMPLETE".green().bold());
    print_rule();
    println!();

    println!("  {} {}", "Data read:      ".green(), ByteSize(report.bytes_read));
    println!("  {} {}", "Total lines:    ".green(), format_number(report.lines_read));
    println!("  {} {}", "Routed:         ".green().bold(),
        format_number(report.routed()).green().bold());
    println!("  {} {}", "Out of range:   ".yellow(), format_number(report.dropped()));
    println!("  {} {}", "Data written:   ".green(), ByteSize(bytes_written));

    print_timing(report.bytes_read, report.lines_read, elapsed);
    println!();
    print_rule();
}

/// Print final statistics for a mush build
pub fn print_mush_summary(report: &MushReport, elapsed: Duration) {
    println!();
    print_rule();
    println!("{}", "                      MUSHING COMPLETE".green().bold());
    print_rule();
    println!();

    println!("  {} {}", "Data read:      ".green(), ByteSize(report.bytes_read));
    println!("  {} {}", "Bucket files:   ".green(), format_number(report.files));
    println!("  {} {}", "Skipped:        ".yellow(), format_number(report.skipped));
    println!("  {} {}", "Words mushed:   ".green().bold(),
        format_number(report.words).green().bold());
    println!("  {} {}", "Data written:   ".green(), ByteSize(report.bytes_written));

    print_timing(report.bytes_read, report.words + report.skipped, elapsed);
    println!();
    print_rule();
}

/// List the bucket files with their line counts and sizes
pub fn print_bucket_listing<'a>(buckets: impl IntoIterator<Item = (usize, &'a Path, u64, u64)>) {
    for (length, path, lines, bytes) in buckets {
        print_bullet(&format!(
            "Length {:>2}: {:?} ({} words, {})",
            length,
            path,
            format_number(lines),
            ByteSize(bytes)
        ));
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
