//! wordlist-clean - keep only the lowercase words of a word list
//!
//! Writes the words of <FILE> to <FILE>-cleaned.

use clap::Parser;
use std::path::Path;
use std::process;

use wordlist_prep::cli::{CleanArgs, CommonArgs};
use wordlist_prep::filter::WordValidator;
use wordlist_prep::output::cleaned_path;
use wordlist_prep::processor::{Cleaner, RunConfig};
use wordlist_prep::progress::{print_banner, print_error, print_header, print_info};

fn main() {
    let args = CleanArgs::parse();

    // Wrong arity: usage message only, no I/O
    let input = match args.input() {
        Ok(input) => input.to_path_buf(),
        Err(usage) => {
            println!("{}", usage);
            process::exit(2);
        }
    };

    args.common.init_logging();

    if let Err(e) = run(&args.common, &input) {
        print_error(&format!("{}", e));

        for cause in e.chain().skip(1) {
            print_error(&format!("  Caused by: {}", cause));
        }

        process::exit(1);
    }
}

fn run(common: &CommonArgs, input: &Path) -> anyhow::Result<()> {
    let config = RunConfig::from_args(common)?;

    if !config.quiet {
        print_banner("clean");
        if config.verbose {
            print_config(input, &config);
        }
    }

    Cleaner::new(config).process(input)?;

    Ok(())
}

/// Print configuration summary
fn print_config(input: &Path, config: &RunConfig) {
    print_header("Configuration");

    print_info(&format!("Input:        {:?}", input));
    print_info(&format!("Output:       {:?}", cleaned_path(input)));
    print_info(&format!("Pattern:      {}", WordValidator::new().pattern_str()));
    print_info(&format!("Buffer size:  {} KB", config.buffer_size / 1024));
    print_info(&format!("Dry run:      {}", config.dry_run));
}
