//! wordlist-separate - split a word list into one file per word length
//!
//! Writes the lines of <FILE> to <FILE>-seperated/list-1 .. list-15.

use clap::Parser;
use std::path::Path;
use std::process;

use wordlist_prep::cli::{CommonArgs, SeparateArgs};
use wordlist_prep::filter::{MAX_WORD_LEN, MIN_WORD_LEN};
use wordlist_prep::output::separated_dir;
use wordlist_prep::processor::{RunConfig, Separator};
use wordlist_prep::progress::{print_banner, print_error, print_header, print_info};

fn main() {
    let args = SeparateArgs::parse();

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
        print_banner("separate");
        if config.verbose {
            print_config(input, &config);
        }
    }

    Separator::new(config).process(input)?;

    Ok(())
}

/// Print configuration summary
fn print_config(input: &Path, config: &RunConfig) {
    print_header("Configuration");

    print_info(&format!("Input:        {:?}", input));
    print_info(&format!("Output dir:   {:?}", separated_dir(input)));
    print_info(&format!("Lengths:      {}-{}", MIN_WORD_LEN, MAX_WORD_LEN));
    print_info(&format!("Buffer size:  {} KB", config.buffer_size / 1024));
    print_info(&format!("Dry run:      {}", config.dry_run));
}
