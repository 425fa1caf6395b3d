//! wordlist-mush - index separated word lists by their letters and look words up
//!
//! `build` turns <SEPARATED_DIR>/list-1 .. list-15 into mush files under
//! <MUSH_DIR>; `find` lists the words those files can spell from some letters.

use clap::Parser;
use std::process;

use wordlist_prep::cli::{BuildArgs, FindArgs, MushArgs, MushCommand};
use wordlist_prep::finder::{Mushifier, WordFinder};
use wordlist_prep::processor::RunConfig;
use wordlist_prep::progress::{print_banner, print_error, print_header, print_info};

fn main() {
    let args = MushArgs::parse();

    args.common().init_logging();

    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        for cause in e.chain().skip(1) {
            print_error(&format!("  Caused by: {}", cause));
        }

        process::exit(1);
    }
}

fn run(args: MushArgs) -> anyhow::Result<()> {
    match args.command {
        MushCommand::Build(args) => run_build(args),
        MushCommand::Find(args) => run_find(args),
    }
}

fn run_build(args: BuildArgs) -> anyhow::Result<()> {
    let config = RunConfig::from_args(&args.common)?;

    if !config.quiet {
        print_banner("mush build");
        if config.verbose {
            print_header("Configuration");
            print_info(&format!("Input dir:    {:?}", args.source));
            print_info(&format!("Output dir:   {:?}", args.dest));
            print_info(&format!("Buffer size:  {} KB", config.buffer_size / 1024));
            print_info(&format!("Dry run:      {}", config.dry_run));
        }
    }

    Mushifier::new(config).process(&args.source, &args.dest)?;

    Ok(())
}

fn run_find(args: FindArgs) -> anyhow::Result<()> {
    let config = RunConfig::from_args(&args.common)?;

    if !config.quiet {
        print_banner("mush find");
        if config.verbose {
            print_header("Configuration");
            print_info(&format!("Letters:      {}", args.letters));
            print_info(&format!("Mush dir:     {:?}", args.mushes));
            print_info(&format!("Exact only:   {}", args.exact));
        }
    }

    WordFinder::new(config, args.mushes).process(&args.letters, args.exact)?;

    Ok(())
}
