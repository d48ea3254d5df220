//! Combo Editor - split, merge and deduplicate combo lists
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use combo_editor::cli::Args;
use combo_editor::processor::{exit_code, Processor, ProcessorConfig};
use combo_editor::progress::{print_banner, print_error};

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();

    if let Err(e) = run(args) {
        print_error(&format!("{}", e));
        for cause in e.chain().skip(1) {
            print_error(&format!("  Caused by: {}", cause));
        }

        process::exit(exit_code(&e));
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if !args.quiet && !args.json {
        print_banner();
    }

    let config = ProcessorConfig::from_args(&args);
    log::debug!("Configuration: {:?}", config);

    Processor::new(config).run(&args.command)
}
