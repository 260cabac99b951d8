//! The main entry point for the `refactor` command-line application.
//!
//! Parses arguments, prints usage when the patterns are missing and otherwise
//! hands the resolved settings to the library.

use refactor::cli;
use refactor::config::{ConfigLoader, Settings};
use refactor::{OutputFormatter, PromptConfirm, logging, runner};
use std::io;

fn main() -> anyhow::Result<()> {
    let args = cli::parse_args();

    if !args.has_patterns() {
        println!("{}", cli::usage());
        return Ok(());
    }

    logging::init_logger(args.verbose, !args.no_color)?;

    let defaults = ConfigLoader::load_defaults(args.config.as_deref())?;
    let Some(settings) = Settings::resolve(&args, defaults)? else {
        println!("{}", cli::usage());
        return Ok(());
    };

    if !settings.color {
        colored::control::set_override(false);
    }

    let mut confirm = PromptConfirm::stdio();
    let mut out = io::stdout();
    let summary = runner::run(&settings, &mut confirm, &mut out)?;
    OutputFormatter::new(settings.format).write_summary(&mut out, &summary)?;

    Ok(())
}
