//! API Specifier - Command-line tool describing marker-annotated API surfaces.
//!
//! # Usage
//!
//! ```bash
//! api-specifier [OPTIONS] <PROJECT_PATH>
//! ```
//!
//! # Examples
//!
//! Summarize every type in a project:
//! ```bash
//! api-specifier ./my-project
//! ```
//!
//! Describe one operation as JSON:
//! ```bash
//! api-specifier ./my-project -t Calc -m add -f json
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! api-specifier ./my-project -v
//! ```

use anyhow::Result;
use api_specifier::cli;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // Parse once to read the verbose flag before the logger exists
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("API Specifier starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    Ok(())
}
