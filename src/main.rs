//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `denylist` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! Exit status is 0 when nothing matched, 1 when at least one source listed a
//! URL and 2 on error.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use denylist::initialization::init_logger_with;
use denylist::services::presets::preset_summaries;
use denylist::{run_check, AddressListItem, CheckReport, Config, OutputFormat};

const EXIT_MATCHED: i32 = 1;
const EXIT_ERROR: i32 = 2;

fn main() {
    // Load environment variables from .env file (if it exists)
    // This allows setting GSB_API_KEY in .env without exporting it manually
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    if config.list_dnsbl {
        for line in preset_summaries() {
            println!("{line}");
        }
        return;
    }

    if let Err(e) = init(&config) {
        eprintln!("denylist error: {e:#}");
        process::exit(EXIT_ERROR);
    }

    if !config.has_sources() {
        log::warn!("No denylist source configured; every URL will be reported clean");
    }

    match run_check(&config) {
        Ok(report) => {
            print_report(&report, &config.output);
            if !report.is_clean() {
                process::exit(EXIT_MATCHED);
            }
        }
        Err(e) => {
            eprintln!("denylist error: {e:#}");
            process::exit(EXIT_ERROR);
        }
    }
}

fn init(config: &Config) -> Result<()> {
    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")
}

fn print_report(report: &CheckReport, output: &OutputFormat) {
    for item in &report.matches {
        match output {
            OutputFormat::Plain => println!("{}", plain_line(item)),
            OutputFormat::Json => match serde_json::to_string(item) {
                Ok(line) => println!("{line}"),
                Err(e) => log::error!("Failed to serialize match for {}: {e}", item.value),
            },
        }
    }

    if matches!(output, OutputFormat::Plain) {
        let summary = format!(
            "Checked {} URL{}: {} match{} in {:.1}s",
            report.checked_urls.len(),
            if report.checked_urls.len() == 1 { "" } else { "s" },
            report.matches.len(),
            if report.matches.len() == 1 { "" } else { "es" },
            report.elapsed_seconds
        );
        if report.is_clean() {
            eprintln!("{}", summary.green());
        } else {
            eprintln!("{}", summary.red());
        }
    }
}

fn plain_line(item: &AddressListItem) -> String {
    format!(
        "{}: {} [{}]",
        item.value, item.source, item.classification
    )
}
