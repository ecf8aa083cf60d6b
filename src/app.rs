pub mod cli;
pub mod config;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::models::MergeSummary;
use self::scanner::Scanner;

/// Resolves configuration, writes the merged document and prints the report.
pub fn run(cli: Cli) -> Result<MergeSummary> {
    let config = resolve_config(cli)?;
    if config.extensions.is_empty() {
        log::warn!("No file extensions given; only the directory listing will be written.");
    }

    let scanner = Scanner::new(&config);
    let listing = scanner.directory_listing();

    let file = File::create(&config.output)
        .with_context(|| format!("Failed to create output file {}", config.output.display()))?;
    let mut writer = BufWriter::new(file);

    let summary = OutputGenerator::write_document(&mut writer, &listing, &scanner.source_files())
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", config.output.display()))?;
    drop(writer);

    if summary.failed > 0 {
        log::warn!("{} file(s) could not be read", summary.failed);
    }
    println!("{}", OutputGenerator::format_report(&config, &summary));

    Ok(summary)
}
