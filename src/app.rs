// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod extensions;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use chrono::Local;
use std::env;
use std::fs;

use self::cli::Cli;
use self::config::{
    is_earlier_report, load_presets_file, output_path, presets_path, resolve_config,
};
use self::error::ExtractError;
use self::formatter::write_report;
use self::models::ReportHeader;
use self::scanner::Scanner;

/// Scans, renders and writes one report. Returns an error only for fatal failures.
pub fn run(args: Cli) -> Result<()> {
    // 1. Resolve Configuration (presets are only read when asked for)
    let presets = match args.preset {
        Some(_) => load_presets_file(&presets_path()?)?,
        None => Default::default(),
    };
    let config = resolve_config(args, &presets)?;

    // 2. Scan Directory
    let scanner = Scanner::new(&config.scan)?;
    log::info!(
        "Looking for files with extensions: {}",
        config.scan.extensions.describe()
    );
    let mut entries = scanner.scan();

    // An output directory like `.` cannot be pruned by name.
    if let Ok(report_dir) = fs::canonicalize(&config.output_dir) {
        entries.retain(|entry| {
            let earlier = is_earlier_report(
                &entry.path,
                &report_dir,
                scanner.root(),
                &config.scan.extensions,
            );
            if earlier {
                log::info!("Excluded earlier report: {}", entry.relative_path);
            }
            !earlier
        });
    }

    if entries.is_empty() {
        log::warn!("⚠️ No files found to concatenate!");
        return Ok(());
    }

    // 3. Render
    let started = Local::now().naive_local();
    let report_path = output_path(
        &config.output_dir,
        scanner.root(),
        &config.scan.extensions,
        started.date(),
    );
    let header = ReportHeader {
        generated_at: started,
        source_dir: scanner.root().to_path_buf(),
        file_types: config.scan.extensions.describe(),
    };

    log::info!("Writing to: {}", report_path.display());
    let summary = write_report(&report_path, &header, &entries)?;

    if !summary.unreadable.is_empty() {
        log::warn!(
            "⚠️ {} of {} file(s) could not be read; see inline errors in the report",
            summary.unreadable.len(),
            summary.files_written
        );
        for err in &summary.unreadable {
            if let ExtractError::FileRead { path, .. } = err {
                log::warn!("   - {}", path.display());
            }
        }
    }

    // 4. Print the report location to stdout
    let shown = if report_path.is_absolute() {
        report_path
    } else {
        env::current_dir()
            .context("Failed to get current directory")?
            .join(report_path)
    };
    println!("{}", shown.display());

    Ok(())
}
