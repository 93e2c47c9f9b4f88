//! Output formatting for demo reports

use anyhow::Error;
use colored::Colorize;
use serde_json::json;

use crate::run::DemoReport;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print the run report in the requested format
pub fn print_report(report: &DemoReport, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "report": report,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format report as JSON: {e}"),
        }
        return;
    }

    println!("{}", "Latest-frame ring demo".bold());
    println!(
        "  {} slots, {} frames written in {} ms",
        report.slots, report.frames_written, report.elapsed_ms
    );
    for reader in &report.readers {
        let last = reader
            .last_frame
            .map_or_else(|| "-".to_string(), |frame| frame.to_string());
        let skipped = if reader.skipped == 0 {
            reader.skipped.to_string().green()
        } else {
            reader.skipped.to_string().yellow()
        };
        println!(
            "  reader {} ({:<8}) received {:>8}  skipped {:>8}  last {}",
            reader.id, reader.sink, reader.received, skipped, last
        );
    }
}
