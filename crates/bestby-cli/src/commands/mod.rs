//! CLI subcommands.

pub mod config;
pub mod scan;
pub mod text;

use bestby_core::ScanReport;

/// Output format shared by the scan and text commands.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain date in DD-MM-YYYY form, or NOT DETECTED
    Text,
    /// Detection plus the ranked candidate pool
    Json,
}

/// Render a scan report in the requested format.
pub fn render(report: &ScanReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(report.detection.to_string()),
        OutputFormat::Json => {
            let value = serde_json::json!({
                "detected": report.detection.date().is_some(),
                "expiry": report.detection.date().map(|d| d.format("%d-%m-%Y").to_string()),
                "candidates": report.candidates,
            });
            Ok(serde_json::to_string_pretty(&value)?)
        }
    }
}
