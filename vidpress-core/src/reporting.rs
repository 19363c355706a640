//! Run report generation.
//!
//! Aggregates the per-file conversion results into a run-level summary and
//! writes two artifacts into the output directory: a machine-readable JSON
//! summary and a plain-text report. A write failure is surfaced to the caller
//! but never touches the already-computed statistics.

use crate::ConversionResult;
use crate::error::{CoreError, CoreResult};
use crate::utils::{format_bytes, format_duration};

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// File name of the machine-readable summary.
pub const SUMMARY_FILENAME: &str = "conversion_summary.json";

/// File name of the human-readable report.
pub const REPORT_FILENAME: &str = "conversion_report.txt";

/// Aggregate statistics for a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Local>,
    pub total_files: usize,
    pub successful_conversions: usize,
    pub total_original_size: u64,
    pub total_converted_size: u64,
    /// Average compression ratio over successful files; absent when no file
    /// succeeded or the total original size is zero.
    pub average_compression: Option<f64>,
    pub total_elapsed_seconds: f64,
    pub results: Vec<ConversionResult>,
}

impl RunReport {
    /// Computes the run-level aggregate from the ordered result list.
    #[must_use]
    pub fn from_results(
        results: Vec<ConversionResult>,
        started_at: DateTime<Local>,
        total_elapsed_seconds: f64,
    ) -> Self {
        let successful: Vec<&ConversionResult> =
            results.iter().filter(|r| r.success).collect();

        let total_original_size: u64 = successful.iter().map(|r| r.original_size).sum();
        let total_converted_size: u64 = successful.iter().map(|r| r.converted_size).sum();

        let average_compression = if !successful.is_empty() && total_original_size > 0 {
            let sum: f64 = successful.iter().map(|r| r.compression_ratio).sum();
            Some(sum / successful.len() as f64)
        } else {
            None
        };

        Self {
            started_at,
            total_files: results.len(),
            successful_conversions: successful.len(),
            total_original_size,
            total_converted_size,
            average_compression,
            total_elapsed_seconds,
            results,
        }
    }

    /// True when every input file converted successfully.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.successful_conversions == self.total_files
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========================================")?;
        writeln!(f, "Conversion Report")?;
        writeln!(f, "Started: {}", self.started_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "========================================")?;

        for result in &self.results {
            let name = result
                .input_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| result.input_path.display().to_string());

            if result.success {
                writeln!(f, "[OK]   {name}")?;
                writeln!(
                    f,
                    "       {} -> {} ({:.1}% smaller) in {}",
                    format_bytes(result.original_size),
                    format_bytes(result.converted_size),
                    result.compression_ratio,
                    format_duration(result.elapsed_seconds)
                )?;
            } else {
                writeln!(f, "[FAIL] {name}")?;
                writeln!(
                    f,
                    "       conversion failed after {}",
                    format_duration(result.elapsed_seconds)
                )?;
            }
        }

        writeln!(f, "----------------------------------------")?;
        writeln!(f, "Files:       {}", self.total_files)?;
        writeln!(f, "Succeeded:   {}", self.successful_conversions)?;
        writeln!(
            f,
            "Failed:      {}",
            self.total_files - self.successful_conversions
        )?;
        writeln!(
            f,
            "Total input: {}",
            format_bytes(self.total_original_size)
        )?;
        writeln!(
            f,
            "Total output: {}",
            format_bytes(self.total_converted_size)
        )?;
        if let Some(avg) = self.average_compression {
            writeln!(f, "Avg compression: {avg:.1}%")?;
        }
        writeln!(
            f,
            "Total time:  {}",
            format_duration(self.total_elapsed_seconds)
        )?;

        Ok(())
    }
}

/// Writes the JSON summary and text report into the output directory,
/// returning the two paths. Fails with `ReportWrite` on the first artifact
/// that cannot be written.
pub fn write_reports(report: &RunReport, output_dir: &Path) -> CoreResult<(PathBuf, PathBuf)> {
    let json_path = output_dir.join(SUMMARY_FILENAME);
    let text_path = output_dir.join(REPORT_FILENAME);

    let json = serde_json::to_string_pretty(report)
        .map_err(|e| CoreError::PathError(format!("Failed to serialize run report: {e}")))?;
    std::fs::write(&json_path, json)
        .map_err(|e| CoreError::ReportWrite(json_path.clone(), e))?;

    std::fs::write(&text_path, report.to_string())
        .map_err(|e| CoreError::ReportWrite(text_path.clone(), e))?;

    log::info!(
        "Reports written: {} and {}",
        json_path.display(),
        text_path.display()
    );
    Ok((json_path, text_path))
}
