//! Implementation of the 'convert' subcommand.
//!
//! Resolves input files, runs the preflight encoder checks, delegates the
//! per-file conversions to vidpress-core, writes the run reports, and prints
//! a styled terminal summary.

use crate::cli::{ConvertArgs, QualityMode};
use crate::error::CliResult;

use vidpress_core::config::{Codec, ConversionConfig, DEFAULT_CRF, Quality, Resolution};
use vidpress_core::reporting::RunReport;
use vidpress_core::{format_bytes, format_duration};

use console::style;
use log::{info, warn};
use std::fs;
use std::time::Instant;

/// Builds and validates the core configuration from CLI arguments.
fn create_config(args: &ConvertArgs) -> CliResult<ConversionConfig> {
    let codec: Codec = args.codec.parse()?;

    let quality = match args.quality_mode {
        QualityMode::Bitrate => Quality::Bitrate(args.bitrate.clone()),
        QualityMode::Quality => Quality::Crf(args.crf.unwrap_or(DEFAULT_CRF)),
    };

    if args.quality_mode == QualityMode::Bitrate && args.crf.is_some() {
        warn!("--crf is ignored in bitrate mode");
    }

    let mut config = ConversionConfig::new(codec);
    config.quality = quality;
    config.preset = args.preset.clone();
    config.resolution = args.resolution.parse::<Resolution>()?;
    config.keep_audio = !args.no_audio;
    config.two_pass = args.two_pass;
    config.threads = args.threads;
    config.ffmpeg_path = args.ffmpeg.clone();

    config.validate()?;
    Ok(config)
}

/// Prints the per-file and run-level summary to the terminal.
fn print_summary(report: &RunReport) {
    println!();
    println!("{}", style("Conversion Summary").cyan().bold());
    println!("{}", style("========================================").cyan());

    for result in &report.results {
        let name = result
            .input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| result.input_path.display().to_string());

        if result.success {
            println!(
                "{} {}: {} -> {} ({:.1}%) in {}",
                style("[OK]").green(),
                style(&name).bold(),
                format_bytes(result.original_size),
                format_bytes(result.converted_size),
                result.compression_ratio,
                format_duration(result.elapsed_seconds)
            );
        } else {
            println!(
                "{} {}: failed after {}",
                style("[FAIL]").red().bold(),
                style(&name).bold(),
                format_duration(result.elapsed_seconds)
            );
        }
    }

    println!("{}", style("----------------------------------------").cyan());
    println!(
        "Converted {} of {} file(s)",
        style(report.successful_conversions).green().bold(),
        report.total_files
    );
    if let Some(avg) = report.average_compression {
        println!("Average compression: {}", style(format!("{avg:.1}%")).bold());
    }
    println!(
        "Total time: {}",
        style(format_duration(report.total_elapsed_seconds)).bold()
    );
}

/// Runs the conversion pipeline end to end and returns the run report.
///
/// Fatal conditions (no inputs, encoder unavailable) propagate as errors
/// before any file is touched; per-file failures are reflected in the report
/// instead.
pub fn run_convert(args: ConvertArgs) -> CliResult<RunReport> {
    let total_start_time = Instant::now();
    let started_at = chrono::Local::now();

    let config = create_config(&args)?;

    // Preflight: encoder binary and codec availability, before any work
    vidpress_core::check_ffmpeg(&config)?;
    vidpress_core::check_encoder_available(&config)?;

    let files = vidpress_core::resolve_inputs(&args.input)?;

    fs::create_dir_all(&args.output_dir)?;

    println!(
        "{} {} file(s) matched '{}'",
        style("Inputs:").cyan().bold(),
        files.len(),
        args.input
    );
    println!(
        "{} {} / {} / {} / audio {}",
        style("Settings:").cyan().bold(),
        config.codec,
        match &config.quality {
            Quality::Bitrate(rate) if config.uses_two_pass() => format!("{rate} (two-pass)"),
            Quality::Bitrate(rate) => rate.clone(),
            Quality::Crf(crf) => format!("crf {crf}"),
        },
        config.resolution,
        if config.keep_audio { "kept" } else { "dropped" }
    );
    info!("Output directory: {}", args.output_dir.display());

    let results = vidpress_core::convert_files(&config, &files, &args.output_dir)?;

    let report = RunReport::from_results(
        results,
        started_at,
        total_start_time.elapsed().as_secs_f64(),
    );

    // A report-write failure is logged but does not discard the statistics
    // or change the run outcome
    if let Err(e) = vidpress_core::write_reports(&report, &args.output_dir) {
        log::error!("{e}");
    }

    print_summary(&report);

    Ok(report)
}
