//! The conversion runner: sequential per-file encoding.
//!
//! Files are converted one at a time, one encoder subprocess at a time. A
//! failure (nonzero exit, or a missing output despite a zero exit) marks that
//! file failed and the runner moves on to the next; nothing aborts the run
//! once it has started.

use crate::ConversionResult;
use crate::command::{PassNumber, build_ffmpeg_args, derived_output_path};
use crate::config::ConversionConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{get_file_size, run_ffmpeg};
use crate::utils::{compression_ratio, get_filename_safe};

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Converts all resolved input files into `output_dir`, returning one result
/// per input in order. The returned list includes failed files with their
/// success flag cleared.
pub fn convert_files(
    config: &ConversionConfig,
    files: &[PathBuf],
    output_dir: &Path,
) -> CoreResult<Vec<ConversionResult>> {
    std::fs::create_dir_all(output_dir)?;

    // Two-pass stats logs live in a throwaway directory, cleaned on drop
    let passlog_dir = if config.uses_two_pass() {
        Some(
            tempfile::Builder::new()
                .prefix("vidpress_2pass_")
                .tempdir_in(output_dir)?,
        )
    } else {
        None
    };

    let mut results = Vec::with_capacity(files.len());

    for input in files {
        let filename = get_filename_safe(input).unwrap_or_else(|_| input.display().to_string());
        log::info!("Converting: {filename}");

        let output = derived_output_path(config, input, output_dir);
        let started = Instant::now();

        let outcome = convert_one(
            config,
            input,
            &output,
            passlog_dir.as_ref().map(tempfile::TempDir::path),
        );
        let elapsed = started.elapsed().as_secs_f64();

        let result = match outcome {
            Ok((original_size, converted_size)) => {
                log::info!(
                    "Finished {filename}: {} -> {} bytes in {elapsed:.1}s",
                    original_size,
                    converted_size
                );
                ConversionResult {
                    input_path: input.clone(),
                    output_path: output,
                    original_size,
                    converted_size,
                    compression_ratio: compression_ratio(original_size, converted_size),
                    elapsed_seconds: elapsed,
                    success: true,
                }
            }
            Err(e) => {
                log::error!("Conversion failed for {filename}: {e}");
                ConversionResult {
                    input_path: input.clone(),
                    output_path: output,
                    original_size: get_file_size(input).unwrap_or(0),
                    converted_size: 0,
                    compression_ratio: 0.0,
                    elapsed_seconds: elapsed,
                    success: false,
                }
            }
        };

        results.push(result);
    }

    Ok(results)
}

/// Converts a single file, returning (original_size, converted_size) on
/// success. Runs both passes sequentially in two-pass mode; both must exit
/// zero.
fn convert_one(
    config: &ConversionConfig,
    input: &Path,
    output: &Path,
    passlog_dir: Option<&Path>,
) -> CoreResult<(u64, u64)> {
    let original_size = get_file_size(input)?;

    if config.uses_two_pass() {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "passlog".to_string());
        let passlog = passlog_dir.map(|dir| dir.join(stem));

        let first = build_ffmpeg_args(
            config,
            input,
            output,
            Some(PassNumber::First),
            passlog.as_deref(),
        );
        run_ffmpeg(config, &first)?;

        let second = build_ffmpeg_args(
            config,
            input,
            output,
            Some(PassNumber::Second),
            passlog.as_deref(),
        );
        run_ffmpeg(config, &second)?;
    } else {
        let args = build_ffmpeg_args(config, input, output, None, None);
        run_ffmpeg(config, &args)?;
    }

    // The encoder can exit zero without writing anything usable
    if !output.is_file() {
        return Err(CoreError::OutputMissing(output.to_path_buf()));
    }

    let converted_size = get_file_size(output)?;
    Ok((original_size, converted_size))
}
