//! FFmpeg argument construction.
//!
//! Maps a validated [`ConversionConfig`] plus input/output paths onto the
//! ordered argument list for one ffmpeg invocation. Two-pass runs share the
//! same mapping with a pass number appended: pass 1 discards video output to
//! the platform null device, pass 2 writes the final file with a
//! progressive-download-friendly layout.

use crate::config::{ConversionConfig, DEFAULT_AUDIO_BITRATE, Quality, Resolution};

use std::path::{Path, PathBuf};

/// Which leg of a two-pass encode an invocation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassNumber {
    /// Analysis pass: statistics only, video output discarded.
    First,
    /// Encoding pass using the statistics from the first pass.
    Second,
}

/// Platform null sink for the analysis pass output.
#[must_use]
pub fn null_device() -> &'static str {
    if cfg!(windows) { "NUL" } else { "/dev/null" }
}

/// Derives the two-pass rate-control flags from a target bitrate.
///
/// The buffer size doubles the numeric magnitude and keeps the unit suffix
/// ("500k" -> "1000k"); max-rate equals the target. A malformed bitrate
/// (no numeric prefix) is logged and yields `None`, so the caller simply
/// omits the derived flags rather than failing the encode.
#[must_use]
pub fn derive_rate_limits(bitrate: &str) -> Option<(String, String)> {
    let digits_end = bitrate
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(bitrate.len());
    let (magnitude, suffix) = bitrate.split_at(digits_end);

    match magnitude.parse::<u64>() {
        Ok(value) => Some((bitrate.to_string(), format!("{}{}", value * 2, suffix))),
        Err(_) => {
            log::warn!("Malformed bitrate '{bitrate}': skipping maxrate/bufsize derivation");
            None
        }
    }
}

/// Derives the output file name for an input: stem + codec label, plus the
/// target height when scaling, keeping the original extension.
#[must_use]
pub fn derived_output_path(
    config: &ConversionConfig,
    input: &Path,
    output_dir: &Path,
) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_else(|| "mp4".to_string());

    let name = match config.resolution {
        Resolution::Height(h) => format!("{stem}_{}_{h}p.{extension}", config.codec.label()),
        Resolution::Original => format!("{stem}_{}.{extension}", config.codec.label()),
    };

    output_dir.join(name)
}

/// Builds the ordered ffmpeg argument list for one invocation.
///
/// `pass` is `None` for a plain single-pass encode. `passlog` points the
/// two-pass stats file somewhere disposable; it is only consulted when a
/// pass number is given.
#[must_use]
pub fn build_ffmpeg_args(
    config: &ConversionConfig,
    input: &Path,
    output: &Path,
    pass: Option<PassNumber>,
    passlog: Option<&Path>,
) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-hide_banner".to_string(),
        "-y".to_string(),
        "-i".to_string(),
        input.display().to_string(),
        "-c:v".to_string(),
        config.codec.encoder_name().to_string(),
        "-preset".to_string(),
        config.preset.clone(),
    ];

    match &config.quality {
        Quality::Bitrate(rate) => {
            args.push("-b:v".to_string());
            args.push(rate.clone());

            if config.uses_two_pass() {
                if let Some((maxrate, bufsize)) = derive_rate_limits(rate) {
                    args.push("-maxrate".to_string());
                    args.push(maxrate);
                    args.push("-bufsize".to_string());
                    args.push(bufsize);
                }
            }
        }
        Quality::Crf(crf) => {
            args.push("-crf".to_string());
            args.push(crf.to_string());
        }
    }

    if let Resolution::Height(height) = config.resolution {
        // -2 keeps the aspect ratio while forcing an even width
        args.push("-vf".to_string());
        args.push(format!("scale=-2:{height}"));
    }

    if let Some(threads) = config.threads {
        args.push("-threads".to_string());
        args.push(threads.to_string());
    }

    if pass.is_some() {
        if let Some(passlog) = passlog {
            args.push("-passlogfile".to_string());
            args.push(passlog.display().to_string());
        }
    }

    match pass {
        Some(PassNumber::First) => {
            // Analysis only: no audio, video discarded to the null sink
            args.push("-pass".to_string());
            args.push("1".to_string());
            args.push("-an".to_string());
            args.push("-f".to_string());
            args.push("null".to_string());
            args.push(null_device().to_string());
        }
        Some(PassNumber::Second) | None => {
            if config.keep_audio {
                args.push("-c:a".to_string());
                args.push("aac".to_string());
                args.push("-b:a".to_string());
                args.push(DEFAULT_AUDIO_BITRATE.to_string());
            } else {
                args.push("-an".to_string());
            }

            if pass == Some(PassNumber::Second) {
                args.push("-pass".to_string());
                args.push("2".to_string());
            }

            args.push("-movflags".to_string());
            args.push("+faststart".to_string());
            args.push(output.display().to_string());
        }
    }

    args
}
