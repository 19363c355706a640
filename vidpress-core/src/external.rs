//! Interactions with the external ffmpeg binary.
//!
//! Everything that touches a subprocess lives here: the preflight dependency
//! and encoder checks, and the single-invocation runner that executes a built
//! argument list and captures the exit status plus the diagnostic stream.

use crate::config::ConversionConfig;
use crate::error::{CoreError, CoreResult};

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Checks that the configured ffmpeg binary is present and executable.
pub fn check_ffmpeg(config: &ConversionConfig) -> CoreResult<()> {
    let name = config.ffmpeg_path.display().to_string();

    let result = Command::new(&config.ffmpeg_path)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found encoder binary: {name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Encoder binary '{name}' not found");
            Err(CoreError::DependencyNotFound(name))
        }
        Err(e) => Err(CoreError::CommandStart(name, e)),
    }
}

/// Checks that the ffmpeg build provides the requested video encoder.
///
/// Scans `ffmpeg -encoders` output for the encoder name. Fatal before any
/// work starts when the codec is missing from the build.
pub fn check_encoder_available(config: &ConversionConfig) -> CoreResult<()> {
    let name = config.ffmpeg_path.display().to_string();
    let encoder = config.codec.encoder_name();

    let output = Command::new(&config.ffmpeg_path)
        .args(["-hide_banner", "-encoders"])
        .output()
        .map_err(|e| CoreError::CommandStart(name, e))?;

    let listing = String::from_utf8_lossy(&output.stdout);
    if listing.lines().any(|line| {
        line.split_whitespace()
            .nth(1)
            .is_some_and(|n| n == encoder)
    }) {
        log::debug!("Encoder '{encoder}' is available");
        Ok(())
    } else {
        Err(CoreError::EncoderUnavailable(encoder.to_string()))
    }
}

/// Runs one ffmpeg invocation with the given argument list.
///
/// Stderr is captured; on a nonzero exit the tail of the diagnostic stream is
/// logged and `CommandFailed` returned so the runner can mark the file failed
/// and continue.
pub fn run_ffmpeg(config: &ConversionConfig, args: &[String]) -> CoreResult<()> {
    let name = config.ffmpeg_path.display().to_string();
    log::debug!("Running: {name} {}", args.join(" "));

    let output = Command::new(&config.ffmpeg_path)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| CoreError::CommandStart(name.clone(), e))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines().rev().take(5).collect::<Vec<_>>().into_iter().rev() {
            log::error!("ffmpeg: {line}");
        }
        Err(CoreError::CommandFailed(
            name,
            output.status.code().unwrap_or(-1),
        ))
    }
}

/// Gets the size of a file in bytes.
pub fn get_file_size(path: &Path) -> CoreResult<u64> {
    Ok(std::fs::metadata(path)?.len())
}
