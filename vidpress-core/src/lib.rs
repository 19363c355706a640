//! Core library for batch video conversion using ffmpeg.
//!
//! This crate provides input file discovery from glob patterns, ffmpeg
//! argument construction (including two-pass encoding), sequential per-file
//! conversion with size/time statistics, and run-level report generation.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidpress_core::config::{Codec, ConversionConfig};
//! use std::path::Path;
//!
//! let config = ConversionConfig::new(Codec::H264);
//! config.validate().unwrap();
//!
//! let files = vidpress_core::resolve_inputs("videos/*.mp4").unwrap();
//! let results =
//!     vidpress_core::convert_files(&config, &files, Path::new("converted")).unwrap();
//! ```

pub mod command;
pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod processing;
pub mod reporting;
pub mod utils;

// Re-exports for public API
pub use command::{build_ffmpeg_args, derived_output_path};
pub use config::{Codec, ConversionConfig, Quality, Resolution};
pub use discovery::resolve_inputs;
pub use error::{CoreError, CoreResult};
pub use external::{check_encoder_available, check_ffmpeg};
pub use processing::convert_files;
pub use reporting::{RunReport, write_reports};
pub use utils::{compression_ratio, format_bytes, format_duration};

use serde::Serialize;
use std::path::PathBuf;

/// Outcome of one file's conversion, appended to the run-level list in input
/// order and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub original_size: u64,
    pub converted_size: u64,
    /// Percentage size reduction; 0 when the original size was 0.
    pub compression_ratio: f64,
    pub elapsed_seconds: f64,
    pub success: bool,
}
