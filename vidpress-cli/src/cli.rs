// vidpress-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Vidpress: batch video conversion tool",
    long_about = "Converts batches of video files with ffmpeg and reports per-file statistics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts video files matching the input pattern into an output directory
    Convert(ConvertArgs),
}

/// Rate-control selection for the conversion.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityMode {
    /// Target an explicit bitrate (enables two-pass)
    Bitrate,
    /// Constant-quality encoding via CRF
    Quality,
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Comma-separated glob pattern(s) selecting input video files
    #[arg(required = true, value_name = "INPUT_PATTERN")]
    pub input: String,

    /// Directory where converted files and reports will be saved
    #[arg(required = true, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Target video codec (h264, hevc, vp9, av1)
    #[arg(long, value_name = "CODEC", default_value = "h264")]
    pub codec: String,

    /// Target bitrate with unit suffix, used in bitrate mode
    #[arg(long, value_name = "RATE", default_value = "1000k")]
    pub bitrate: String,

    /// Rate-control mode
    #[arg(long, value_enum, value_name = "MODE", default_value = "bitrate")]
    pub quality_mode: QualityMode,

    /// CRF value for quality mode (0-63, lower is higher quality; default 23)
    #[arg(long, value_name = "CRF", value_parser = clap::value_parser!(u8).range(0..=63))]
    pub crf: Option<u8>,

    /// Encoder preset passed through to ffmpeg
    #[arg(long, value_name = "PRESET", default_value = "medium")]
    pub preset: String,

    /// Output height in pixels (e.g. 720), or 'original' to keep the source size
    #[arg(long, value_name = "HEIGHT", default_value = "original")]
    pub resolution: String,

    /// Drop the audio stream instead of re-encoding it
    #[arg(long, default_value_t = false)]
    pub no_audio: bool,

    /// Run a two-pass encode (bitrate mode only)
    #[arg(long, default_value_t = false)]
    pub two_pass: bool,

    /// Thread-count hint passed to the encoder
    #[arg(long, value_name = "COUNT")]
    pub threads: Option<u32>,

    /// Path to the ffmpeg binary.
    /// Can also be set via the VIDPRESS_FFMPEG environment variable.
    #[arg(long, value_name = "PATH", env = "VIDPRESS_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,
}
