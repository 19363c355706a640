//! Conversion configuration structures and constants.
//!
//! This module defines the typed configuration record shared read-only across
//! all file conversions in a run. Construction is validated up front so that
//! invalid codec/quality combinations are rejected before any encoder is
//! spawned rather than at use.

use crate::error::{CoreError, CoreResult};

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default target bitrate used when neither a bitrate nor a CRF is given.
pub const DEFAULT_BITRATE: &str = "1000k";

/// Default CRF value for quality-based encoding.
/// Lower values produce higher quality but larger files.
pub const DEFAULT_CRF: u8 = 23;

/// Default encoder preset (speed/quality trade-off).
pub const DEFAULT_PRESET: &str = "medium";

/// Default audio bitrate used when the audio stream is kept.
pub const DEFAULT_AUDIO_BITRATE: &str = "128k";

/// Video codecs supported by the pipeline, mapped onto ffmpeg encoder names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    H264,
    Hevc,
    Vp9,
    Av1,
}

impl Codec {
    /// Returns the ffmpeg encoder name for this codec.
    #[must_use]
    pub fn encoder_name(self) -> &'static str {
        match self {
            Codec::H264 => "libx264",
            Codec::Hevc => "libx265",
            Codec::Vp9 => "libvpx-vp9",
            Codec::Av1 => "libaom-av1",
        }
    }

    /// Short label used in derived output file names.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Codec::H264 => "h264",
            Codec::Hevc => "hevc",
            Codec::Vp9 => "vp9",
            Codec::Av1 => "av1",
        }
    }
}

impl FromStr for Codec {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "h264" | "x264" | "avc" => Ok(Codec::H264),
            "h265" | "x265" | "hevc" => Ok(Codec::Hevc),
            "vp9" => Ok(Codec::Vp9),
            "av1" => Ok(Codec::Av1),
            other => Err(CoreError::InvalidConfig(format!(
                "Unsupported codec '{other}' (expected h264, hevc, vp9, or av1)"
            ))),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rate control mode: explicit bitrate targeting or constant-quality CRF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quality {
    /// Target bitrate with a unit suffix, e.g. "1000k".
    Bitrate(String),
    /// Constant rate factor.
    Crf(u8),
}

/// Output resolution: keep the source as-is or scale to a fixed height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Original,
    Height(u32),
}

impl FromStr for Resolution {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        if s.eq_ignore_ascii_case("original") {
            return Ok(Resolution::Original);
        }
        s.trim_end_matches('p')
            .parse::<u32>()
            .ok()
            .filter(|h| *h > 0)
            .map(Resolution::Height)
            .ok_or_else(|| {
                CoreError::InvalidConfig(format!(
                    "Invalid resolution '{s}' (expected a height like 720 or 'original')"
                ))
            })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Original => f.write_str("original"),
            Resolution::Height(h) => write!(f, "{h}p"),
        }
    }
}

/// Main configuration for a conversion run.
///
/// Created by the consumer of the library (e.g. vidpress-cli), validated once,
/// and then shared read-only across all file conversions in the run.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Target video codec.
    pub codec: Codec,

    /// Rate control mode (bitrate or CRF).
    pub quality: Quality,

    /// Encoder preset string passed through to ffmpeg.
    pub preset: String,

    /// Output resolution.
    pub resolution: Resolution,

    /// Whether to re-encode the audio stream (true) or drop it (false).
    pub keep_audio: bool,

    /// Whether to run a two-pass encode (analysis pass + encoding pass).
    /// Only meaningful in bitrate mode.
    pub two_pass: bool,

    /// Optional thread-count hint for the encoder.
    pub threads: Option<u32>,

    /// Path or name of the ffmpeg binary to invoke.
    pub ffmpeg_path: PathBuf,
}

impl ConversionConfig {
    /// Creates a configuration with defaults for everything except the codec.
    #[must_use]
    pub fn new(codec: Codec) -> Self {
        Self {
            codec,
            quality: Quality::Bitrate(DEFAULT_BITRATE.to_string()),
            preset: DEFAULT_PRESET.to_string(),
            resolution: Resolution::Original,
            keep_audio: true,
            two_pass: false,
            threads: None,
            ffmpeg_path: PathBuf::from("ffmpeg"),
        }
    }

    /// Validates the configuration, rejecting combinations the pipeline
    /// cannot honor.
    pub fn validate(&self) -> CoreResult<()> {
        match &self.quality {
            Quality::Bitrate(rate) => {
                if rate.is_empty() {
                    return Err(CoreError::InvalidConfig(
                        "Bitrate must not be empty".to_string(),
                    ));
                }
            }
            Quality::Crf(crf) => {
                if *crf > 63 {
                    return Err(CoreError::InvalidConfig(format!(
                        "CRF value {crf} is out of range (0-63)"
                    )));
                }
                if self.two_pass {
                    return Err(CoreError::InvalidConfig(
                        "Two-pass encoding requires bitrate mode, not CRF".to_string(),
                    ));
                }
            }
        }

        if self.preset.is_empty() {
            return Err(CoreError::InvalidConfig(
                "Preset must not be empty".to_string(),
            ));
        }

        if let Resolution::Height(h) = self.resolution {
            if h == 0 {
                return Err(CoreError::InvalidConfig(
                    "Resolution height must be greater than zero".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// True when the run should perform an analysis pass followed by an
    /// encoding pass. Two-pass only applies to bitrate-targeted encodes.
    #[must_use]
    pub fn uses_two_pass(&self) -> bool {
        self.two_pass && matches!(self.quality, Quality::Bitrate(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_parsing() {
        assert_eq!("h264".parse::<Codec>().unwrap(), Codec::H264);
        assert_eq!("HEVC".parse::<Codec>().unwrap(), Codec::Hevc);
        assert_eq!("h265".parse::<Codec>().unwrap(), Codec::Hevc);
        assert_eq!("vp9".parse::<Codec>().unwrap(), Codec::Vp9);
        assert_eq!("av1".parse::<Codec>().unwrap(), Codec::Av1);
        assert!("mpeg2".parse::<Codec>().is_err());
    }

    #[test]
    fn test_resolution_parsing() {
        assert_eq!("original".parse::<Resolution>().unwrap(), Resolution::Original);
        assert_eq!("720".parse::<Resolution>().unwrap(), Resolution::Height(720));
        assert_eq!("1080p".parse::<Resolution>().unwrap(), Resolution::Height(1080));
        assert!("0".parse::<Resolution>().is_err());
        assert!("tall".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_validate_defaults() {
        let config = ConversionConfig::new(Codec::H264);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_crf_two_pass() {
        let mut config = ConversionConfig::new(Codec::H264);
        config.quality = Quality::Crf(23);
        config.two_pass = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_crf() {
        let mut config = ConversionConfig::new(Codec::Vp9);
        config.quality = Quality::Crf(64);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_bitrate() {
        let mut config = ConversionConfig::new(Codec::H264);
        config.quality = Quality::Bitrate(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_uses_two_pass_only_in_bitrate_mode() {
        let mut config = ConversionConfig::new(Codec::H264);
        config.two_pass = true;
        assert!(config.uses_two_pass());

        config.quality = Quality::Crf(23);
        assert!(!config.uses_two_pass());
    }
}
