//! Input discovery: expanding glob patterns into conversion candidates.
//!
//! Patterns arrive as a single comma-separated string ("in/*.mp4,extra/clip.mkv").
//! Each pattern is expanded with the glob crate; existing regular files with a
//! supported video extension are collected, deduplicated, and returned in
//! first-seen order. Files with unsupported extensions are logged and skipped,
//! never treated as errors.

use crate::error::{CoreError, CoreResult};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// File extensions the pipeline accepts as video inputs (case-insensitive).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "webm", "flv", "m4v"];

/// Checks whether the path carries a supported video extension.
#[must_use]
pub fn is_supported_video(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext_str| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| ext_str.eq_ignore_ascii_case(s))
        })
        .unwrap_or(false)
}

/// Expands comma-separated glob patterns into a deduplicated list of existing
/// video files.
///
/// Returns `CoreError::NoFilesFound` if nothing survives resolution, which the
/// caller treats as fatal before any work starts.
pub fn resolve_inputs(patterns: &str) -> CoreResult<Vec<PathBuf>> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files: Vec<PathBuf> = Vec::new();

    for pattern in patterns.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let entries = glob::glob(pattern)
            .map_err(|e| CoreError::InvalidPattern(pattern.to_string(), e))?;

        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("Skipping unreadable match for '{pattern}': {e}");
                    continue;
                }
            };

            if !path.is_file() {
                continue;
            }

            if !is_supported_video(&path) {
                log::warn!("Skipping unsupported file format: {}", path.display());
                continue;
            }

            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        log::info!("Resolved {} input file(s)", files.len());
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_video() {
        assert!(is_supported_video(Path::new("clip.mp4")));
        assert!(is_supported_video(Path::new("clip.MKV")));
        assert!(is_supported_video(Path::new("clip.WebM")));
        assert!(is_supported_video(Path::new("clip.m4v")));
        assert!(!is_supported_video(Path::new("clip.txt")));
        assert!(!is_supported_video(Path::new("clip.srt")));
        assert!(!is_supported_video(Path::new("clip")));
    }
}
