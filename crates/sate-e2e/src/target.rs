//! Resolution of the page under test.
//!
//! The exam page is a static `index.html` that usually lives somewhere on
//! the tester's disk, so the target may be given either as a URL or as a
//! filesystem path. Paths become absolute `file://` URLs.

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// A target that Chrome can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamTarget {
    url: String,
}

impl ExamTarget {
    /// Parses a URL or filesystem path.
    ///
    /// URLs with a scheme (`file:`, `http:`, `https:`, `about:`, `data:`) are
    /// taken as-is. Windows drive paths (`C:/exams/index.html`) and everything
    /// else are treated as paths; relative paths are resolved against the
    /// working directory and must exist.
    ///
    /// # Errors
    ///
    /// Fails on an empty target or a path that does not exist.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::MissingField {
                field: "target".to_string(),
                hint: "Pass --target <URL_OR_PATH>".to_string(),
            });
        }

        if is_windows_drive_path(raw) {
            return Ok(Self {
                url: windows_path_to_url(raw),
            });
        }

        if has_url_scheme(raw) {
            return Ok(Self {
                url: raw.to_string(),
            });
        }

        let path = absolutize(Path::new(raw))?;
        if !path.exists() {
            return Err(ConfigError::InvalidValue {
                field: "target".to_string(),
                value: path.display().to_string(),
                hint: "The exam page file does not exist; check the path or pass a URL".to_string(),
            });
        }

        let text = path.to_string_lossy();
        let url = if is_windows_drive_path(&text) {
            windows_path_to_url(&text)
        } else {
            unix_path_to_url(&path)
        };
        Ok(Self { url })
    }

    /// The URL to navigate to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

fn has_url_scheme(raw: &str) -> bool {
    let Some((scheme, _)) = raw.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn is_windows_drive_path(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && matches!(bytes[2], b'/' | b'\\')
}

fn absolutize(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| ConfigError::InvalidValue {
        field: "target".to_string(),
        value: path.display().to_string(),
        hint: format!("Cannot resolve a relative path without a working directory: {e}"),
    })?;
    Ok(cwd.join(path))
}

fn encode_segments<'a>(segments: impl Iterator<Item = &'a str>) -> String {
    segments
        .map(|s| urlencoding::encode(s).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn unix_path_to_url(path: &Path) -> String {
    let text = path.to_string_lossy();
    format!("file://{}", encode_segments(text.split('/')))
}

fn windows_path_to_url(raw: &str) -> String {
    let normalized = raw.replace('\\', "/");
    let (drive, rest) = normalized.split_at(2);
    format!("file:///{drive}{}", encode_segments(rest.split('/')))
}
