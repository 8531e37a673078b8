//! Configuration for the loader and its default parsers

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable overriding the pandoc binary used for RTF
pub const PANDOC_ENV: &str = "UNIVERSAL_LOADER_PANDOC";

/// Main loader configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// CSV parser configuration
    #[serde(default)]
    pub csv: CsvConfig,
    /// Markdown parser configuration
    #[serde(default)]
    pub markdown: MarkdownConfig,
    /// RTF parser configuration
    #[serde(default)]
    pub rtf: RtfConfig,
    /// PowerPoint parser configuration
    #[serde(default)]
    pub powerpoint: PowerPointConfig,
}

impl LoaderConfig {
    /// Load configuration from a TOML file; missing sections take defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&raw)?;
        config.apply_env();
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded loader configuration");
        Ok(config)
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self) {
        if let Ok(pandoc) = std::env::var(PANDOC_ENV) {
            if !pandoc.trim().is_empty() {
                self.rtf.pandoc_path = PathBuf::from(pandoc);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.csv.delimiter.is_ascii() {
            return Err(Error::config(format!(
                "csv.delimiter must be a single ASCII character, got {:?}",
                self.csv.delimiter
            )));
        }
        if self.powerpoint.legacy_preview_bytes == 0 {
            return Err(Error::config("powerpoint.legacy_preview_bytes must be greater than 0"));
        }
        Ok(())
    }
}

/// CSV parser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvConfig {
    /// Field delimiter for both reading and re-serializing (default: ',')
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Treat the first row as a header row (default: true)
    #[serde(default = "default_has_headers")]
    pub has_headers: bool,
}

fn default_delimiter() -> char { ',' }
fn default_has_headers() -> bool { true }

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_headers: true,
        }
    }
}

/// Markdown parser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Render GitHub-style tables (default: true)
    #[serde(default = "default_true")]
    pub tables: bool,
    /// Render ~~strikethrough~~ (default: false)
    #[serde(default)]
    pub strikethrough: bool,
}

fn default_true() -> bool { true }

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: false,
        }
    }
}

/// RTF parser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtfConfig {
    /// pandoc binary, looked up on PATH when relative (default: "pandoc")
    #[serde(default = "default_pandoc_path")]
    pub pandoc_path: PathBuf,
}

fn default_pandoc_path() -> PathBuf { PathBuf::from("pandoc") }

impl Default for RtfConfig {
    fn default() -> Self {
        Self {
            pandoc_path: default_pandoc_path(),
        }
    }
}

/// PowerPoint parser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerPointConfig {
    /// Bytes read from a legacy .ppt file by the raw fallback (default: 1024)
    #[serde(default = "default_legacy_preview_bytes")]
    pub legacy_preview_bytes: usize,
}

fn default_legacy_preview_bytes() -> usize { 1024 }

impl Default for PowerPointConfig {
    fn default() -> Self {
        Self {
            legacy_preview_bytes: default_legacy_preview_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::default();
        assert_eq!(config.csv.delimiter, ',');
        assert!(config.csv.has_headers);
        assert_eq!(config.powerpoint.legacy_preview_bytes, 1024);
        assert_eq!(config.rtf.pandoc_path, PathBuf::from("pandoc"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config: LoaderConfig = toml::from_str(
            r#"
            [csv]
            delimiter = ";"

            [powerpoint]
            legacy_preview_bytes = 512
            "#,
        )
        .unwrap();

        assert_eq!(config.csv.delimiter, ';');
        assert!(config.csv.has_headers);
        assert_eq!(config.powerpoint.legacy_preview_bytes, 512);
        assert!(config.markdown.tables);
    }

    #[test]
    fn test_from_file_rejects_zero_preview() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[powerpoint]\nlegacy_preview_bytes = 0").unwrap();

        let err = LoaderConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[csv\ndelimiter = ").unwrap();

        assert!(matches!(
            LoaderConfig::from_file(file.path()),
            Err(Error::Toml(_))
        ));
    }
}
