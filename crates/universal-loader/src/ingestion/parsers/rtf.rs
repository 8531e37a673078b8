use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::RtfConfig;
use crate::error::{Error, Result};
use crate::types::{Blob, Record};

use super::BlobParser;

const TOOL: &str = "pandoc";

/// RTF document loader that shells out to pandoc for the plain-text conversion.
///
/// Blobs held in memory are written to a temporary `.rtf` file first; blobs
/// backed by a file are handed to pandoc by path.
#[derive(Debug, Clone)]
pub struct PandocRtfLoader {
    pandoc_path: PathBuf,
}

impl PandocRtfLoader {
    pub fn new(pandoc_path: impl Into<PathBuf>) -> Self {
        Self {
            pandoc_path: pandoc_path.into(),
        }
    }

    pub fn from_config(config: &RtfConfig) -> Self {
        Self::new(config.pandoc_path.clone())
    }

    pub fn pandoc_path(&self) -> &Path {
        &self.pandoc_path
    }

    pub fn load(&self, blob: &Blob) -> Result<Vec<Record>> {
        let text = match blob.data() {
            Some(data) => {
                let mut input = tempfile::Builder::new().suffix(".rtf").tempfile()?;
                input.write_all(data)?;
                input.flush()?;
                self.convert(input.path())?
            }
            None => self.convert(blob.path())?,
        };

        Ok(vec![Record::new(text.trim_end()).with_source(blob.path())])
    }

    fn convert(&self, input: &Path) -> Result<String> {
        let output = Command::new(&self.pandoc_path)
            .args(["-f", "rtf", "-t", "plain", "--wrap=none"])
            .arg(input)
            .output()
            .map_err(|e| {
                Error::external_tool(TOOL, format!("{}: {}", self.pandoc_path.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::external_tool(TOOL, stderr.trim()));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        if text.trim().is_empty() {
            return Err(Error::external_tool(TOOL, "pandoc produced no output"));
        }

        tracing::debug!(input = %input.display(), chars = text.len(), "Converted RTF with pandoc");
        Ok(text)
    }
}

impl Default for PandocRtfLoader {
    fn default() -> Self {
        Self::from_config(&RtfConfig::default())
    }
}

/// RTF parser: delegates to [`PandocRtfLoader`] and re-yields its records.
#[derive(Debug, Clone, Default)]
pub struct RtfParser {
    loader: PandocRtfLoader,
}

impl RtfParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RtfConfig) -> Self {
        Self {
            loader: PandocRtfLoader::from_config(config),
        }
    }
}

impl BlobParser for RtfParser {
    fn parse(&self, blob: &Blob) -> Result<Vec<Record>> {
        self.loader.load(blob)
    }

    fn name(&self) -> &'static str {
        "rtf"
    }
}
