//! Error types for the loader

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for loader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Loader errors
#[derive(Debug, Error)]
pub enum Error {
    /// The path handed to the loader is not an existing file
    #[error("File does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    /// No blob could be resolved for the path at load time
    #[error("No blobs found at: {}", .0.display())]
    NoBlobs(PathBuf),

    /// File parsing error
    #[error("Failed to parse file '{filename}': {message}")]
    FileParse { filename: String, message: String },

    /// External tool (pandoc) missing or failing
    #[error("External tool '{tool}' failed: {message}")]
    ExternalTool { tool: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader/writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// RFC 822 mail parsing error
    #[error("Mail parse error: {0}")]
    Mail(#[from] mailparse::MailParseError),

    /// Office Open XML container error
    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error inside an Office Open XML part
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// TOML configuration error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a file parse error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an external tool error
    pub fn external_tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
