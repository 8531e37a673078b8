//! MIME type key used by the parser registry

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::path::Path;

const PINNED_EXTENSIONS: &[(&str, &str)] = &[
    ("md", "text/markdown"),
    ("markdown", "text/markdown"),
    ("msg", "application/vnd.ms-outlook"),
    ("eml", "message/rfc822"),
    ("rtf", "application/rtf"),
    ("ppt", "application/vnd.ms-powerpoint"),
];

/// A MIME type string.
///
/// Comparison is exact: no case folding, no parameter stripping and no
/// prefix matching. `text/CSV` and `text/csv` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MimeType(String);

impl MimeType {
    pub fn new(mimetype: impl Into<String>) -> Self {
        Self(mimetype.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Guess from the path's extension. Returns `None` for unknown or
    /// missing extensions.
    ///
    /// A few document extensions are pinned so the guess lines up with the
    /// default registry regardless of the `mime_guess` table version.
    pub fn guess_from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        let pinned = PINNED_EXTENSIONS
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, mime)| Self::new(*mime));
        pinned.or_else(|| mime_guess::from_ext(&ext).first_raw().map(Self::new))
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MimeType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MimeType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MimeType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MimeType {
    fn from(value: String) -> Self {
        Self(value)
    }
}
