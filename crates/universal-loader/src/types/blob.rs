//! Blob: a read-only handle to one file's content

use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::MimeType;
use crate::error::{Error, Result};

/// Reference to file content: a path plus, optionally, bytes already in memory.
///
/// Parsers only read from a blob. When no bytes were preloaded, every read
/// opens the file and closes it again before returning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    path: PathBuf,
    data: Option<Vec<u8>>,
    mimetype: Option<MimeType>,
}

impl Blob {
    /// Blob backed by a file on disk
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: None,
            mimetype: None,
        }
    }

    /// Blob with in-memory content; `path` is kept for dispatch and metadata
    pub fn from_data(data: impl Into<Vec<u8>>, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: Some(data.into()),
            mimetype: None,
        }
    }

    pub fn with_mimetype(mut self, mimetype: MimeType) -> Self {
        self.mimetype = Some(mimetype);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path rendered for metadata and error messages
    pub fn source(&self) -> String {
        self.path.display().to_string()
    }

    /// MIME type recorded when the blob was yielded, if any
    pub fn mimetype(&self) -> Option<&MimeType> {
        self.mimetype.as_ref()
    }

    /// Preloaded bytes, if the blob was built from memory
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Whole content as bytes
    pub fn as_bytes(&self) -> Result<Cow<'_, [u8]>> {
        match &self.data {
            Some(data) => Ok(Cow::Borrowed(data.as_slice())),
            None => Ok(Cow::Owned(std::fs::read(&self.path)?)),
        }
    }

    /// Whole content decoded as strict UTF-8
    pub fn as_string(&self) -> Result<String> {
        let bytes = self.as_bytes()?.into_owned();
        String::from_utf8(bytes).map_err(|e| Error::file_parse(self.source(), e.to_string()))
    }

    /// At most `limit` leading bytes; reads no further than that from disk
    pub fn read_prefix(&self, limit: usize) -> Result<Vec<u8>> {
        if let Some(data) = &self.data {
            return Ok(data[..data.len().min(limit)].to_vec());
        }

        let file = File::open(&self.path)?;
        let mut prefix = Vec::with_capacity(limit);
        file.take(limit as u64).read_to_end(&mut prefix)?;
        Ok(prefix)
    }
}
