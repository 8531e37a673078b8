//! Loader facade: the single entry point for loading one file

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::LoaderConfig;
use crate::error::{Error, Result};
use crate::types::{MimeType, Record};

use super::blob_loader::FileSystemBlobLoader;
use super::dispatcher::{MimeTypeDispatcher, MimeTypeGuesser};
use super::parsers::{BlobParser, TextParser};
use super::registry::ParserRegistry;

/// Loads one file through MIME-type dispatch.
///
/// The path is validated once, at construction. Each loader owns its own
/// registry, so [`add_handler`](Self::add_handler) on one instance never
/// affects another.
#[derive(Clone)]
pub struct UniversalLoader {
    file_path: PathBuf,
    dispatcher: MimeTypeDispatcher,
}

impl UniversalLoader {
    /// Loader with the default parsers and the plain text fallback
    pub fn new(file_path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_config(file_path, &LoaderConfig::default())
    }

    /// Loader whose default parsers are built from `config`
    pub fn with_config(file_path: impl Into<PathBuf>, config: &LoaderConfig) -> Result<Self> {
        Self::build(file_path.into(), config, Arc::new(TextParser::new()))
    }

    /// Loader with a custom parser for unregistered MIME types
    pub fn with_fallback(
        file_path: impl Into<PathBuf>,
        fallback: Arc<dyn BlobParser>,
    ) -> Result<Self> {
        Self::build(file_path.into(), &LoaderConfig::default(), fallback)
    }

    fn build(file_path: PathBuf, config: &LoaderConfig, fallback: Arc<dyn BlobParser>) -> Result<Self> {
        if !file_path.is_file() {
            return Err(Error::FileNotFound(file_path));
        }

        let registry = ParserRegistry::with_defaults(config);
        Ok(Self {
            file_path,
            dispatcher: MimeTypeDispatcher::new(registry, fallback),
        })
    }

    /// Replace the MIME type guesser
    pub fn with_guesser(mut self, guesser: Arc<dyn MimeTypeGuesser>) -> Self {
        self.dispatcher = self.dispatcher.with_guesser(guesser);
        self
    }

    /// Parse the file. Fails with [`Error::NoBlobs`] when the file can no
    /// longer be resolved; parser errors are returned unchanged.
    pub fn load(&self) -> Result<Vec<Record>> {
        let blobs = FileSystemBlobLoader::new(&self.file_path)
            .with_guesser(self.dispatcher.guesser())
            .yield_blobs()?;

        let Some(blob) = blobs.into_iter().next() else {
            return Err(Error::NoBlobs(self.file_path.clone()));
        };

        let parser = self.dispatcher.resolve(&blob);
        let records = parser.parse(&blob)?;

        tracing::info!(
            path = %self.file_path.display(),
            mimetype = ?blob.mimetype().map(MimeType::as_str),
            parser = parser.name(),
            records = records.len(),
            "Loaded file"
        );
        Ok(records)
    }

    /// Register `parser` for `mimetype`, replacing any existing entry.
    /// Later [`load`](Self::load) calls on this loader use it.
    pub fn add_handler(&mut self, mimetype: impl Into<MimeType>, parser: Arc<dyn BlobParser>) {
        self.dispatcher.registry_mut().register(mimetype, parser);
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn registry(&self) -> &ParserRegistry {
        self.dispatcher.registry()
    }
}
