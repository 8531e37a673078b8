//! MIME-type dispatch: pick the registered parser for a blob, or the fallback

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{Blob, MimeType, Record};

use super::parsers::{BlobParser, TextParser};
use super::registry::ParserRegistry;

/// Guesses a MIME type from a path
#[cfg_attr(test, mockall::automock)]
pub trait MimeTypeGuesser: Send + Sync {
    fn guess(&self, path: &Path) -> Option<MimeType>;
}

/// Extension-based guessing through [`MimeType::guess_from_path`]
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtensionGuesser;

impl MimeTypeGuesser for ExtensionGuesser {
    fn guess(&self, path: &Path) -> Option<MimeType> {
        MimeType::guess_from_path(path)
    }
}

/// Routes each blob to the parser registered for its MIME type.
///
/// Blobs with no MIME type, or one nobody registered, go to the fallback
/// parser. Resolution never fails.
#[derive(Clone)]
pub struct MimeTypeDispatcher {
    registry: ParserRegistry,
    fallback: Arc<dyn BlobParser>,
    guesser: Arc<dyn MimeTypeGuesser>,
}

impl MimeTypeDispatcher {
    /// Dispatcher over `registry` falling back to `fallback`
    pub fn new(registry: ParserRegistry, fallback: Arc<dyn BlobParser>) -> Self {
        Self {
            registry,
            fallback,
            guesser: Arc::new(ExtensionGuesser),
        }
    }

    /// Dispatcher with the plain text parser as fallback
    pub fn with_text_fallback(registry: ParserRegistry) -> Self {
        Self::new(registry, Arc::new(TextParser::new()))
    }

    /// Replace the MIME type guesser used for blobs that carry no type
    pub fn with_guesser(mut self, guesser: Arc<dyn MimeTypeGuesser>) -> Self {
        self.guesser = guesser;
        self
    }

    /// Parser for `blob`: its recorded MIME type first, then a guess from
    /// its path, then the fallback
    pub fn resolve(&self, blob: &Blob) -> Arc<dyn BlobParser> {
        let mimetype = blob
            .mimetype()
            .cloned()
            .or_else(|| self.guesser.guess(blob.path()));

        match mimetype.as_ref().and_then(|m| self.registry.lookup(m.as_str())) {
            Some(parser) => {
                tracing::debug!(
                    source = %blob.source(),
                    mimetype = %mimetype.as_ref().map(MimeType::as_str).unwrap_or_default(),
                    parser = parser.name(),
                    "Dispatching to registered parser"
                );
                parser
            }
            None => {
                tracing::debug!(
                    source = %blob.source(),
                    mimetype = ?mimetype,
                    parser = self.fallback.name(),
                    "No parser registered, using fallback"
                );
                Arc::clone(&self.fallback)
            }
        }
    }

    /// Parse `blob` with the resolved parser; parser errors pass through
    pub fn parse(&self, blob: &Blob) -> Result<Vec<Record>> {
        self.resolve(blob).parse(blob)
    }

    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ParserRegistry {
        &mut self.registry
    }

    pub fn fallback(&self) -> &Arc<dyn BlobParser> {
        &self.fallback
    }

    pub fn guesser(&self) -> Arc<dyn MimeTypeGuesser> {
        Arc::clone(&self.guesser)
    }
}
