//! MIME type to parser registry

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::LoaderConfig;
use crate::types::MimeType;

use super::format::Format;
use super::parsers::BlobParser;

/// Registry of parsers keyed by exact MIME type.
///
/// At most one parser per MIME type; registering again replaces the previous
/// entry. Lookups never normalize the key.
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: HashMap<MimeType, Arc<dyn BlobParser>>,
}

impl ParserRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with a parser for every [`Format`]
    pub fn with_defaults(config: &LoaderConfig) -> Self {
        let mut registry = Self::new();
        for format in Format::ALL {
            registry.register(format.mimetype(), format.parser(config));
        }
        registry
    }

    /// Register `parser` for `mimetype`, returning the parser it replaced
    pub fn register(
        &mut self,
        mimetype: impl Into<MimeType>,
        parser: Arc<dyn BlobParser>,
    ) -> Option<Arc<dyn BlobParser>> {
        let mimetype = mimetype.into();
        tracing::debug!(mimetype = %mimetype, parser = parser.name(), "Registering parser");
        self.parsers.insert(mimetype, parser)
    }

    pub fn lookup(&self, mimetype: &str) -> Option<Arc<dyn BlobParser>> {
        self.parsers.get(mimetype).cloned()
    }

    pub fn contains(&self, mimetype: &str) -> bool {
        self.parsers.contains_key(mimetype)
    }

    /// Registered MIME types, sorted
    pub fn mimetypes(&self) -> Vec<&MimeType> {
        let mut mimetypes: Vec<_> = self.parsers.keys().collect();
        mimetypes.sort();
        mimetypes
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.mimetypes()
                    .into_iter()
                    .filter_map(|m| self.parsers.get(m).map(|p| (m.as_str(), p.name()))),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::MockBlobParser;

    fn named_mock(name: &'static str) -> Arc<dyn BlobParser> {
        let mut parser = MockBlobParser::new();
        parser.expect_name().return_const(name);
        Arc::new(parser)
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = ParserRegistry::new();
        assert!(registry.register("text/x-custom", named_mock("first")).is_none());

        let replaced = registry.register("text/x-custom", named_mock("second"));
        assert_eq!(replaced.map(|p| p.name()), Some("first"));
        assert_eq!(registry.lookup("text/x-custom").unwrap().name(), "second");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_exact_match_only() {
        let mut registry = ParserRegistry::new();
        registry.register("text/csv", named_mock("csv"));

        assert!(registry.contains("text/csv"));
        assert!(registry.lookup("text/CSV").is_none());
        assert!(registry.lookup("text/csv; charset=utf-8").is_none());
        assert!(registry.lookup("text/").is_none());
    }

    #[test]
    fn test_defaults_cover_every_format() {
        let registry = ParserRegistry::with_defaults(&LoaderConfig::default());

        assert_eq!(registry.len(), Format::ALL.len());
        for format in Format::ALL {
            assert!(registry.contains(format.mimetype()), "missing {}", format);
        }
        assert_eq!(registry.lookup("message/rfc822").unwrap().name(), "eml");
        assert_eq!(
            registry.lookup("application/vnd.ms-outlook").unwrap().name(),
            "outlook_msg"
        );
    }

    #[test]
    fn test_mimetypes_sorted() {
        let registry = ParserRegistry::with_defaults(&LoaderConfig::default());
        let mimetypes = registry.mimetypes();
        assert!(mimetypes.windows(2).all(|w| w[0] <= w[1]));
        assert!(format!("{:?}", registry).contains("text/plain"));
    }
}
