use pulldown_cmark::{html, Options, Parser};

use crate::config::MarkdownConfig;
use crate::error::Result;
use crate::types::{Blob, Record};

use super::BlobParser;

/// Markdown parser rendering the document to HTML with `pulldown-cmark`.
///
/// This is the one parser that never fails: unreadable files and invalid
/// UTF-8 produce an empty result and a warning in the log.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    options: Options,
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self::from_config(&MarkdownConfig::default())
    }

    pub fn from_config(config: &MarkdownConfig) -> Self {
        let mut options = Options::empty();
        if config.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if config.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        Self { options }
    }

    fn render(&self, blob: &Blob) -> Result<String> {
        let markdown = blob.as_string()?;
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, Parser::new_ext(&markdown, self.options));
        Ok(out)
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobParser for MarkdownParser {
    fn parse(&self, blob: &Blob) -> Result<Vec<Record>> {
        match self.render(blob) {
            Ok(html) => Ok(vec![Record::new(html).with_source(blob.path())]),
            Err(e) => {
                tracing::warn!(source = %blob.source(), error = %e, "Markdown parsing failed, returning no records");
                Ok(Vec::new())
            }
        }
    }

    fn name(&self) -> &'static str {
        "markdown"
    }
}
