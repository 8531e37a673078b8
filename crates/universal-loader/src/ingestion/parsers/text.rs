use crate::error::Result;
use crate::types::{Blob, Record};

use super::BlobParser;

/// Plain text parser; also the default fallback for unknown MIME types.
///
/// Content must be valid UTF-8, otherwise parsing fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextParser;

impl TextParser {
    pub fn new() -> Self {
        Self
    }
}

impl BlobParser for TextParser {
    fn parse(&self, blob: &Blob) -> Result<Vec<Record>> {
        let content = blob.as_string()?;
        tracing::debug!(source = %blob.source(), chars = content.len(), "Parsed plain text");
        Ok(vec![Record::new(content).with_source(blob.path())])
    }

    fn name(&self) -> &'static str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_text_parser() {
        let blob = Blob::from_data(b"line one\nline two".to_vec(), "notes.txt");
        let records = TextParser::new().parse(&blob).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content(), "line one\nline two");
        assert_eq!(records[0].source(), Some("notes.txt"));
    }

    #[test]
    fn test_text_parser_rejects_invalid_utf8() {
        let blob = Blob::from_data(vec![0x66, 0x6f, 0xff, 0x6f], "notes.bin");
        assert!(matches!(
            TextParser::new().parse(&blob),
            Err(Error::FileParse { .. })
        ));
    }
}
