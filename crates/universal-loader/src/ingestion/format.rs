//! Known document formats and their default parsers

use std::fmt;
use std::sync::Arc;

use crate::config::LoaderConfig;

use super::parsers::{
    BlobParser, CsvParser, DocxParser, EmlParser, HtmlParser, LegacyPptParser, MarkdownParser,
    OutlookMsgParser, PdfParser, PptxParser, RtfParser, TextParser,
};

/// Formats the loader recognizes out of the box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Text,
    Csv,
    Rtf,
    Markdown,
    OutlookMsg,
    Eml,
    Html,
    Docx,
    Pptx,
    Pdf,
    LegacyPpt,
}

impl Format {
    /// Every known format, in registration order
    pub const ALL: [Format; 11] = [
        Format::Text,
        Format::Csv,
        Format::Rtf,
        Format::Markdown,
        Format::OutlookMsg,
        Format::Eml,
        Format::Html,
        Format::Docx,
        Format::Pptx,
        Format::Pdf,
        Format::LegacyPpt,
    ];

    /// Exact MIME type string this format is registered under
    pub fn mimetype(&self) -> &'static str {
        match self {
            Format::Text => "text/plain",
            Format::Csv => "text/csv",
            Format::Rtf => "application/rtf",
            Format::Markdown => "text/markdown",
            Format::OutlookMsg => "application/vnd.ms-outlook",
            Format::Eml => "message/rfc822",
            Format::Html => "text/html",
            Format::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Format::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            Format::Pdf => "application/pdf",
            Format::LegacyPpt => "application/vnd.ms-powerpoint",
        }
    }

    pub fn from_mimetype(mimetype: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.mimetype() == mimetype)
    }

    /// Fresh default parser for this format
    pub fn parser(&self, config: &LoaderConfig) -> Arc<dyn BlobParser> {
        match self {
            Format::Text => Arc::new(TextParser::new()),
            Format::Csv => Arc::new(CsvParser::from_config(&config.csv)),
            Format::Rtf => Arc::new(RtfParser::from_config(&config.rtf)),
            Format::Markdown => Arc::new(MarkdownParser::from_config(&config.markdown)),
            Format::OutlookMsg => Arc::new(OutlookMsgParser::new()),
            Format::Eml => Arc::new(EmlParser::new()),
            Format::Html => Arc::new(HtmlParser::new()),
            Format::Docx => Arc::new(DocxParser::new()),
            Format::Pptx => Arc::new(PptxParser::new()),
            Format::Pdf => Arc::new(PdfParser::new()),
            Format::LegacyPpt => Arc::new(LegacyPptParser::from_config(&config.powerpoint)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mimetype())
    }
}
