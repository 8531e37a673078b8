//! Format parsers
//!
//! Each parser wraps one external parsing capability (a crate or, for RTF,
//! the pandoc binary) and reshapes its output into [`Record`]s. Parsers do
//! not look at file extensions: the dispatcher picks the variant from the
//! MIME type.

mod csv;
mod docx;
mod email;
mod html;
mod markdown;
mod pdf;
mod powerpoint;
mod rtf;
mod text;

pub use self::csv::CsvParser;
pub use self::docx::{DocxParser, WordDocumentLoader};
pub use self::email::{EmlParser, OutlookMsgParser};
pub use self::html::HtmlParser;
pub use self::markdown::MarkdownParser;
pub use self::pdf::PdfParser;
pub use self::powerpoint::{LegacyPptParser, PptxParser};
pub use self::rtf::{PandocRtfLoader, RtfParser};
pub use self::text::TextParser;

use crate::error::Result;
use crate::types::{Blob, Record};

/// Capability shared by every format parser: turn one blob into records.
///
/// Implement this to plug a custom format in through
/// [`UniversalLoader::add_handler`](crate::UniversalLoader::add_handler).
#[cfg_attr(test, mockall::automock)]
pub trait BlobParser: Send + Sync {
    /// Parse the blob into zero or more records
    fn parse(&self, blob: &Blob) -> Result<Vec<Record>>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
