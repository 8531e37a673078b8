//! universal-loader: MIME-type dispatched document loading
//!
//! Given a file path, the loader guesses the file's MIME type, picks the parser
//! registered for it (or a fallback parser) and returns the parsed content as
//! uniform [`Record`]s: text plus a metadata map.
//!
//! ```no_run
//! use universal_loader::UniversalLoader;
//!
//! let loader = UniversalLoader::new("reports/q3.docx")?;
//! for record in loader.load()? {
//!     println!("{}", record.content());
//! }
//! # Ok::<(), universal_loader::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod ingestion;
pub mod types;

pub use config::LoaderConfig;
pub use error::{Error, Result};
pub use ingestion::{
    parsers, BlobParser, ExtensionGuesser, FileSystemBlobLoader, Format, MimeTypeDispatcher,
    MimeTypeGuesser, ParserRegistry, UniversalLoader,
};
pub use types::{Blob, Metadata, MimeType, Record};
