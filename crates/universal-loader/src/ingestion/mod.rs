//! MIME-type dispatched ingestion: registry, dispatcher, loader facade and parsers

mod blob_loader;
mod dispatcher;
mod format;
mod loader;
pub mod parsers;
mod registry;

pub use blob_loader::FileSystemBlobLoader;
pub use dispatcher::{ExtensionGuesser, MimeTypeDispatcher, MimeTypeGuesser};
pub use format::Format;
pub use loader::UniversalLoader;
pub use parsers::BlobParser;
pub use registry::ParserRegistry;

#[cfg(test)]
pub(crate) use dispatcher::MockMimeTypeGuesser;
#[cfg(test)]
pub(crate) use parsers::MockBlobParser;
