//! Core types shared by the registry, dispatcher and parsers

pub mod blob;
pub mod mime;
pub mod record;

pub use blob::Blob;
pub use mime::MimeType;
pub use record::{Metadata, Record};
