//! Error types for mobiconvert operations.

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// Errors that can occur while loading, extracting, packaging or dumping a document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Corrupt data: {0}")]
    CorruptData(String),

    #[error("Parsing document failed: {0}")]
    Parse(String),

    #[error("Could not initialize zip archive: {0}")]
    ArchiveInit(#[source] TryReserveError),

    #[error("Could not add file to archive: {path}")]
    EntryWrite {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Could not finalize zip archive: {0}")]
    Finalize(#[source] io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("{0} not found")]
    NotFound(&'static str),
}

/// Pipeline stage an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading input or writing dumps failed.
    Io,
    /// The provider does not handle this document.
    FormatUnsupported,
    /// The provider rejected the document bytes.
    CorruptData,
    /// The provider could not split the document into parts.
    Parse,
    /// The output buffer could not be allocated.
    ArchiveInit,
    /// An entry could not be written.
    EntryWrite,
    /// The archive could not be finalized.
    Finalize,
    /// An existing archive failed inspection.
    Inspect,
    /// A requested item is absent from the document.
    NotFound,
}

impl Error {
    /// Stage-level category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::UnsupportedFormat(_) => ErrorKind::FormatUnsupported,
            Error::CorruptData(_) => ErrorKind::CorruptData,
            Error::Parse(_) => ErrorKind::Parse,
            Error::ArchiveInit(_) => ErrorKind::ArchiveInit,
            Error::EntryWrite { .. } => ErrorKind::EntryWrite,
            Error::Finalize(_) => ErrorKind::Finalize,
            Error::Zip(_) | Error::Xml(_) => ErrorKind::Inspect,
            Error::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
