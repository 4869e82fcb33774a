//! Document model providers.
//!
//! Parsing the binary container (record table, text decompression, EXTH,
//! hybrid splitting) is the job of a [`DocumentProvider`]. This crate only
//! consumes its results through two traits:
//!
//! - [`DocumentProvider::load`] turns raw bytes into a [`Document`] handle.
//! - [`Document::parts`] splits the document into markup, flow and resources.
//!
//! Releasing the handle is `Drop`: the conversion pipeline owns the document
//! for one call and drops it on every exit path.

mod dir;

pub use dir::PartsDirectory;

use crate::error::{Error, Result};
use crate::model::{Parts, Record};

/// Which half of a hybrid KF7/KF8 file the provider should parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HybridPart {
    /// The KF8 (AZW3) part.
    #[default]
    Kf8,
    /// The legacy KF7 (MOBI) part.
    Kf7,
}

/// Options handed to [`DocumentProvider::load`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub hybrid: HybridPart,
}

impl LoadOptions {
    pub fn with_hybrid(mut self, hybrid: HybridPart) -> Self {
        self.hybrid = hybrid;
        self
    }
}

/// Loads raw container bytes into a [`Document`].
pub trait DocumentProvider {
    type Document: Document;

    /// Load a document.
    ///
    /// Errors are [`Error::Io`], [`Error::UnsupportedFormat`] or
    /// [`Error::CorruptData`]. No handle exists after a failure.
    fn load(&self, data: &[u8], options: &LoadOptions) -> Result<Self::Document>;
}

/// A loaded document handle.
///
/// Only [`Document::parts`] is required; the remaining accessors back the
/// file-system dumps and default to "absent".
pub trait Document {
    /// Split the document into its three part sequences.
    ///
    /// Fails with [`Error::Parse`].
    fn parts(&self) -> Result<Parts>;

    /// Print Replica documents wrap PDF pages and cannot become EPUB.
    fn is_replica(&self) -> bool {
        false
    }

    /// Raw records of the container, in file order.
    fn records(&self) -> &[Record] {
        &[]
    }

    /// All text records, decompressed and concatenated.
    fn rawml(&self) -> Result<Vec<u8>> {
        Err(Error::NotFound("raw markup"))
    }

    /// The cover image record, if the document names one.
    fn cover(&self) -> Option<&[u8]> {
        None
    }

    /// Source archive embedded by the publishing tool.
    fn embedded_source(&self) -> Option<&[u8]> {
        None
    }

    /// Conversion log embedded by the publishing tool.
    fn embedded_log(&self) -> Option<&[u8]> {
        None
    }
}
