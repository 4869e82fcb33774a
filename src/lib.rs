//! # mobiconvert
//!
//! Packages MOBI/AZW3 documents into EPUB archives.
//!
//! Parsing the Kindle container itself (records, compression, EXTH, hybrid
//! KF7/KF8 files) is left to a [`DocumentProvider`]. This crate drives the
//! provider, packages the parts it returns into a standard EPUB container, and
//! dumps records, cover and parts to disk.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mobiconvert::{ConvertConfig, DocumentProvider, convert};
//!
//! fn to_epub<P: DocumentProvider>(provider: &P) -> mobiconvert::Result<()> {
//!     let input = std::fs::read("book.azw3")?;
//!     let epub = convert(provider, &input, &ConvertConfig::default())?;
//!     std::fs::write("book.epub", epub)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Packaging Parts Directly
//!
//! ```
//! use mobiconvert::export::EpubPackager;
//! use mobiconvert::model::{Part, PartKind, Parts};
//!
//! let parts = Parts::new()
//!     .with_markup(Part::new(0, PartKind::Html, "<html/>"))
//!     .with_resource(Part::new(1, PartKind::Opf, "<package/>"));
//! let epub = EpubPackager::new().package(&parts)?;
//!
//! let report = mobiconvert::epub::inspect(&epub)?;
//! assert!(report.is_valid());
//! # Ok::<(), mobiconvert::Error>(())
//! ```

pub mod convert;
pub mod epub;
pub mod error;
pub mod export;
pub mod import;
pub mod model;
pub(crate) mod util;

pub use convert::{ConvertConfig, convert, convert_document, extract};
pub use error::{Error, ErrorKind, Result};
pub use import::{Document, DocumentProvider, HybridPart, LoadOptions, PartsDirectory};
pub use model::{Part, PartKind, Parts};
