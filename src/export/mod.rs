//! Export module for writing parsed documents out.
//!
//! - [`EpubPackager`] builds the EPUB archive in memory or into any
//!   `Write + Seek` destination.
//! - [`Dumper`] writes records, cover, raw markup, embedded source and parts
//!   to the file system.
//!
//! # Example
//!
//! ```no_run
//! use mobiconvert::export::{EpubConfig, EpubPackager};
//! use mobiconvert::import::PartsDirectory;
//! use mobiconvert::import::Document;
//!
//! let book = PartsDirectory::open("book_markup")?;
//! let epub = EpubPackager::new()
//!     .with_config(EpubConfig::default().with_compression_level(9))
//!     .package(&book.parts()?)?;
//! std::fs::write("book.epub", epub)?;
//! # Ok::<(), mobiconvert::Error>(())
//! ```

mod dump;
mod epub;

pub use dump::{DumpConfig, Dumper};
pub use epub::{ArchiveEntry, EpubConfig, EpubPackager, archive_entries, entry_path};
