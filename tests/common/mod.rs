//! Shared test fixtures: an in-memory document provider.

#![allow(dead_code)]

use std::cell::Cell;
use std::io::{Cursor, Read};
use std::rc::Rc;

use mobiconvert::model::{Part, PartKind, Parts, Record};
use mobiconvert::{Document, DocumentProvider, Error, HybridPart, LoadOptions, Result};
use zip::ZipArchive;

pub const MAGIC: &[u8] = b"STUB";

/// Provider that hands out [`StubDocument`]s built from fixed parts.
///
/// Input must start with `STUB`; anything else is unsupported, and input
/// shorter than eight bytes is corrupt.
#[derive(Default)]
pub struct StubProvider {
    pub parts: Parts,
    pub replica: bool,
    pub fail_parse: bool,
    pub released: Rc<Cell<usize>>,
    pub loaded: Rc<Cell<usize>>,
    /// Hybrid half requested by the most recent load.
    pub hybrid: Cell<Option<HybridPart>>,
}

impl StubProvider {
    pub fn new(parts: Parts) -> Self {
        Self {
            parts,
            ..Self::default()
        }
    }

    pub fn released(&self) -> usize {
        self.released.get()
    }

    pub fn loaded(&self) -> usize {
        self.loaded.get()
    }
}

impl DocumentProvider for StubProvider {
    type Document = StubDocument;

    fn load(&self, data: &[u8], options: &LoadOptions) -> Result<StubDocument> {
        self.hybrid.set(Some(options.hybrid));
        if !data.starts_with(MAGIC) {
            return Err(Error::UnsupportedFormat("not a stub document".into()));
        }
        if data.len() < 8 {
            return Err(Error::CorruptData("truncated header".into()));
        }
        self.loaded.set(self.loaded.get() + 1);
        let mut document = StubDocument::default();
        document.parts = self.parts.clone();
        document.replica = self.replica;
        document.fail_parse = self.fail_parse;
        document.released = Rc::clone(&self.released);
        Ok(document)
    }
}

/// Document handle that counts how often it is released.
#[derive(Default)]
pub struct StubDocument {
    pub parts: Parts,
    pub replica: bool,
    pub fail_parse: bool,
    pub records: Vec<Record>,
    pub rawml: Option<Vec<u8>>,
    pub cover: Option<Vec<u8>>,
    pub source: Option<Vec<u8>>,
    pub log: Option<Vec<u8>>,
    pub released: Rc<Cell<usize>>,
}

impl Document for StubDocument {
    fn parts(&self) -> Result<Parts> {
        if self.fail_parse {
            return Err(Error::Parse("broken skeleton index".into()));
        }
        Ok(self.parts.clone())
    }

    fn is_replica(&self) -> bool {
        self.replica
    }

    fn records(&self) -> &[Record] {
        &self.records
    }

    fn rawml(&self) -> Result<Vec<u8>> {
        self.rawml.clone().ok_or(Error::NotFound("raw markup"))
    }

    fn cover(&self) -> Option<&[u8]> {
        self.cover.as_deref()
    }

    fn embedded_source(&self) -> Option<&[u8]> {
        self.source.as_deref()
    }

    fn embedded_log(&self) -> Option<&[u8]> {
        self.log.as_deref()
    }
}

impl Drop for StubDocument {
    fn drop(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

/// A small but complete book: two chapters, a stylesheet flow, cover, OPF and NCX.
pub fn sample_parts() -> Parts {
    Parts::new()
        .with_markup(Part::new(0, PartKind::Html, "<html><body>One</body></html>"))
        .with_markup(Part::new(1, PartKind::Html, "<html><body>Two</body></html>"))
        .with_flow(Part::new(0, PartKind::Html, "<html>raw</html>"))
        .with_flow(Part::new(1, PartKind::Css, "body { margin: 0 }"))
        .with_resource(Part::new(0, PartKind::Jpg, vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3]))
        .with_resource(Part::new(1, PartKind::Opf, "<package/>"))
        .with_resource(Part::new(2, PartKind::Ncx, "<ncx/>"))
}

/// Entry names of an archive, in central directory order.
pub fn entry_names(epub: &[u8]) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(epub)).expect("valid zip");
    (0..archive.len())
        .map(|i| archive.by_index_raw(i).unwrap().name().to_string())
        .collect()
}

/// Decompressed content of one archive entry.
pub fn read_entry(epub: &[u8], name: &str) -> Vec<u8> {
    let mut archive = ZipArchive::new(Cursor::new(epub)).expect("valid zip");
    let mut file = archive.by_name(name).expect("entry present");
    let mut data = Vec::new();
    file.read_to_end(&mut data).unwrap();
    data
}
