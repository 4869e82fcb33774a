//! EPUB packager.
//!
//! Streams parsed parts into a ZIP-based EPUB container. The layout is fixed:
//!
//! 1. `mimetype`, stored uncompressed, always the first entry
//! 2. `META-INF/container.xml`, pointing at `OEBPS/content.opf`
//! 3. markup as `OEBPS/partNNNNN.ext`
//! 4. flow (minus the raw first element) as `OEBPS/flowNNNNN.ext`
//! 5. resources as `OEBPS/resourceNNNNN.ext`, except the package document,
//!    which becomes `OEBPS/content.opf`
//!
//! Entry timestamps are pinned to the ZIP epoch, so packaging the same parts
//! twice yields identical bytes.

use std::collections::HashSet;
use std::io::{self, Cursor, Seek, Write};

use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::epub::{CONTAINER_PATH, CONTAINER_XML, CONTENT_DIR, MIMETYPE, MIMETYPE_PATH, PACKAGE_PATH};
use crate::error::{Error, Result};
use crate::model::{Part, Parts, Section};

const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Extra capacity reserved on top of the payload for headers and the central directory.
const RESERVE_OVERHEAD: usize = 4096;

/// Configuration for EPUB packaging.
#[derive(Debug, Clone, Default)]
pub struct EpubConfig {
    /// Compression level for deflate (1-9, default 6). Level 0 stores every
    /// entry uncompressed.
    pub compression_level: Option<u32>,
    /// Initial capacity of the output buffer. Defaults to the total payload
    /// size plus a small overhead.
    pub reserve: Option<usize>,
}

impl EpubConfig {
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = Some(level);
        self
    }

    pub fn with_reserve(mut self, bytes: usize) -> Self {
        self.reserve = Some(bytes);
        self
    }
}

/// One planned archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry<'a> {
    pub path: String,
    pub data: &'a [u8],
    pub compression: CompressionMethod,
}

/// Packages [`Parts`] into an EPUB archive.
///
/// # Example
///
/// ```
/// use mobiconvert::export::EpubPackager;
/// use mobiconvert::model::{Part, PartKind, Parts};
///
/// let parts = Parts::new()
///     .with_markup(Part::new(3, PartKind::Html, "<html/>"))
///     .with_resource(Part::new(1, PartKind::Opf, "<package/>"));
/// let epub = EpubPackager::new().package(&parts)?;
/// assert_eq!(&epub[30..38], b"mimetype");
/// # Ok::<(), mobiconvert::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EpubPackager {
    config: EpubConfig,
}

impl EpubPackager {
    /// Create a new packager with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the packager with custom settings.
    pub fn with_config(mut self, config: EpubConfig) -> Self {
        self.config = config;
        self
    }

    /// Package into a freshly allocated buffer.
    ///
    /// Nothing is returned unless every entry was written and the archive
    /// was finalized.
    pub fn package(&self, parts: &Parts) -> Result<Vec<u8>> {
        let entries = archive_entries(parts)?;

        let capacity = self
            .config
            .reserve
            .unwrap_or_else(|| parts.payload_len() + RESERVE_OVERHEAD);
        let mut buf = Vec::new();
        buf.try_reserve(capacity).map_err(Error::ArchiveInit)?;

        let cursor = self.write_entries(&entries, Cursor::new(buf))?;
        Ok(cursor.into_inner())
    }

    /// Package into any destination and hand it back.
    ///
    /// The archive is assembled in memory first, so `writer` only ever
    /// receives a finalized archive. A failed packaging leaves it untouched.
    pub fn package_to<W: Write>(&self, parts: &Parts, mut writer: W) -> Result<W> {
        let epub = self.package(parts)?;
        writer.write_all(&epub)?;
        writer.flush()?;
        Ok(writer)
    }

    fn write_entries<W: Write + Seek>(&self, entries: &[ArchiveEntry<'_>], writer: W) -> Result<W> {
        let level = self
            .config
            .compression_level
            .unwrap_or(DEFAULT_COMPRESSION_LEVEL);
        let stored = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .last_modified_time(DateTime::default());
        // Deflate rejects level 0, which means "no compression" here
        let deflated = match level {
            0 => stored,
            level => SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(level as i64))
                .last_modified_time(DateTime::default()),
        };

        info!(entries = entries.len(), level, "Creating EPUB");

        let mut zip = ZipWriter::new(writer);
        for entry in entries {
            let options = match entry.compression {
                CompressionMethod::Stored => stored,
                _ => deflated,
            };
            write_entry(&mut zip, entry, options)?;
        }

        zip.finish().map_err(|e| Error::Finalize(io_error(e)))
    }
}

fn write_entry<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &ArchiveEntry<'_>,
    options: SimpleFileOptions,
) -> Result<()> {
    zip.start_file(entry.path.as_str(), options)
        .map_err(io_error)
        .and_then(|()| zip.write_all(entry.data))
        .map_err(|source| Error::EntryWrite {
            path: entry.path.clone(),
            source,
        })?;
    debug!(path = %entry.path, size = entry.data.len(), "Added file to archive");
    Ok(())
}

/// Archive path of a packaged part.
pub fn entry_path(section: Section, part: &Part) -> String {
    format!("{CONTENT_DIR}/{}", section.file_name(part))
}

/// Plan the archive: every entry in write order, with its compression.
///
/// Empty parts are skipped and the first flow part is dropped. The first
/// non-empty manifest resource becomes `OEBPS/content.opf`; any later one is
/// kept as an ordinary resource. Fails with [`Error::EntryWrite`] if two
/// parts map to the same path.
pub fn archive_entries(parts: &Parts) -> Result<Vec<ArchiveEntry<'_>>> {
    let mut plan = EntryPlan::default();
    plan.push(MIMETYPE_PATH.to_string(), MIMETYPE, CompressionMethod::Stored)?;
    plan.push(
        CONTAINER_PATH.to_string(),
        CONTAINER_XML,
        CompressionMethod::Deflated,
    )?;

    for part in parts.markup.iter().filter(|p| !p.is_empty()) {
        plan.push_part(entry_path(Section::Markup, part), part)?;
    }

    for part in parts.packaged_flow().iter().filter(|p| !p.is_empty()) {
        plan.push_part(entry_path(Section::Flow, part), part)?;
    }

    let mut has_package = false;
    for part in parts.resources.iter().filter(|p| !p.is_empty()) {
        if part.kind.is_manifest() && !has_package {
            has_package = true;
            plan.push_part(PACKAGE_PATH.to_string(), part)?;
            continue;
        }
        if part.kind.is_manifest() {
            warn!(uid = part.uid, "Extra package document kept as a plain resource");
        }
        plan.push_part(entry_path(Section::Resource, part), part)?;
    }

    if !has_package {
        warn!("No package document among resources, archive has no content.opf");
    }

    Ok(plan.entries)
}

#[derive(Default)]
struct EntryPlan<'a> {
    entries: Vec<ArchiveEntry<'a>>,
    seen: HashSet<String>,
}

impl<'a> EntryPlan<'a> {
    fn push_part(&mut self, path: String, part: &'a Part) -> Result<()> {
        self.push(path, &part.data, CompressionMethod::Deflated)
    }

    fn push(&mut self, path: String, data: &'a [u8], compression: CompressionMethod) -> Result<()> {
        if !self.seen.insert(path.clone()) {
            return Err(Error::EntryWrite {
                path,
                source: io::Error::new(io::ErrorKind::AlreadyExists, "duplicate archive entry"),
            });
        }
        self.entries.push(ArchiveEntry {
            path,
            data,
            compression,
        });
        Ok(())
    }
}

/// Convert zip error to io error.
fn io_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> io::Error {
    io::Error::other(e)
}
