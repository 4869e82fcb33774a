//! File-system dumps of a loaded document.
//!
//! Every output is named after the input file: for `books/novel.azw3` the
//! records land in `novel_records/`, the cover in `novel_cover.jpg`, and so
//! on. Outputs go next to the input unless [`DumpConfig::output_dir`] is set.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::import::Document;
use crate::model::{RecordInfo, Section};
use crate::util::{cover_extension, is_epub_archive};

use super::epub::archive_entries;

/// Configuration for file-system dumps.
#[derive(Debug, Clone, Default)]
pub struct DumpConfig {
    /// Directory receiving the dumps. Defaults to the input's directory.
    pub output_dir: Option<PathBuf>,
    /// Lay parts out as an unpacked EPUB (`mimetype`, `META-INF/`, `OEBPS/`)
    /// instead of a flat directory.
    pub epub_layout: bool,
}

impl DumpConfig {
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_epub_layout(mut self, epub_layout: bool) -> Self {
        self.epub_layout = epub_layout;
        self
    }
}

/// Writes pieces of a [`Document`] to disk.
pub struct Dumper<'a, D: Document + ?Sized> {
    document: &'a D,
    dir: PathBuf,
    base: String,
    config: DumpConfig,
}

impl<'a, D: Document + ?Sized> Dumper<'a, D> {
    /// Dumper for `document`, which was loaded from `input`.
    pub fn new(document: &'a D, input: impl AsRef<Path>) -> Self {
        let input = input.as_ref();
        let base = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "book".to_string());
        let dir = input.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            document,
            dir,
            base,
            config: DumpConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DumpConfig) -> Self {
        self.config = config;
        self
    }

    /// `[output dir]/[base name][suffix]`
    fn output_path(&self, suffix: &str) -> PathBuf {
        let dir = self.config.output_dir.as_deref().unwrap_or(&self.dir);
        dir.join(format!("{}{}", self.base, suffix))
    }

    fn create_dir(&self, suffix: &str) -> Result<PathBuf> {
        let dir = self.output_path(suffix);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Write every raw record to `[base]_records/record_{i}_uid_{uid}`.
    pub fn dump_records(&self) -> Result<PathBuf> {
        let dir = self.create_dir("_records")?;
        info!(dir = %dir.display(), "Saving records");
        for (i, record) in self.document.records().iter().enumerate() {
            let name = format!("record_{}_uid_{}", i, record.uid);
            write_file(&dir.join(name), &record.data)?;
        }
        Ok(dir)
    }

    /// Offset, size, attributes and uid of every raw record, in file order.
    pub fn records_meta(&self) -> Vec<RecordInfo> {
        let rows: Vec<_> = self
            .document
            .records()
            .iter()
            .enumerate()
            .map(|(i, record)| record.info(i))
            .collect();
        debug!(records = rows.len(), "Listed records metadata");
        rows
    }

    /// Write the decompressed text to `[base].rawml`.
    pub fn dump_rawml(&self) -> Result<PathBuf> {
        let rawml = self.document.rawml()?;
        let path = self.output_path(".rawml");
        info!(path = %path.display(), "Saving rawml");
        write_file(&path, &rawml)?;
        Ok(path)
    }

    /// Write the cover record to `[base]_cover.[ext]`.
    ///
    /// Fails with [`Error::NotFound`] when the document has no cover or the
    /// record is too short to hold an image.
    pub fn dump_cover(&self) -> Result<PathBuf> {
        let cover = self
            .document
            .cover()
            .filter(|data| data.len() >= 4)
            .ok_or(Error::NotFound("cover"))?;
        let path = self.output_path(&format!("_cover.{}", cover_extension(cover)));
        info!(path = %path.display(), "Saving cover");
        write_file(&path, cover)?;
        Ok(path)
    }

    /// Write the parsed parts into `[base]_markup/`.
    ///
    /// The flat layout names files `partNNNNN.ext`, `flowNNNNN.ext` and
    /// `resourceNNNNN.ext`. The EPUB layout writes exactly the entries the
    /// packager would put in the archive.
    pub fn dump_parts(&self) -> Result<PathBuf> {
        let mut parts = self.document.parts()?;
        parts.sort();
        let dir = self.create_dir("_markup")?;
        info!(dir = %dir.display(), "Saving markup");

        if self.config.epub_layout {
            for entry in archive_entries(&parts)? {
                write_file(&dir.join(&entry.path), entry.data)?;
            }
            return Ok(dir);
        }

        let sections = [
            (Section::Markup, parts.markup.as_slice()),
            (Section::Flow, parts.packaged_flow()),
            (Section::Resource, parts.resources.as_slice()),
        ];
        for (section, list) in sections {
            for part in list.iter().filter(|p| !p.is_empty()) {
                write_file(&dir.join(section.file_name(part)), &part.data)?;
            }
        }
        Ok(dir)
    }

    /// Write the embedded source archive and conversion log into `[base]_source/`.
    ///
    /// Returns the files written; an empty list when the document carries no
    /// source archive.
    pub fn dump_embedded_source(&self) -> Result<Vec<PathBuf>> {
        let Some(source) = self.document.embedded_source().filter(|d| !d.is_empty()) else {
            info!("Source archive not found");
            return Ok(Vec::new());
        };

        let dir = self.create_dir("_source")?;
        let ext = if is_epub_archive(source) { "epub" } else { "zip" };
        let archive = dir.join(format!("{}_source.{}", self.base, ext));
        info!(path = %archive.display(), "Saving source archive");
        write_file(&archive, source)?;
        let mut written = vec![archive];

        match self.document.embedded_log().filter(|d| !d.is_empty()) {
            Some(log) => {
                let path = dir.join(format!("{}_source.txt", self.base));
                info!(path = %path.display(), "Saving conversion log");
                write_file(&path, log)?;
                written.push(path);
            }
            None => info!("Conversion log not found"),
        }
        Ok(written)
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data)?;
    debug!(path = %path.display(), size = data.len(), "Wrote file");
    Ok(())
}
