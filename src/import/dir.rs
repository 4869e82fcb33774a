//! A document backed by a directory of dumped parts.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::epub::CONTENT_DIR;
use crate::error::Result;
use crate::model::{Part, PartKind, Parts, Section};

use super::Document;

const PACKAGE_FILE: &str = "content.opf";

/// Parts read back from a `_markup` directory written by
/// [`Dumper::dump_parts`](crate::export::Dumper::dump_parts).
///
/// Both layouts are accepted: with an `OEBPS/` subdirectory the parts are
/// read from there, otherwise from the directory itself.
///
/// The raw first flow part is never dumped, so an empty stand-in is put back
/// in front of the flow sequence whenever flow files are present. A
/// `content.opf` file becomes the first resource.
#[derive(Debug, Clone)]
pub struct PartsDirectory {
    root: PathBuf,
    parts: Parts,
}

impl PartsDirectory {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let nested = root.join(CONTENT_DIR);
        let dir = if nested.is_dir() { nested } else { root.clone() };

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name());
            }
        }
        names.sort();

        let mut parts = Parts::new();
        let mut package = None;
        for name in &names {
            let Some(name) = name.to_str() else {
                debug!(file = ?name, "Skipping non UTF-8 file name");
                continue;
            };
            if name == PACKAGE_FILE {
                package = Some(fs::read(dir.join(name))?);
                continue;
            }
            let Some((section, uid, kind)) = Section::parse_file_name(name) else {
                debug!(file = name, "Skipping unrecognised file");
                continue;
            };
            let part = Part::new(uid, kind, fs::read(dir.join(name))?);
            match section {
                Section::Markup => parts.markup.push(part),
                Section::Flow => parts.flow.push(part),
                Section::Resource => parts.resources.push(part),
            }
        }

        if !parts.flow.is_empty() {
            parts.flow.insert(0, Part::new(0, PartKind::Html, Vec::new()));
        }
        parts.sort();
        // content.opf must stay the first manifest, ahead of any demoted
        // resourceNNNNN.opf; stable sorting keeps uid 0 at the front.
        if let Some(data) = package {
            parts.resources.insert(0, Part::new(0, PartKind::Opf, data));
        }

        info!(
            dir = %dir.display(),
            markup = parts.markup.len(),
            flow = parts.packaged_flow().len(),
            resources = parts.resources.len(),
            "Loaded parts directory"
        );
        Ok(Self { root, parts })
    }

    /// Directory this document was opened from.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Document for PartsDirectory {
    fn parts(&self) -> Result<Parts> {
        Ok(self.parts.clone())
    }
}
