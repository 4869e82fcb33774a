use std::io::{Cursor, Read, Seek};

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Serialize;
use zip::{CompressionMethod, ZipArchive};

use crate::error::{Error, Result};

use super::{CONTAINER_PATH, MIMETYPE, MIMETYPE_PATH};

/// One archive entry, as found in the central directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    pub name: String,
    /// Offset of the local file header.
    pub offset: u64,
    pub size: u64,
    pub compressed_size: u64,
    pub stored: bool,
}

/// Result of [`inspect`]: the archive's entries and any container problems.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EpubReport {
    pub entries: Vec<EntryInfo>,
    /// Package document path named by `META-INF/container.xml`.
    pub rootfile: Option<String>,
    pub issues: Vec<String>,
}

impl EpubReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn entry(&self, name: &str) -> Option<&EntryInfo> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// Inspect an in-memory EPUB.
///
/// Fails only when the bytes are not a readable ZIP archive; container
/// problems are collected in [`EpubReport::issues`].
pub fn inspect(data: &[u8]) -> Result<EpubReport> {
    inspect_reader(Cursor::new(data))
}

/// Inspect an EPUB from any [`Read`] + [`Seek`] source.
pub fn inspect_reader<R: Read + Seek>(reader: R) -> Result<EpubReport> {
    let mut archive = ZipArchive::new(reader)?;
    let mut report = EpubReport::default();

    for i in 0..archive.len() {
        let file = archive.by_index_raw(i)?;
        report.entries.push(EntryInfo {
            name: file.name().to_string(),
            offset: file.header_start(),
            size: file.size(),
            compressed_size: file.compressed_size(),
            stored: file.compression() == CompressionMethod::Stored,
        });
    }

    check_mimetype(&mut archive, &mut report)?;

    if report.entry(CONTAINER_PATH).is_none() {
        report.issues.push(format!("{CONTAINER_PATH} is missing"));
        return Ok(report);
    }
    let container = read_archive_file(&mut archive, CONTAINER_PATH)?;
    match find_rootfile(&container)? {
        Some(path) => {
            if report.entry(&path).is_none() {
                report.issues.push(format!("package document {path} is missing"));
            }
            report.rootfile = Some(path);
        }
        None => report
            .issues
            .push("no rootfile found in container.xml".to_string()),
    }

    Ok(report)
}

fn check_mimetype<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    report: &mut EpubReport,
) -> Result<()> {
    let Some(first) = report.entries.first() else {
        report.issues.push("archive is empty".to_string());
        return Ok(());
    };
    if first.name != MIMETYPE_PATH || first.offset != 0 {
        report
            .issues
            .push(format!("first entry is {}, expected {MIMETYPE_PATH}", first.name));
        return Ok(());
    }
    if !first.stored {
        report.issues.push(format!("{MIMETYPE_PATH} is compressed"));
    }
    if read_archive_file(archive, MIMETYPE_PATH)? != MIMETYPE {
        report
            .issues
            .push(format!("{MIMETYPE_PATH} does not read application/epub+zip"));
    }
    Ok(())
}

fn read_archive_file<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut file = archive.by_name(name)?;
    let mut data = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut data)?;
    Ok(data)
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// `full-path` of the first `rootfile` element, whatever its namespace prefix.
fn find_rootfile(container: &[u8]) -> Result<Option<String>> {
    let container = container.strip_prefix(UTF8_BOM).unwrap_or(container);
    let mut reader = Reader::from_reader(container);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(Error::Xml)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"rootfile" => {
                let path = e
                    .attributes()
                    .flatten()
                    .find(|attr| attr.key.local_name().as_ref() == b"full-path")
                    .map(|attr| String::from_utf8_lossy(&attr.value).into_owned());
                if path.is_some() {
                    return Ok(path);
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}
