use serde::Serialize;

use super::PartKind;

/// Which part sequence a part belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Markup,
    Flow,
    Resource,
}

impl Section {
    /// File name prefix for parts of this section.
    pub fn prefix(self) -> &'static str {
        match self {
            Section::Markup => "part",
            Section::Flow => "flow",
            Section::Resource => "resource",
        }
    }

    /// File name of a part: `{prefix}{uid:05}.{ext}`.
    ///
    /// The uid field is at least five digits wide and grows for larger ids,
    /// so distinct uids always yield distinct names.
    pub fn file_name(self, part: &Part) -> String {
        format!("{}{:05}.{}", self.prefix(), part.uid, part.kind.extension())
    }

    /// Parse a file name produced by [`Section::file_name`].
    pub fn parse_file_name(name: &str) -> Option<(Section, usize, PartKind)> {
        let (stem, ext) = name.rsplit_once('.')?;
        let (section, digits) = [Section::Markup, Section::Flow, Section::Resource]
            .into_iter()
            .find_map(|s| stem.strip_prefix(s.prefix()).map(|rest| (s, rest)))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let uid = digits.parse().ok()?;
        Some((section, uid, PartKind::from_extension(ext)?))
    }
}

/// A typed chunk of content or binary resource extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Sequence id assigned by the provider, unique within its sequence.
    pub uid: usize,
    pub kind: PartKind,
    pub data: Vec<u8>,
}

impl Part {
    pub fn new(uid: usize, kind: PartKind, data: impl Into<Vec<u8>>) -> Self {
        Self {
            uid,
            kind,
            data: data.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The three part sequences a document is split into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parts {
    /// Main text files.
    pub markup: Vec<Part>,
    /// Supplementary text files. The first element is the raw text and is
    /// never packaged.
    pub flow: Vec<Part>,
    /// Images, fonts, media, and the OPF/NCX documents.
    pub resources: Vec<Part>,
}

impl Parts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_markup(mut self, part: Part) -> Self {
        self.markup.push(part);
        self
    }

    pub fn with_flow(mut self, part: Part) -> Self {
        self.flow.push(part);
        self
    }

    pub fn with_resource(mut self, part: Part) -> Self {
        self.resources.push(part);
        self
    }

    /// Stable-sort every sequence by ascending uid.
    pub fn sort(&mut self) {
        self.markup.sort_by_key(|p| p.uid);
        self.flow.sort_by_key(|p| p.uid);
        self.resources.sort_by_key(|p| p.uid);
    }

    /// Flow parts that end up in the archive (all but the raw first one).
    pub fn packaged_flow(&self) -> &[Part] {
        self.flow.get(1..).unwrap_or(&[])
    }

    /// Total payload bytes across all sequences.
    pub fn payload_len(&self) -> usize {
        self.markup
            .iter()
            .chain(&self.flow)
            .chain(&self.resources)
            .map(|p| p.data.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.markup.is_empty() && self.flow.is_empty() && self.resources.is_empty()
    }
}

/// A raw record of the source container, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Offset of the record in the container file.
    pub offset: u32,
    pub attributes: u8,
    pub uid: u32,
    pub data: Vec<u8>,
}

impl Record {
    /// Metadata of this record, as listed by a record table.
    pub fn info(&self, index: usize) -> RecordInfo {
        RecordInfo {
            index,
            offset: self.offset,
            size: self.data.len(),
            attributes: self.attributes,
            uid: self.uid,
        }
    }
}

/// One row of a record table: everything about a record but its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordInfo {
    pub index: usize,
    pub offset: u32,
    pub size: usize,
    pub attributes: u8,
    pub uid: u32,
}
