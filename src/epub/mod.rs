//! EPUB container constants and archive inspection.

mod inspect;

pub use inspect::{EntryInfo, EpubReport, inspect, inspect_reader};

/// Content of the `mimetype` entry.
pub const MIMETYPE: &[u8] = b"application/epub+zip";

/// Name of the first archive entry.
pub const MIMETYPE_PATH: &str = "mimetype";

/// Container document path.
pub const CONTAINER_PATH: &str = "META-INF/container.xml";

/// Directory holding every packaged part.
pub const CONTENT_DIR: &str = "OEBPS";

/// Package document path, relative to the archive root.
pub const PACKAGE_PATH: &str = "OEBPS/content.opf";

/// Container.xml template.
pub const CONTAINER_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;
