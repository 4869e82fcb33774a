//! Conversion pipeline: load, extract, package.

use tracing::info;

use crate::error::{Error, Result};
use crate::export::{EpubConfig, EpubPackager};
use crate::import::{Document, DocumentProvider, LoadOptions};
use crate::model::Parts;

/// Configuration for one conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertConfig {
    pub load: LoadOptions,
    pub epub: EpubConfig,
}

impl ConvertConfig {
    pub fn with_load(mut self, load: LoadOptions) -> Self {
        self.load = load;
        self
    }

    pub fn with_epub(mut self, epub: EpubConfig) -> Self {
        self.epub = epub;
        self
    }
}

/// Convert container bytes into an EPUB archive.
///
/// The document handle is dropped as soon as its parts are extracted, before
/// packaging starts, and on every failure path.
pub fn convert<P: DocumentProvider>(
    provider: &P,
    data: &[u8],
    config: &ConvertConfig,
) -> Result<Vec<u8>> {
    info!(size = data.len(), hybrid = ?config.load.hybrid, "Loading document");
    let parts = {
        let document = provider.load(data, &config.load)?;
        epub_parts(&document)?
    };
    package(&parts, config)
}

/// Package an already loaded document.
pub fn convert_document<D: Document + ?Sized>(
    document: &D,
    config: &ConvertConfig,
) -> Result<Vec<u8>> {
    let parts = epub_parts(document)?;
    package(&parts, config)
}

fn epub_parts<D: Document + ?Sized>(document: &D) -> Result<Parts> {
    if document.is_replica() {
        return Err(Error::UnsupportedFormat(
            "Print Replica books cannot be converted to EPUB".to_string(),
        ));
    }
    extract(document)
}

fn package(parts: &Parts, config: &ConvertConfig) -> Result<Vec<u8>> {
    EpubPackager::new()
        .with_config(config.epub.clone())
        .package(parts)
}

/// Ask the document for its parts, sorted by uid within each sequence.
pub fn extract<D: Document + ?Sized>(document: &D) -> Result<Parts> {
    info!("Reconstructing source resources");
    let mut parts = document.parts()?;
    parts.sort();
    info!(
        markup = parts.markup.len(),
        flow = parts.flow.len(),
        resources = parts.resources.len(),
        "Extracted parts"
    );
    Ok(parts)
}
