//! Magic-byte detection for raw records.

// ============================================================================
// Cover Format Detection
// ============================================================================

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const GIF_MAGIC: &[u8] = b"GIF8";
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const BMP_MAGIC: &[u8] = b"BM";

/// Pick a file extension for a cover record from its magic bytes.
///
/// BMP is only trusted when the size field in its header matches the
/// record length. Anything unrecognised is `raw`.
pub fn cover_extension(data: &[u8]) -> &'static str {
    if data.starts_with(JPEG_MAGIC) {
        return "jpg";
    }
    if data.starts_with(GIF_MAGIC) {
        return "gif";
    }
    if data.starts_with(PNG_MAGIC) {
        return "png";
    }
    if data.len() >= 6 && data.starts_with(BMP_MAGIC) {
        let size = u32::from_le_bytes([data[2], data[3], data[4], data[5]]);
        if size as usize == data.len() {
            return "bmp";
        }
    }
    "raw"
}

// ============================================================================
// Embedded Source Detection
// ============================================================================

/// A stored `mimetype` entry right after the first local file header.
const EPUB_MAGIC: &[u8] = b"mimetypeapplication/epub+zip";
const EPUB_MAGIC_OFFSET: usize = 30;

/// True if a ZIP archive starts with an EPUB `mimetype` entry.
pub fn is_epub_archive(data: &[u8]) -> bool {
    data.len() > EPUB_MAGIC_OFFSET + EPUB_MAGIC.len()
        && data[EPUB_MAGIC_OFFSET..].starts_with(EPUB_MAGIC)
}

// ============================================================================
// Tests
// ============================================================================
