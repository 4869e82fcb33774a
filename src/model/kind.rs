//! Part type tags and their fixed extension/media-type table.

/// Type tag assigned to a part by the document provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    Html,
    Css,
    Svg,
    Jpg,
    Gif,
    Png,
    Bmp,
    Otf,
    Ttf,
    Mp3,
    Mpg,
    Pdf,
    /// Package document (OPF).
    Opf,
    /// Navigation document (NCX).
    Ncx,
    Unknown,
}

/// Coarse grouping of [`PartKind`] tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartCategory {
    ContentDocument,
    Stylesheet,
    Image,
    Font,
    Audio,
    Video,
    Manifest,
    Navigation,
    Other,
}

impl PartKind {
    /// Every tag, in table order.
    pub const ALL: [PartKind; 15] = [
        PartKind::Html,
        PartKind::Css,
        PartKind::Svg,
        PartKind::Jpg,
        PartKind::Gif,
        PartKind::Png,
        PartKind::Bmp,
        PartKind::Otf,
        PartKind::Ttf,
        PartKind::Mp3,
        PartKind::Mpg,
        PartKind::Pdf,
        PartKind::Opf,
        PartKind::Ncx,
        PartKind::Unknown,
    ];

    /// File extension used when naming archive entries.
    pub fn extension(self) -> &'static str {
        match self {
            PartKind::Html => "html",
            PartKind::Css => "css",
            PartKind::Svg => "svg",
            PartKind::Jpg => "jpg",
            PartKind::Gif => "gif",
            PartKind::Png => "png",
            PartKind::Bmp => "bmp",
            PartKind::Otf => "otf",
            PartKind::Ttf => "ttf",
            PartKind::Mp3 => "mp3",
            PartKind::Mpg => "mpg",
            PartKind::Pdf => "pdf",
            PartKind::Opf => "opf",
            PartKind::Ncx => "ncx",
            PartKind::Unknown => "dat",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            PartKind::Html => "application/xhtml+xml",
            PartKind::Css => "text/css",
            PartKind::Svg => "image/svg+xml",
            PartKind::Jpg => "image/jpeg",
            PartKind::Gif => "image/gif",
            PartKind::Png => "image/png",
            PartKind::Bmp => "image/bmp",
            PartKind::Otf => "application/vnd.ms-opentype",
            PartKind::Ttf => "application/x-font-truetype",
            PartKind::Mp3 => "audio/mpeg",
            PartKind::Mpg => "video/mpeg",
            PartKind::Pdf => "application/pdf",
            PartKind::Opf => "application/oebps-package+xml",
            PartKind::Ncx => "application/x-dtbncx+xml",
            PartKind::Unknown => "application/unknown",
        }
    }

    pub fn category(self) -> PartCategory {
        match self {
            PartKind::Html => PartCategory::ContentDocument,
            PartKind::Css => PartCategory::Stylesheet,
            PartKind::Svg | PartKind::Jpg | PartKind::Gif | PartKind::Png | PartKind::Bmp => {
                PartCategory::Image
            }
            PartKind::Otf | PartKind::Ttf => PartCategory::Font,
            PartKind::Mp3 => PartCategory::Audio,
            PartKind::Mpg => PartCategory::Video,
            PartKind::Opf => PartCategory::Manifest,
            PartKind::Ncx => PartCategory::Navigation,
            PartKind::Pdf | PartKind::Unknown => PartCategory::Other,
        }
    }

    /// True for the package document, which lives at a fixed archive path.
    pub fn is_manifest(self) -> bool {
        self.category() == PartCategory::Manifest
    }

    /// Inverse of [`PartKind::extension`], case-insensitive.
    ///
    /// A few common aliases (`xhtml`, `htm`, `jpeg`) are accepted as well.
    pub fn from_extension(ext: &str) -> Option<PartKind> {
        let ext = ext.to_ascii_lowercase();
        match ext.as_str() {
            "xhtml" | "htm" => return Some(PartKind::Html),
            "jpeg" => return Some(PartKind::Jpg),
            _ => {}
        }
        PartKind::ALL.into_iter().find(|kind| kind.extension() == ext)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_kind_table() {
        let table = [
            (PartKind::Html, "html", "application/xhtml+xml", PartCategory::ContentDocument),
            (PartKind::Css, "css", "text/css", PartCategory::Stylesheet),
            (PartKind::Svg, "svg", "image/svg+xml", PartCategory::Image),
            (PartKind::Jpg, "jpg", "image/jpeg", PartCategory::Image),
            (PartKind::Gif, "gif", "image/gif", PartCategory::Image),
            (PartKind::Png, "png", "image/png", PartCategory::Image),
            (PartKind::Bmp, "bmp", "image/bmp", PartCategory::Image),
            (PartKind::Otf, "otf", "application/vnd.ms-opentype", PartCategory::Font),
            (PartKind::Ttf, "ttf", "application/x-font-truetype", PartCategory::Font),
            (PartKind::Mp3, "mp3", "audio/mpeg", PartCategory::Audio),
            (PartKind::Mpg, "mpg", "video/mpeg", PartCategory::Video),
            (PartKind::Pdf, "pdf", "application/pdf", PartCategory::Other),
            (PartKind::Opf, "opf", "application/oebps-package+xml", PartCategory::Manifest),
            (PartKind::Ncx, "ncx", "application/x-dtbncx+xml", PartCategory::Navigation),
            (PartKind::Unknown, "dat", "application/unknown", PartCategory::Other),
        ];
        assert_eq!(table.len(), PartKind::ALL.len());

        for (kind, ext, media_type, category) in table {
            assert_eq!(kind.extension(), ext, "{kind:?}");
            assert_eq!(kind.media_type(), media_type, "{kind:?}");
            assert_eq!(kind.category(), category, "{kind:?}");
            assert_eq!(kind.is_manifest(), kind == PartKind::Opf, "{kind:?}");
        }
    }

    #[test]
    fn test_extensions_are_distinct() {
        let exts: HashSet<_> = PartKind::ALL.iter().map(|k| k.extension()).collect();
        assert_eq!(exts.len(), PartKind::ALL.len());
    }

    #[test]
    fn test_from_extension_round_trips() {
        for kind in PartKind::ALL {
            assert_eq!(PartKind::from_extension(kind.extension()), Some(kind));
        }
        assert_eq!(PartKind::from_extension("XHTML"), Some(PartKind::Html));
        assert_eq!(PartKind::from_extension("jpeg"), Some(PartKind::Jpg));
        assert_eq!(PartKind::from_extension("exe"), None);
    }
}
