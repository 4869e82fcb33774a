//! Conversion pipeline tests against an in-memory provider.

mod common;

use mobiconvert::model::{Part, PartKind, Parts};
use mobiconvert::{ConvertConfig, ErrorKind, HybridPart, LoadOptions, convert, convert_document, extract};

use common::{StubDocument, StubProvider, entry_names, sample_parts};

const INPUT: &[u8] = b"STUB\0\0\0\x01 body";

#[test]
fn test_convert_produces_epub() {
    let provider = StubProvider::new(sample_parts());
    let epub = convert(&provider, INPUT, &ConvertConfig::default()).unwrap();

    let report = mobiconvert::epub::inspect(&epub).unwrap();
    assert!(report.is_valid(), "{:?}", report.issues);
    assert!(report.entry("OEBPS/part00001.html").is_some());
}

#[test]
fn test_document_released_once_on_success() {
    let provider = StubProvider::new(sample_parts());
    convert(&provider, INPUT, &ConvertConfig::default()).unwrap();
    assert_eq!(provider.loaded(), 1);
    assert_eq!(provider.released(), 1);
}

#[test]
fn test_document_released_once_on_parse_failure() {
    let mut provider = StubProvider::new(sample_parts());
    provider.fail_parse = true;

    let err = convert(&provider, INPUT, &ConvertConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(provider.released(), 1);
}

#[test]
fn test_replica_rejected_and_released() {
    let mut provider = StubProvider::new(sample_parts());
    provider.replica = true;

    let err = convert(&provider, INPUT, &ConvertConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FormatUnsupported);
    assert!(err.to_string().contains("Print Replica"));
    assert_eq!(provider.released(), 1);
}

#[test]
fn test_unsupported_input_never_loads() {
    let provider = StubProvider::new(sample_parts());
    let err = convert(&provider, b"%PDF-1.4", &ConvertConfig::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FormatUnsupported);
    assert_eq!(provider.loaded(), 0);
    assert_eq!(provider.released(), 0);
}

#[test]
fn test_truncated_input_is_corrupt() {
    let provider = StubProvider::new(sample_parts());
    let err = convert(&provider, b"STUB", &ConvertConfig::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CorruptData);
    assert_eq!(provider.released(), 0);
}

#[test]
fn test_packaging_failure_after_release() {
    let parts = Parts::new()
        .with_markup(Part::new(1, PartKind::Html, "a"))
        .with_markup(Part::new(1, PartKind::Html, "b"));
    let provider = StubProvider::new(parts);

    let err = convert(&provider, INPUT, &ConvertConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EntryWrite);
    assert_eq!(provider.released(), 1);
}

#[test]
fn test_parts_are_sorted_by_uid() {
    let parts = Parts::new()
        .with_markup(Part::new(7, PartKind::Html, "seven"))
        .with_markup(Part::new(2, PartKind::Html, "two"))
        .with_resource(Part::new(5, PartKind::Png, "png"))
        .with_resource(Part::new(3, PartKind::Opf, "opf"));
    let provider = StubProvider::new(parts);
    let epub = convert(&provider, INPUT, &ConvertConfig::default()).unwrap();

    assert_eq!(
        entry_names(&epub)[2..],
        [
            "OEBPS/part00002.html",
            "OEBPS/part00007.html",
            "OEBPS/content.opf",
            "OEBPS/resource00005.png",
        ]
    );
}

#[test]
fn test_extract_sorts_in_place() {
    let mut document = StubDocument::default();
    document.parts = Parts::new()
        .with_flow(Part::new(4, PartKind::Css, "b"))
        .with_flow(Part::new(0, PartKind::Html, "raw"));

    let parts = extract(&document).unwrap();
    let uids: Vec<_> = parts.flow.iter().map(|p| p.uid).collect();
    assert_eq!(uids, vec![0, 4]);
}

#[test]
fn test_convert_document_matches_convert() {
    let provider = StubProvider::new(sample_parts());
    let via_provider = convert(&provider, INPUT, &ConvertConfig::default()).unwrap();

    let mut document = StubDocument::default();
    document.parts = sample_parts();
    let direct = convert_document(&document, &ConvertConfig::default()).unwrap();

    assert_eq!(via_provider, direct);
}

#[test]
fn test_hybrid_selection_reaches_provider() {
    let provider = StubProvider::new(sample_parts());
    convert(&provider, INPUT, &ConvertConfig::default()).unwrap();
    assert_eq!(provider.hybrid.get(), Some(HybridPart::Kf8));

    let config = ConvertConfig::default().with_load(LoadOptions::default().with_hybrid(HybridPart::Kf7));
    convert(&provider, INPUT, &config).unwrap();
    assert_eq!(provider.hybrid.get(), Some(HybridPart::Kf7));
}

#[test]
fn test_empty_document_converts() {
    let provider = StubProvider::new(Parts::new());
    let epub = convert(&provider, INPUT, &ConvertConfig::default()).unwrap();
    assert_eq!(entry_names(&epub).len(), 2);
    assert_eq!(provider.released(), 1);
}
