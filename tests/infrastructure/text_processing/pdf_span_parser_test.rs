use std::path::{Path, PathBuf};

use folio::application::ports::{DocumentParser, ParseError};
use folio::domain::DocumentId;
use folio::infrastructure::text_processing::{PdfSpanParser, hash_file};
use pdf_oxide::api::Pdf;

fn write_pdf(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    Pdf::from_text(text).unwrap().save(&path).unwrap();
    path
}

#[test]
fn given_generated_pdf_when_parsing_then_extracts_page_text() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_pdf(tmp.path(), "hello.pdf", "Hello World\n\nSecond paragraph here.");

    let document = PdfSpanParser::new().parse(&path).unwrap();

    assert!(document.page_count() >= 1);
    assert_eq!(document.pages[0].page_number, 1);
    assert_eq!(document.file_name, "hello.pdf");
    assert!(document.pages[0].text.contains("Hello"));
    assert!(!document.pages[0].spans.is_empty());
}

#[test]
fn given_generated_pdf_when_parsing_then_span_offsets_index_into_page_text() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_pdf(
        tmp.path(),
        "offsets.pdf",
        "Offsets must line up with spans.\n\nEvery span maps back to its text.",
    );

    let document = PdfSpanParser::new().parse(&path).unwrap();

    for page in &document.pages {
        let text_len = page.text.chars().count();
        for pair in page.spans.windows(2) {
            assert!(pair[1].start_offset >= pair[0].end_offset);
        }
        for span in &page.spans {
            assert!(span.start_offset <= span.end_offset);
            assert!(span.end_offset <= text_len);
            assert_eq!(page.span_text(span), span.text);
        }
        assert!(!page.text.ends_with('\n'));
    }
}

#[test]
fn given_same_file_when_parsing_twice_then_content_hash_is_stable_and_matches_bytes() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_pdf(tmp.path(), "stable.pdf", "Deterministic identity.");
    let parser = PdfSpanParser::new();

    let first = parser.parse(&path).unwrap();
    let second = parser.parse(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(first.content_hash, second.content_hash);
    assert_eq!(first.content_hash, DocumentId::from_content(&bytes));
    assert_eq!(first.file_size_bytes, bytes.len() as u64);
    assert_eq!(first, second);
}

#[test]
fn given_file_on_disk_when_hashing_then_matches_in_memory_digest() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("blob.bin");
    let bytes: Vec<u8> = (0..3_000_000u32).map(|i| (i % 251) as u8).collect();
    std::fs::write(&path, &bytes).unwrap();

    let (id, size) = hash_file(&path).unwrap();

    assert_eq!(id, DocumentId::from_content(&bytes));
    assert_eq!(size, bytes.len() as u64);
}

#[test]
fn given_missing_file_when_parsing_then_returns_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("nope.pdf");

    let err = PdfSpanParser::new().parse(&missing).unwrap_err();

    assert!(matches!(err, ParseError::NotFound(p) if p == missing));
}

#[test]
fn given_non_pdf_file_when_parsing_then_returns_open_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("fake.pdf");
    std::fs::write(&path, "this is plainly not a pdf").unwrap();

    let err = PdfSpanParser::new().parse(&path).unwrap_err();

    assert!(matches!(err, ParseError::Open { .. }));
    assert_eq!(err.page_index(), None);
}

#[test]
fn given_page_index_when_numbering_then_returns_one_based_page() {
    assert_eq!(PdfSpanParser::page_number(0).unwrap(), 1);
    assert_eq!(PdfSpanParser::page_number(41).unwrap(), 42);
}

#[test]
fn given_page_index_beyond_u32_when_numbering_then_returns_page_failed() {
    let index = u32::MAX as usize;

    let err = PdfSpanParser::page_number(index).unwrap_err();

    assert!(matches!(err, ParseError::PageFailed { page_index, .. } if page_index == index));
    assert_eq!(err.page_index(), Some(index));
}
