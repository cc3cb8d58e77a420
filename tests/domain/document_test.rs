use std::path::PathBuf;

use folio::domain::{BoundingBox, DocumentId, PageParse, PageText, ParsedDocument, TextSpan};

fn span(text: &str, start: usize, end: usize) -> TextSpan {
    TextSpan {
        text: text.to_string(),
        bbox: BoundingBox::new(0.0, 0.0, 10.0, 12.0),
        start_offset: start,
        end_offset: end,
    }
}

#[test]
fn given_same_bytes_when_hashing_then_document_ids_match() {
    let a = DocumentId::from_content(b"identical bytes");
    let b = DocumentId::from_content(b"identical bytes");
    assert_eq!(a, b);
    assert_eq!(a.as_str().len(), 64);
}

#[test]
fn given_different_bytes_when_hashing_then_document_ids_differ() {
    let a = DocumentId::from_content(b"first");
    let b = DocumentId::from_content(b"second");
    assert_ne!(a, b);
}

#[test]
fn given_empty_input_when_hashing_then_returns_known_sha256() {
    let id = DocumentId::from_content(b"");
    assert_eq!(
        id.as_str(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn given_multibyte_text_when_slicing_span_then_uses_character_offsets() {
    let page = PageParse {
        page_number: 1,
        text: "Café au lait".to_string(),
        spans: vec![span("Café", 0, 4), span("au", 5, 7), span("lait", 8, 12)],
    };

    let texts: Vec<String> = page.spans.iter().map(|s| page.span_text(s)).collect();

    assert_eq!(texts, vec!["Café", "au", "lait"]);
}

#[test]
fn given_character_range_when_querying_spans_then_returns_overlapping_spans() {
    let page = PageParse {
        page_number: 1,
        text: "alpha beta gamma".to_string(),
        spans: vec![span("alpha", 0, 5), span("beta", 6, 10), span("gamma", 11, 16)],
    };

    let hits: Vec<&str> = page
        .spans_in_range(7, 12)
        .map(|s| s.text.as_str())
        .collect();

    assert_eq!(hits, vec!["beta", "gamma"]);
}

#[test]
fn given_parsed_document_when_listing_page_texts_then_preserves_page_order() {
    let document = ParsedDocument {
        file_path: PathBuf::from("/tmp/sample.pdf"),
        file_name: "sample.pdf".to_string(),
        file_size_bytes: 42,
        content_hash: DocumentId::from_raw("hash"),
        pages: vec![
            PageParse {
                page_number: 1,
                text: "one".to_string(),
                spans: Vec::new(),
            },
            PageParse {
                page_number: 2,
                text: "two".to_string(),
                spans: Vec::new(),
            },
        ],
    };

    let pages: Vec<PageText> = document.page_texts().collect();

    assert_eq!(document.page_count(), 2);
    assert_eq!(document.id().as_str(), "hash");
    assert_eq!(pages, vec![PageText::new(1, "one"), PageText::new(2, "two")]);
}

#[test]
fn given_bounding_box_when_measuring_then_reports_height_and_center() {
    let bbox = BoundingBox::new(10.0, 100.0, 50.0, 112.0);
    assert_eq!(bbox.height(), 12.0);
    assert_eq!(bbox.center_y(), 106.0);
}
