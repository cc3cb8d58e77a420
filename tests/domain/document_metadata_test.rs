use std::path::Path;

use chrono::{Datelike, Utc};
use folio::domain::{
    ChunkMetadata, DocType, DocumentId, DocumentMetadata, MetadataStatus,
    MetadataValidationError,
};

fn draft(file: &str) -> DocumentMetadata {
    DocumentMetadata::draft(DocumentId::from_raw("doc"), Path::new(file))
}

#[test]
fn given_snake_case_file_name_when_drafting_then_title_is_capitalized() {
    let meta = draft("/pdfs/deep_work-rules_for_focus.pdf");
    assert_eq!(meta.title, "Deep Work Rules For Focus");
}

#[test]
fn given_all_caps_words_when_drafting_then_acronyms_are_kept() {
    let meta = draft("NASA_mission_REPORT.pdf");
    assert_eq!(meta.title, "NASA Mission REPORT");
}

#[test]
fn given_new_draft_when_inspecting_then_status_is_draft_with_source_path() {
    let meta = draft("/pdfs/book.pdf");

    assert_eq!(meta.status, MetadataStatus::Draft);
    assert!(!meta.is_ready());
    assert_eq!(meta.doc_type, Some(DocType::Other));
    assert_eq!(meta.source_path.as_deref(), Some("/pdfs/book.pdf"));
}

#[test]
fn given_blank_title_when_validating_then_returns_empty_title() {
    let mut meta = draft("book.pdf");
    meta.title = "   ".to_string();
    assert_eq!(meta.validate(), Err(MetadataValidationError::EmptyTitle));
}

#[test]
fn given_year_too_far_in_future_when_validating_then_returns_out_of_range() {
    let mut meta = draft("book.pdf");
    let max = Utc::now().year() + 1;
    meta.year = Some(max + 1);

    assert_eq!(
        meta.validate(),
        Err(MetadataValidationError::YearOutOfRange {
            year: max + 1,
            max
        })
    );
}

#[test]
fn given_year_before_1000_when_validating_then_returns_out_of_range() {
    let mut meta = draft("book.pdf");
    meta.year = Some(999);
    assert!(matches!(
        meta.validate(),
        Err(MetadataValidationError::YearOutOfRange { year: 999, .. })
    ));
}

#[test]
fn given_complete_metadata_when_validating_then_succeeds() {
    let mut meta = draft("book.pdf");
    meta.year = Some(2020);
    assert_eq!(meta.validate(), Ok(()));
}

#[test]
fn given_mixed_case_doc_type_when_parsing_then_matches_variant() {
    assert_eq!("Paper".parse::<DocType>(), Ok(DocType::Paper));
    assert!(matches!(
        "slides".parse::<DocType>(),
        Err(MetadataValidationError::UnknownDocType(_))
    ));
}

#[test]
fn given_json_without_status_when_deserializing_then_defaults_to_draft() {
    let json = r#"{
        "doc_id": "abc",
        "title": "A Title",
        "year": 2001,
        "doc_type": "report",
        "ingested_at": "2024-01-01T00:00:00Z",
        "source_path": null
    }"#;

    let meta: DocumentMetadata = serde_json::from_str(json).unwrap();

    assert_eq!(meta.status, MetadataStatus::Draft);
    assert!(meta.authors.is_empty());
    assert_eq!(meta.doc_type, Some(DocType::Report));
}

#[test]
fn given_document_metadata_when_projecting_then_chunk_metadata_copies_fields() {
    let mut meta = draft("book.pdf");
    meta.authors = vec!["Ada Lovelace".to_string()];
    meta.tags = vec!["math".to_string()];
    meta.year = Some(1843);

    let projected = ChunkMetadata::from(&meta);

    assert_eq!(projected.title.as_deref(), Some("Book"));
    assert_eq!(projected.authors, meta.authors);
    assert_eq!(projected.tags, meta.tags);
    assert_eq!(projected.year, Some(1843));
    assert_eq!(projected.source_path, meta.source_path);
}
