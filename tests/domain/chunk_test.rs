use folio::domain::{Anchor, Block, Chunk, ChunkId, ChunkMetadata, DocType, DocumentId};

fn doc_id() -> DocumentId {
    DocumentId::from_content(b"chunk test document")
}

#[test]
fn given_document_and_index_when_creating_chunk_id_then_joins_with_underscore() {
    let doc = DocumentId::from_raw("abc123");
    let id = ChunkId::new(&doc, 7);
    assert_eq!(id.as_str(), "abc123_7");
}

#[test]
fn given_same_inputs_when_fingerprinting_twice_then_returns_same_hex_digest() {
    let doc = doc_id();
    let first = ChunkId::fingerprint(&doc, 3);
    let second = ChunkId::fingerprint(&doc, 3);

    assert_eq!(first, second);
    assert_eq!(first.len(), 64);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn given_different_indices_when_fingerprinting_then_digests_differ() {
    let doc = doc_id();
    assert_ne!(ChunkId::fingerprint(&doc, 0), ChunkId::fingerprint(&doc, 1));
}

#[test]
fn given_blocks_across_pages_when_building_chunk_then_pages_are_sorted_and_deduplicated() {
    let doc = doc_id();
    let blocks = vec![
        Block::new(3, "third page paragraph"),
        Block::new(2, "second page paragraph"),
        Block::new(3, "another third page paragraph"),
    ];

    let chunk = Chunk::from_blocks(&doc, 0, &blocks, 12, Vec::new(), None);

    assert_eq!(chunk.pages_covered, vec![2, 3]);
    assert_eq!(
        chunk.text,
        "third page paragraph\n\nsecond page paragraph\n\nanother third page paragraph"
    );
    assert_eq!(chunk.chunk_id, ChunkId::new(&doc, 0));
    assert_eq!(chunk.token_count, 12);
}

#[test]
fn given_chunk_with_metadata_when_serializing_then_metadata_fields_are_flattened() {
    let doc = DocumentId::from_raw("doc");
    let metadata = ChunkMetadata {
        title: Some("Deep Work".to_string()),
        authors: vec!["Cal Newport".to_string()],
        year: Some(2016),
        doc_type: Some(DocType::Book),
        tags: vec!["focus".to_string()],
        source_path: Some("books/deep_work.pdf".to_string()),
    };
    let anchors = vec![Anchor {
        page: 1,
        start_snippet: "Para one.".to_string(),
        end_snippet: "Para one.".to_string(),
    }];
    let chunk = Chunk::from_blocks(
        &doc,
        0,
        &[Block::new(1, "Para one.")],
        2,
        anchors,
        Some(metadata),
    );

    let value = serde_json::to_value(&chunk).unwrap();

    assert_eq!(value["document_id"], "doc");
    assert_eq!(value["chunk_id"], "doc_0");
    assert_eq!(value["chunk_index"], 0);
    assert_eq!(value["pages_covered"], serde_json::json!([1]));
    assert_eq!(value["anchors"][0]["start_snippet"], "Para one.");
    assert_eq!(value["title"], "Deep Work");
    assert_eq!(value["doc_type"], "book");
    assert_eq!(value["year"], 2016);
    assert!(value.get("metadata").is_none());
}

#[test]
fn given_chunk_without_metadata_when_serializing_then_no_metadata_keys_are_written() {
    let doc = DocumentId::from_raw("doc");
    let chunk = Chunk::from_blocks(&doc, 1, &[Block::new(4, "text")], 1, Vec::new(), None);

    let value = serde_json::to_value(&chunk).unwrap();

    assert!(value.get("title").is_none());
    assert!(value.get("authors").is_none());
    assert_eq!(value["chunk_id"], "doc_1");
}
