use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};

use super::{DocumentId, DocumentMetadata, DocType};

/// One finalized, self-contained chunk record as written to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub document_id: DocumentId,
    pub chunk_id: ChunkId,
    pub chunk_index: usize,
    pub text: String,
    pub token_count: usize,
    pub pages_covered: Vec<u32>,
    pub anchors: Vec<Anchor>,
    /// Flattened into the record. A record with no metadata fields reads back as `None`.
    #[serde(flatten, deserialize_with = "metadata_or_none")]
    pub metadata: Option<ChunkMetadata>,
}

impl Chunk {
    /// Assembles a chunk from the blocks of one builder window.
    pub fn from_blocks(
        document_id: &DocumentId,
        chunk_index: usize,
        blocks: &[Block],
        token_count: usize,
        anchors: Vec<Anchor>,
        metadata: Option<ChunkMetadata>,
    ) -> Self {
        let text = blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let pages_covered: Vec<u32> = blocks
            .iter()
            .map(|b| b.page_number)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self {
            document_id: document_id.clone(),
            chunk_id: ChunkId::new(document_id, chunk_index),
            chunk_index,
            text,
            token_count,
            pages_covered,
            anchors,
            metadata,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(String);

impl ChunkId {
    pub fn new(document_id: &DocumentId, chunk_index: usize) -> Self {
        Self(format!("{}_{}", document_id, chunk_index))
    }

    /// Hex SHA-256 of `"<document_id>:<chunk_index>"`, for stores that want fixed-width keys.
    pub fn fingerprint(document_id: &DocumentId, chunk_index: usize) -> String {
        format!(
            "{:x}",
            Sha256::digest(format!("{}:{}", document_id, chunk_index).as_bytes())
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-page locational hint inside a chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub page: u32,
    pub start_snippet: String,
    pub end_snippet: String,
}

/// A paragraph inside the builder's working window, tagged with its page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub page_number: u32,
    pub text: String,
}

impl Block {
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }
}

/// Document-level fields copied onto every chunk of that document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    pub year: Option<i32>,
    pub doc_type: Option<DocType>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub source_path: Option<String>,
}

impl ChunkMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.authors.is_empty()
            && self.year.is_none()
            && self.doc_type.is_none()
            && self.tags.is_empty()
            && self.source_path.is_none()
    }
}

fn metadata_or_none<'de, D>(deserializer: D) -> Result<Option<ChunkMetadata>, D::Error>
where
    D: Deserializer<'de>,
{
    let metadata = ChunkMetadata::deserialize(deserializer)?;
    Ok((!metadata.is_empty()).then_some(metadata))
}

impl From<&DocumentMetadata> for ChunkMetadata {
    fn from(meta: &DocumentMetadata) -> Self {
        Self {
            title: Some(meta.title.clone()),
            authors: meta.authors.clone(),
            year: meta.year,
            doc_type: meta.doc_type,
            tags: meta.tags.clone(),
            source_path: meta.source_path.clone(),
        }
    }
}
