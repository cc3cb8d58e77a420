use crate::domain::{Chunk, DocumentId};

/// Append-only destination for finalized chunks.
///
/// A sink is owned by exactly one builder for the duration of one document.
pub trait ChunkSink {
    fn write(&mut self, chunk: &Chunk) -> Result<(), ChunkSinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ChunkSinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Opens one exclusively-owned sink per document.
pub trait ChunkSinkFactory: Send + Sync {
    fn open(&self, document_id: &DocumentId) -> Result<Box<dyn ChunkSink + Send>, ChunkSinkError>;

    /// Human-readable location of the document's chunk stream.
    fn location(&self, document_id: &DocumentId) -> String;
}
