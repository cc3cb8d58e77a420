use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::application::ports::{ChunkSink, ChunkSinkError, ChunkSinkFactory};
use crate::domain::{Chunk, DocumentId};

/// Collects chunks in memory; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryChunkSink {
    chunks: Arc<Mutex<Vec<Chunk>>>,
    fail_after: Option<usize>,
}

impl MemoryChunkSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `n` chunks, then fails every further write.
    pub fn failing_after(n: usize) -> Self {
        Self {
            chunks: Arc::default(),
            fail_after: Some(n),
        }
    }

    pub fn chunks(&self) -> Vec<Chunk> {
        self.chunks.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.chunks.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChunkSink for MemoryChunkSink {
    fn write(&mut self, chunk: &Chunk) -> Result<(), ChunkSinkError> {
        let mut chunks = self
            .chunks
            .lock()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        if self.fail_after.is_some_and(|n| chunks.len() >= n) {
            return Err(ChunkSinkError::Io(std::io::Error::new(
                std::io::ErrorKind::StorageFull,
                "memory sink capacity reached",
            )));
        }
        chunks.push(chunk.clone());
        Ok(())
    }
}

/// Hands out one `MemoryChunkSink` per document and keeps them for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemorySinkFactory {
    sinks: Arc<Mutex<HashMap<DocumentId, MemoryChunkSink>>>,
}

impl MemorySinkFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunks_for(&self, document_id: &DocumentId) -> Vec<Chunk> {
        self.sinks
            .lock()
            .ok()
            .and_then(|s| s.get(document_id).map(MemoryChunkSink::chunks))
            .unwrap_or_default()
    }
}

impl ChunkSinkFactory for MemorySinkFactory {
    fn open(&self, document_id: &DocumentId) -> Result<Box<dyn ChunkSink + Send>, ChunkSinkError> {
        let sink = MemoryChunkSink::new();
        let mut sinks = self
            .sinks
            .lock()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        sinks.insert(document_id.clone(), sink.clone());
        Ok(Box::new(sink))
    }

    fn location(&self, document_id: &DocumentId) -> String {
        format!("memory://{}", document_id)
    }
}
