use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::application::ports::{ChunkSink, ChunkSinkError, ChunkSinkFactory};
use crate::domain::{Chunk, DocumentId};

/// Writes one JSON object per line and flushes after every record, so each
/// line on disk is a complete chunk even if a later write fails.
pub struct JsonlChunkSink<W: Write> {
    writer: W,
    written: usize,
}

impl JsonlChunkSink<BufWriter<File>> {
    /// Creates (or truncates) `path`, creating parent directories as needed.
    pub fn create(path: &Path) -> Result<Self, ChunkSinkError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonlChunkSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ChunkSink for JsonlChunkSink<W> {
    fn write(&mut self, chunk: &Chunk) -> Result<(), ChunkSinkError> {
        let line = serde_json::to_string(chunk)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }
}

/// Opens `<dir>/<document_id>.jsonl` per document.
#[derive(Debug, Clone)]
pub struct JsonlSinkFactory {
    dir: PathBuf,
}

impl JsonlSinkFactory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, document_id: &DocumentId) -> PathBuf {
        self.dir.join(format!("{}.jsonl", document_id))
    }
}

impl ChunkSinkFactory for JsonlSinkFactory {
    fn open(&self, document_id: &DocumentId) -> Result<Box<dyn ChunkSink + Send>, ChunkSinkError> {
        let sink = JsonlChunkSink::create(&self.path_for(document_id))?;
        Ok(Box::new(sink))
    }

    fn location(&self, document_id: &DocumentId) -> String {
        self.path_for(document_id).display().to_string()
    }
}
