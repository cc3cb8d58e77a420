mod json_metadata_store;
mod jsonl_chunk_sink;
mod memory_chunk_sink;

pub use json_metadata_store::JsonMetadataStore;
pub use jsonl_chunk_sink::{JsonlChunkSink, JsonlSinkFactory};
pub use memory_chunk_sink::{MemoryChunkSink, MemorySinkFactory};
