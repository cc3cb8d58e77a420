mod anchor_builder;
mod chunk_builder;
mod ingestion_service;
mod paragraph_splitter;
mod token_counter;

pub use anchor_builder::{DEFAULT_ANCHOR_WINDOW_CHARS, build_anchors};
pub use chunk_builder::{ChunkingError, ChunkingOptions, StreamingChunkBuilder};
pub use ingestion_service::{
    BoxedProgress, IngestionError, IngestionOptions, IngestionOutcome, IngestionReport,
    IngestionService, IngestionStage, ReindexReport,
};
pub use paragraph_splitter::{Paragraphs, split_paragraphs};
pub use token_counter::{
    CharRatioEstimator, DEFAULT_CHARS_PER_TOKEN, TiktokenEstimator, count_tokens,
};
