mod chunk_sink;
mod document_parser;
mod metadata_store;
mod progress_reporter;
mod text_cleaner;
mod token_estimator;

pub use chunk_sink::{ChunkSink, ChunkSinkError, ChunkSinkFactory};
pub use document_parser::{DocumentParser, ParseError};
pub use metadata_store::{MetadataStore, MetadataStoreError};
pub use progress_reporter::{ProgressReporter, ProgressSignal};
pub use text_cleaner::TextCleaner;
pub use token_estimator::TokenEstimator;
