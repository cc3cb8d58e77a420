mod chunk;
mod document;
mod document_id;
mod document_metadata;

pub use chunk::{Anchor, Block, Chunk, ChunkId, ChunkMetadata};
pub use document::{BoundingBox, PageParse, PageText, ParsedDocument, TextSpan};
pub use document_id::DocumentId;
pub use document_metadata::{DocType, DocumentMetadata, MetadataStatus, MetadataValidationError};
