use async_trait::async_trait;

use crate::domain::{DocumentId, DocumentMetadata, MetadataValidationError};

#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn load(&self, doc_id: &DocumentId)
    -> Result<Option<DocumentMetadata>, MetadataStoreError>;

    async fn save(&self, metadata: &DocumentMetadata) -> Result<(), MetadataStoreError>;

    async fn exists(&self, doc_id: &DocumentId) -> Result<bool, MetadataStoreError>;

    async fn delete(&self, doc_id: &DocumentId) -> Result<bool, MetadataStoreError>;

    async fn list(&self) -> Result<Vec<DocumentMetadata>, MetadataStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MetadataStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed metadata for {doc_id}: {reason}")]
    Malformed { doc_id: String, reason: String },
    #[error("invalid metadata: {0}")]
    Invalid(#[from] MetadataValidationError),
}
