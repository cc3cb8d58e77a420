use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::ports::{MetadataStore, MetadataStoreError};
use crate::domain::{DocumentId, DocumentMetadata};

/// One pretty-printed JSON file per document: `<dir>/<doc_id>.json`.
#[derive(Debug, Clone)]
pub struct JsonMetadataStore {
    dir: PathBuf,
}

impl JsonMetadataStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, doc_id: &DocumentId) -> PathBuf {
        self.dir.join(format!("{}.json", doc_id))
    }
}

#[async_trait]
impl MetadataStore for JsonMetadataStore {
    async fn load(
        &self,
        doc_id: &DocumentId,
    ) -> Result<Option<DocumentMetadata>, MetadataStoreError> {
        let raw = match tokio::fs::read_to_string(self.path_for(doc_id)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| MetadataStoreError::Malformed {
                doc_id: doc_id.to_string(),
                reason: e.to_string(),
            })
    }

    /// Ready metadata is validated first; drafts are stored as-is.
    #[tracing::instrument(skip(self, metadata), fields(document_id = %metadata.doc_id))]
    async fn save(&self, metadata: &DocumentMetadata) -> Result<(), MetadataStoreError> {
        if metadata.is_ready() {
            metadata.validate()?;
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(metadata).map_err(|e| {
            MetadataStoreError::Malformed {
                doc_id: metadata.doc_id.to_string(),
                reason: e.to_string(),
            }
        })?;
        tokio::fs::write(self.path_for(&metadata.doc_id), json).await?;

        tracing::debug!(status = ?metadata.status, "Metadata saved");
        Ok(())
    }

    async fn exists(&self, doc_id: &DocumentId) -> Result<bool, MetadataStoreError> {
        Ok(tokio::fs::try_exists(self.path_for(doc_id)).await?)
    }

    async fn delete(&self, doc_id: &DocumentId) -> Result<bool, MetadataStoreError> {
        match tokio::fs::remove_file(self.path_for(doc_id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<DocumentMetadata>, MetadataStoreError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut all = Vec::with_capacity(paths.len());
        for path in paths {
            let parsed = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| e.to_string())
                .and_then(|raw| {
                    serde_json::from_str::<DocumentMetadata>(&raw).map_err(|e| e.to_string())
                });
            match parsed {
                Ok(metadata) => all.push(metadata),
                Err(reason) => {
                    tracing::warn!(path = %path.display(), %reason, "Skipping unreadable metadata file");
                }
            }
        }
        Ok(all)
    }
}
