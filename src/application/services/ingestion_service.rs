use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::StreamExt;
use tracing::Instrument;

use crate::application::ports::{
    ChunkSinkError, ChunkSinkFactory, DocumentParser, MetadataStore, MetadataStoreError,
    ParseError, ProgressReporter, TextCleaner,
};
use crate::domain::{ChunkMetadata, DocumentId, DocumentMetadata, PageText};

use super::chunk_builder::{ChunkingError, StreamingChunkBuilder};

pub type BoxedProgress = Box<dyn ProgressReporter + Send>;

#[derive(Debug, Clone)]
pub struct IngestionOptions {
    /// Skip chunking until the document's metadata is marked ready.
    pub require_ready_metadata: bool,
    /// Documents processed at once by `reindex`.
    pub concurrency: usize,
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            require_ready_metadata: true,
            concurrency: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestionOutcome {
    Chunked(IngestionReport),
    /// Metadata is missing or still a draft; a draft is saved when missing.
    AwaitingMetadata { document_id: DocumentId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionReport {
    pub document_id: DocumentId,
    pub page_count: usize,
    pub chunk_count: usize,
    pub output_path: String,
}

#[derive(Debug, Default)]
pub struct ReindexReport {
    pub successes: usize,
    pub skipped: usize,
    pub failures: Vec<(PathBuf, IngestionError)>,
}

/// Parse → metadata gate → clean → stream chunks, one document at a time.
pub struct IngestionService<P: ?Sized, M: ?Sized> {
    parser: Arc<P>,
    cleaner: Arc<dyn TextCleaner>,
    metadata_store: Arc<M>,
    sink_factory: Arc<dyn ChunkSinkFactory>,
    chunk_builder: Arc<StreamingChunkBuilder>,
    options: IngestionOptions,
}

impl<P, M> IngestionService<P, M>
where
    P: DocumentParser + ?Sized + 'static,
    M: MetadataStore + ?Sized,
{
    pub fn new(
        parser: Arc<P>,
        cleaner: Arc<dyn TextCleaner>,
        metadata_store: Arc<M>,
        sink_factory: Arc<dyn ChunkSinkFactory>,
        chunk_builder: Arc<StreamingChunkBuilder>,
        options: IngestionOptions,
    ) -> Self {
        Self {
            parser,
            cleaner,
            metadata_store,
            sink_factory,
            chunk_builder,
            options,
        }
    }

    #[tracing::instrument(skip(self, path, progress), fields(path = %path.display()))]
    pub async fn ingest(
        &self,
        path: &Path,
        mut progress: Option<BoxedProgress>,
    ) -> Result<IngestionOutcome, IngestionError> {
        report_status(&mut progress, &format!("ingest_start | path={}", path.display()));

        let parser = Arc::clone(&self.parser);
        let owned_path = path.to_path_buf();
        let parsed = tokio::task::spawn_blocking(move || parser.parse(&owned_path))
            .await
            .map_err(|e| IngestionError::Task(e.to_string()))??;

        let document_id = parsed.content_hash.clone();
        let page_count = parsed.page_count();
        report_status(
            &mut progress,
            &format!("parsed_pdf | doc_id={} pages={}", document_id, page_count),
        );

        let metadata = match self.metadata_store.load(&document_id).await? {
            Some(metadata) => metadata,
            None => {
                let draft = DocumentMetadata::draft(document_id.clone(), path);
                self.metadata_store.save(&draft).await?;
                tracing::info!(document_id = %document_id, "Saved draft metadata; awaiting review");
                return Ok(IngestionOutcome::AwaitingMetadata { document_id });
            }
        };

        if self.options.require_ready_metadata && !metadata.is_ready() {
            tracing::info!(document_id = %document_id, "Skipping: metadata not ready");
            return Ok(IngestionOutcome::AwaitingMetadata { document_id });
        }

        let chunk_metadata = ChunkMetadata::from(&metadata);
        let output_path = self.sink_factory.location(&document_id);
        let mut sink = self
            .sink_factory
            .open(&document_id)
            .map_err(IngestionError::SinkOpen)?;

        report_status(&mut progress, "cleaning_started");
        report_status(&mut progress, "chunking_started");

        let cleaner = Arc::clone(&self.cleaner);
        let builder = Arc::clone(&self.chunk_builder);
        let doc_id = document_id.clone();
        let (chunk_result, mut progress) = tokio::task::spawn_blocking(move || {
            let pages = parsed
                .pages
                .into_iter()
                .map(|page| PageText::new(page.page_number, cleaner.clean(&page.text)));
            let reporter = progress
                .as_mut()
                .map(|p| p.as_mut() as &mut dyn ProgressReporter);
            let result = builder.build(&doc_id, pages, Some(&chunk_metadata), sink.as_mut(), reporter);
            (result, progress)
        })
        .await
        .map_err(|e| IngestionError::Task(e.to_string()))?;

        let chunk_count = chunk_result?;
        report_status(&mut progress, &format!("chunking_done | output={}", output_path));
        report_status(&mut progress, "ingest_done");

        Ok(IngestionOutcome::Chunked(IngestionReport {
            document_id,
            page_count,
            chunk_count,
            output_path,
        }))
    }

    /// Ingests every `*.pdf` in `dir` independently; one failure never stops the rest.
    #[tracing::instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub async fn reindex(&self, dir: &Path) -> Result<ReindexReport, IngestionError> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut pdfs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_pdf = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false);
            if is_pdf {
                pdfs.push(path);
            }
        }
        pdfs.sort();

        let total = pdfs.len();
        tracing::info!(total, "Starting reindex");

        let results: Vec<(PathBuf, Result<IngestionOutcome, IngestionError>)> =
            futures::stream::iter(pdfs)
                .map(|path| {
                    let span = tracing::info_span!("ingestion_job", path = %path.display());
                    async move {
                        let result = self.ingest(&path, None).await;
                        (path, result)
                    }
                    .instrument(span)
                })
                .buffer_unordered(self.options.concurrency.max(1))
                .collect()
                .await;

        let mut report = ReindexReport::default();
        for (path, result) in results {
            match result {
                Ok(IngestionOutcome::Chunked(_)) => report.successes += 1,
                Ok(IngestionOutcome::AwaitingMetadata { .. }) => report.skipped += 1,
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Ingestion failed");
                    report.failures.push((path, e));
                }
            }
        }
        report.failures.sort_by(|a, b| a.0.cmp(&b.0));

        tracing::info!(
            successes = report.successes,
            skipped = report.skipped,
            failures = report.failures.len(),
            "Reindex complete"
        );
        Ok(report)
    }
}

fn report_status(progress: &mut Option<BoxedProgress>, message: &str) {
    tracing::info!("{}", message);
    if let Some(reporter) = progress.as_mut() {
        if let Err(e) = reporter.report(0.0, message) {
            tracing::warn!(error = %e, "Status callback failed; continuing");
        }
    }
}

/// Pipeline stage a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionStage {
    Parse,
    Metadata,
    Chunk,
    Write,
    Runtime,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("parse: {0}")]
    Parse(#[from] ParseError),
    #[error("metadata: {0}")]
    Metadata(#[from] MetadataStoreError),
    #[error("chunking: {0}")]
    Chunking(#[from] ChunkingError),
    #[error("opening chunk sink: {0}")]
    SinkOpen(ChunkSinkError),
    #[error("background task failed: {0}")]
    Task(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestionError {
    pub fn stage(&self) -> IngestionStage {
        match self {
            IngestionError::Parse(_) => IngestionStage::Parse,
            IngestionError::Metadata(_) => IngestionStage::Metadata,
            IngestionError::Chunking(ChunkingError::Cancelled { .. }) => IngestionStage::Chunk,
            IngestionError::Chunking(ChunkingError::Sink { .. }) => IngestionStage::Write,
            IngestionError::SinkOpen(_) => IngestionStage::Write,
            IngestionError::Task(_) | IngestionError::Io(_) => IngestionStage::Runtime,
        }
    }

    /// Zero-based page index for page-local parse failures.
    pub fn page_index(&self) -> Option<usize> {
        match self {
            IngestionError::Parse(e) => e.page_index(),
            _ => None,
        }
    }
}
