use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use folio::application::ports::{DocumentParser, ProgressSignal};
use folio::application::services::{
    BoxedProgress, IngestionOutcome, IngestionService, StreamingChunkBuilder,
};
use folio::infrastructure::observability::{TracingConfig, init_tracing};
use folio::infrastructure::storage::{JsonMetadataStore, JsonlSinkFactory};
use folio::infrastructure::text_processing::{
    PdfSpanParser, TextSanitizer, TokenEstimatorFactory,
};
use folio::presentation::cli::ParseSummary;
use folio::presentation::{Cli, Command, Environment, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(TracingConfig::from_settings(
        environment.as_str(),
        &settings.logging,
    ));

    let parser = Arc::new(PdfSpanParser::new());

    if let Command::Parse { pdf, spans } = &cli.command {
        let path = pdf.clone();
        let parser = Arc::clone(&parser);
        let document = tokio::task::spawn_blocking(move || parser.parse(&path))
            .await
            .context("Parser task failed")??;
        let summary = ParseSummary::new(&document, *spans);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let estimator = TokenEstimatorFactory::create(
        settings.chunking.estimator,
        settings.chunking.chars_per_token,
    );
    let chunk_builder = Arc::new(StreamingChunkBuilder::new(
        settings.chunking.to_options(),
        estimator,
    ));

    let service = IngestionService::new(
        parser,
        Arc::new(TextSanitizer::new()),
        Arc::new(JsonMetadataStore::new(&settings.paths.metadata_dir)),
        Arc::new(JsonlSinkFactory::new(&settings.paths.chunks_dir)),
        chunk_builder,
        settings.ingestion.to_options(),
    );

    match cli.command {
        Command::Parse { .. } => {}
        Command::Ingest { pdf } => {
            let progress: BoxedProgress = Box::new(|percent: f32, message: &str| {
                tracing::info!(percent, "{}", message);
                Ok::<(), ProgressSignal>(())
            });
            match service.ingest(&pdf, Some(progress)).await? {
                IngestionOutcome::Chunked(report) => tracing::info!(
                    document_id = %report.document_id,
                    pages = report.page_count,
                    chunks = report.chunk_count,
                    output = %report.output_path,
                    "Ingestion complete"
                ),
                IngestionOutcome::AwaitingMetadata { document_id } => tracing::warn!(
                    document_id = %document_id,
                    metadata_dir = %settings.paths.metadata_dir.display(),
                    "Metadata draft pending; mark it ready and re-run ingest"
                ),
            }
        }
        Command::Reindex { dir } => {
            let dir = dir.unwrap_or_else(|| settings.paths.pdf_dir.clone());
            let report = service.reindex(&dir).await?;
            for (path, error) in &report.failures {
                tracing::error!(
                    path = %path.display(),
                    stage = ?error.stage(),
                    page_index = ?error.page_index(),
                    error = %error,
                    "Document failed"
                );
            }
            if !report.failures.is_empty() {
                anyhow::bail!("{} document(s) failed to ingest", report.failures.len());
            }
        }
    }

    Ok(())
}
