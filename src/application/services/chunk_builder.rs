use std::sync::Arc;

use crate::application::ports::{
    ChunkSink, ChunkSinkError, ProgressReporter, ProgressSignal, TokenEstimator,
};
use crate::domain::{Block, Chunk, ChunkMetadata, DocumentId, PageText};

use super::anchor_builder::{DEFAULT_ANCHOR_WINDOW_CHARS, build_anchors};
use super::paragraph_splitter::split_paragraphs;
use super::token_counter::CharRatioEstimator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingOptions {
    /// Soft upper bound on a chunk's estimated token count.
    pub target_tokens: usize,
    /// Token budget carried from the tail of a flushed chunk into the next one.
    /// The newest block is always carried, even past this budget.
    pub overlap_tokens: usize,
    /// Paragraphs with fewer characters are dropped.
    pub min_block_chars: usize,
    pub anchor_window_chars: usize,
    /// Emit a progress heartbeat every this many paragraphs within a page. Zero disables it.
    pub progress_every: usize,
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self {
            target_tokens: 1000,
            overlap_tokens: 180,
            min_block_chars: 20,
            anchor_window_chars: DEFAULT_ANCHOR_WINDOW_CHARS,
            progress_every: 1000,
        }
    }
}

/// Single-pass page → paragraph → chunk builder.
///
/// Holds at most one chunk's worth of paragraphs plus the overlap tail, and
/// hands each chunk to the sink as soon as it is complete. Output is a pure
/// function of the page stream and the options.
pub struct StreamingChunkBuilder {
    options: ChunkingOptions,
    estimator: Arc<dyn TokenEstimator>,
}

impl StreamingChunkBuilder {
    pub fn new(options: ChunkingOptions, estimator: Arc<dyn TokenEstimator>) -> Self {
        Self { options, estimator }
    }

    pub fn options(&self) -> &ChunkingOptions {
        &self.options
    }

    /// Streams `pages` into `sink` and returns the number of chunks written.
    ///
    /// On a sink failure or a cancellation request every chunk written so far
    /// stays valid and nothing further is written.
    #[tracing::instrument(skip_all, fields(document_id = %document_id))]
    pub fn build<I, S>(
        &self,
        document_id: &DocumentId,
        pages: I,
        metadata: Option<&ChunkMetadata>,
        sink: &mut S,
        mut progress: Option<&mut dyn ProgressReporter>,
    ) -> Result<usize, ChunkingError>
    where
        I: IntoIterator<Item = PageText>,
        S: ChunkSink + ?Sized,
    {
        let pages = pages.into_iter();
        let expected_pages = pages.size_hint().1.filter(|n| *n > 0);
        let target = self.options.target_tokens;

        let mut window = Window::default();
        let mut chunk_index = 0usize;
        let mut pages_seen = 0usize;

        for page in pages {
            pages_seen += 1;
            let percent = percent_of(pages_seen - 1, expected_pages);
            let mut paragraph_count = 0usize;

            for paragraph in split_paragraphs(&page.text) {
                if paragraph.chars().count() < self.options.min_block_chars {
                    continue;
                }
                let tokens = self.estimator.estimate(paragraph);

                if !window.is_empty() && window.tokens + tokens > target {
                    self.emit(document_id, chunk_index, &window, metadata, sink)?;
                    chunk_index += 1;
                    window.retain_overlap(self.options.overlap_tokens);
                }
                window.push(Block::new(page.page_number, paragraph), tokens);

                paragraph_count += 1;
                if self.options.progress_every > 0
                    && paragraph_count % self.options.progress_every == 0
                {
                    let message = format!(
                        "Page {}: processed {} paragraphs",
                        page.page_number, paragraph_count
                    );
                    notify(progress.as_deref_mut(), percent, &message, chunk_index)?;
                }
            }

            let message = format!("Processed page {}", page.page_number);
            notify(
                progress.as_deref_mut(),
                percent_of(pages_seen, expected_pages),
                &message,
                chunk_index,
            )?;
        }

        if !window.is_empty() {
            self.emit(document_id, chunk_index, &window, metadata, sink)?;
            chunk_index += 1;
        }

        tracing::info!(
            chunk_count = chunk_index,
            page_count = pages_seen,
            "Chunking complete"
        );

        let message = format!("Chunking complete: {} chunks", chunk_index);
        if let Err(ChunkingError::Cancelled { .. }) =
            notify(progress.as_deref_mut(), 100.0, &message, chunk_index)
        {
            tracing::debug!("Cancellation requested after the final chunk; nothing to stop");
        }

        Ok(chunk_index)
    }

    fn emit<S>(
        &self,
        document_id: &DocumentId,
        chunk_index: usize,
        window: &Window,
        metadata: Option<&ChunkMetadata>,
        sink: &mut S,
    ) -> Result<(), ChunkingError>
    where
        S: ChunkSink + ?Sized,
    {
        let anchors = build_anchors(&window.blocks, self.options.anchor_window_chars);
        let chunk = Chunk::from_blocks(
            document_id,
            chunk_index,
            &window.blocks,
            window.tokens,
            anchors,
            metadata.cloned(),
        );

        tracing::debug!(
            chunk_index,
            token_count = chunk.token_count,
            blocks = window.blocks.len(),
            pages = ?chunk.pages_covered,
            "Flushing chunk"
        );

        sink.write(&chunk).map_err(|source| ChunkingError::Sink {
            chunk_index,
            chunks_written: chunk_index,
            source,
        })
    }
}

impl Default for StreamingChunkBuilder {
    fn default() -> Self {
        Self::new(
            ChunkingOptions::default(),
            Arc::new(CharRatioEstimator::default()),
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChunkingError {
    #[error("writing chunk {chunk_index} failed after {chunks_written} chunks: {source}")]
    Sink {
        chunk_index: usize,
        chunks_written: usize,
        #[source]
        source: ChunkSinkError,
    },
    #[error("chunking cancelled after {chunks_written} chunks")]
    Cancelled { chunks_written: usize },
}

impl ChunkingError {
    pub fn chunks_written(&self) -> usize {
        match self {
            ChunkingError::Sink { chunks_written, .. } => *chunks_written,
            ChunkingError::Cancelled { chunks_written } => *chunks_written,
        }
    }
}

/// Blocks of the chunk under construction, with their token estimates.
#[derive(Debug, Default)]
struct Window {
    blocks: Vec<Block>,
    block_tokens: Vec<usize>,
    tokens: usize,
}

impl Window {
    fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn push(&mut self, block: Block, tokens: usize) {
        self.blocks.push(block);
        self.block_tokens.push(tokens);
        self.tokens += tokens;
    }

    /// Keeps the newest blocks whose estimates fit `overlap_tokens`, and always
    /// the newest one, unless the flushed window held a single block.
    fn retain_overlap(&mut self, overlap_tokens: usize) {
        if self.blocks.len() <= 1 {
            self.clear();
            return;
        }

        let mut kept = 0usize;
        let mut total = 0usize;
        for &tokens in self.block_tokens.iter().rev() {
            if kept > 0 && total + tokens > overlap_tokens {
                break;
            }
            kept += 1;
            total += tokens;
        }

        self.drop_front(self.blocks.len() - kept);
    }

    fn drop_front(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        self.blocks.drain(..n);
        let removed: usize = self.block_tokens.drain(..n).sum();
        self.tokens -= removed;
    }

    fn clear(&mut self) {
        self.blocks.clear();
        self.block_tokens.clear();
        self.tokens = 0;
    }
}

fn percent_of(done: usize, expected: Option<usize>) -> f32 {
    match expected {
        Some(total) => ((done as f32 / total as f32) * 100.0).min(99.0),
        None => 0.0,
    }
}

fn notify<'a, 'b>(
    progress: Option<&'a mut (dyn ProgressReporter + 'b)>,
    percent: f32,
    message: &str,
    chunks_written: usize,
) -> Result<(), ChunkingError> {
    let Some(reporter) = progress else {
        return Ok(());
    };
    match reporter.report(percent, message) {
        Ok(()) => Ok(()),
        Err(ProgressSignal::Cancel) => {
            tracing::info!(chunks_written, "Chunking cancelled by progress callback");
            Err(ChunkingError::Cancelled { chunks_written })
        }
        Err(ProgressSignal::Failed(reason)) => {
            tracing::warn!(error = %reason, "Progress callback failed; continuing");
            Ok(())
        }
    }
}
