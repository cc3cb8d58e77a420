use std::path::Path;

use pdf_oxide::PdfDocument;

use crate::application::ports::{DocumentParser, ParseError};
use crate::domain::{BoundingBox, PageParse, ParsedDocument};

use super::content_hash::hash_file;
use super::page_linearizer::PageLinearizer;

/// Fraction of a span's height its vertical center may drift before the
/// span is treated as starting a new line.
pub const DEFAULT_LINE_TOLERANCE: f32 = 0.5;

/// Span-level PDF parser backed by `pdf_oxide`.
///
/// Spans arrive in reading order; lines are recovered from their geometry.
pub struct PdfSpanParser {
    line_tolerance: f32,
}

impl PdfSpanParser {
    pub fn new() -> Self {
        Self {
            line_tolerance: DEFAULT_LINE_TOLERANCE,
        }
    }

    pub fn with_line_tolerance(line_tolerance: f32) -> Self {
        Self { line_tolerance }
    }

    /// One-based page number for a zero-based index.
    pub fn page_number(page_index: usize) -> Result<u32, ParseError> {
        page_index
            .checked_add(1)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| ParseError::PageFailed {
                page_index,
                page_number: u32::MAX,
                reason: format!("page index {page_index} is out of range"),
            })
    }

    fn parse_page(
        &self,
        doc: &mut PdfDocument,
        page_index: usize,
    ) -> Result<PageParse, ParseError> {
        let page_number = Self::page_number(page_index)?;
        let spans = doc
            .extract_spans(page_index)
            .map_err(|e| ParseError::PageFailed {
                page_index,
                page_number,
                reason: e.to_string(),
            })?;

        let mut linearizer = PageLinearizer::new();
        let mut previous: Option<BoundingBox> = None;

        for span in &spans {
            let bbox = BoundingBox::new(
                span.bbox.left(),
                span.bbox.top(),
                span.bbox.right(),
                span.bbox.bottom(),
            );
            if let Some(prev) = previous {
                if self.starts_new_line(&prev, &bbox) {
                    linearizer.end_line();
                }
            }
            linearizer.push_span(&span.text, bbox);
            previous = Some(bbox);
        }
        if previous.is_some() {
            linearizer.end_line();
        }

        Ok(linearizer.finish(page_number))
    }

    fn starts_new_line(&self, prev: &BoundingBox, next: &BoundingBox) -> bool {
        let height = prev.height().max(next.height()).max(f32::EPSILON);
        (next.center_y() - prev.center_y()).abs() > height * self.line_tolerance
    }
}

impl Default for PdfSpanParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for PdfSpanParser {
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    fn parse(&self, path: &Path) -> Result<ParsedDocument, ParseError> {
        if !path.is_file() {
            return Err(ParseError::NotFound(path.to_path_buf()));
        }

        let (content_hash, file_size_bytes) = hash_file(path)?;

        let mut doc = PdfDocument::open(path).map_err(|e| ParseError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let page_count = doc.page_count().map_err(|e| ParseError::Open {
            path: path.to_path_buf(),
            reason: format!("failed to read page count: {e}"),
        })?;

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            let page = self.parse_page(&mut doc, page_index)?;
            tracing::debug!(
                page_number = page.page_number,
                spans = page.spans.len(),
                "Parsed page"
            );
            pages.push(page);
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::info!(
            document_id = %content_hash,
            page_count,
            file_size_bytes,
            "PDF span extraction complete"
        );

        Ok(ParsedDocument {
            file_path: path.to_path_buf(),
            file_name,
            file_size_bytes,
            content_hash,
            pages,
        })
    }
}
