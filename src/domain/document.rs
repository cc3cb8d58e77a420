use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::DocumentId;

/// Result of parsing one source file: per-page text plus span geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub file_path: PathBuf,
    pub file_name: String,
    pub file_size_bytes: u64,
    pub content_hash: DocumentId,
    pub pages: Vec<PageParse>,
}

impl ParsedDocument {
    pub fn id(&self) -> &DocumentId {
        &self.content_hash
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page texts in page order, ready for cleaning and chunking.
    pub fn page_texts(&self) -> impl Iterator<Item = PageText> + '_ {
        self.pages
            .iter()
            .map(|p| PageText::new(p.page_number, p.text.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageParse {
    /// 1-based.
    pub page_number: u32,
    pub text: String,
    pub spans: Vec<TextSpan>,
}

impl PageParse {
    /// Text covered by `span`, sliced out of the page text by character offsets.
    pub fn span_text(&self, span: &TextSpan) -> String {
        self.text
            .chars()
            .skip(span.start_offset)
            .take(span.end_offset.saturating_sub(span.start_offset))
            .collect()
    }

    /// Spans overlapping the character range `[start, end)`.
    pub fn spans_in_range(&self, start: usize, end: usize) -> impl Iterator<Item = &TextSpan> {
        self.spans
            .iter()
            .filter(move |s| s.start_offset < end && s.end_offset > start)
    }
}

/// A contiguous run of text as laid out on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    pub bbox: BoundingBox,
    /// Character offset into the page text.
    pub start_offset: usize,
    /// Exclusive.
    pub end_offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).abs()
    }

    pub fn center_y(&self) -> f32 {
        (self.y0 + self.y1) / 2.0
    }
}

/// One page of (usually cleaned) text flowing into the chunk builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

impl PageText {
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }
}

impl From<(u32, String)> for PageText {
    fn from((page_number, text): (u32, String)) -> Self {
        Self { page_number, text }
    }
}
