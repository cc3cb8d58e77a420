use std::path::{Path, PathBuf};

use crate::domain::ParsedDocument;

/// Turns a source file into per-page text and span geometry.
///
/// Parsing is all-or-nothing: a failure on any page aborts the whole document.
pub trait DocumentParser: Send + Sync {
    fn parse(&self, path: &Path) -> Result<ParsedDocument, ParseError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("document not found: {0}")]
    NotFound(PathBuf),
    #[error("cannot open document {path}: {reason}")]
    Open { path: PathBuf, reason: String },
    #[error("parsing failed at page {page_number} (index {page_index}): {reason}")]
    PageFailed {
        page_index: usize,
        page_number: u32,
        reason: String,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Zero-based index of the page that failed, when the failure is page-local.
    pub fn page_index(&self) -> Option<usize> {
        match self {
            ParseError::PageFailed { page_index, .. } => Some(*page_index),
            _ => None,
        }
    }
}
