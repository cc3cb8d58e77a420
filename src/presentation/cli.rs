use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::domain::{ParsedDocument, TextSpan};

/// Span-level PDF parsing and citation-anchored chunking.
#[derive(Debug, Parser)]
#[command(name = "folio", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a PDF and print a JSON summary of its pages and spans.
    Parse {
        pdf: PathBuf,
        /// Include every span record, not just per-page counts.
        #[arg(long)]
        spans: bool,
    },
    /// Parse, gate on metadata, and chunk one PDF.
    Ingest { pdf: PathBuf },
    /// Ingest every PDF in a directory.
    Reindex {
        /// Defaults to `paths.pdf_dir`.
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
pub struct ParseSummary<'a> {
    pub file_path: String,
    pub file_name: &'a str,
    pub file_size_bytes: u64,
    pub content_hash: &'a str,
    pub page_count: usize,
    pub pages: Vec<PageSummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct PageSummary<'a> {
    pub page_number: u32,
    pub text_chars: usize,
    pub span_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spans: Option<&'a [TextSpan]>,
}

impl<'a> ParseSummary<'a> {
    pub fn new(document: &'a ParsedDocument, include_spans: bool) -> Self {
        Self {
            file_path: document.file_path.display().to_string(),
            file_name: &document.file_name,
            file_size_bytes: document.file_size_bytes,
            content_hash: document.content_hash.as_str(),
            page_count: document.page_count(),
            pages: document
                .pages
                .iter()
                .map(|page| PageSummary {
                    page_number: page.page_number,
                    text_chars: page.text.chars().count(),
                    span_count: page.spans.len(),
                    spans: include_spans.then_some(page.spans.as_slice()),
                })
                .collect(),
        }
    }
}
