use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::DocumentId;

/// User-curated document metadata, persisted per document id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub doc_id: DocumentId,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub year: Option<i32>,
    pub doc_type: Option<DocType>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub ingested_at: DateTime<Utc>,
    pub source_path: Option<String>,
    #[serde(default)]
    pub status: MetadataStatus,
}

impl DocumentMetadata {
    /// Prefilled draft for a freshly seen file; the title is guessed from the file name.
    pub fn draft(doc_id: DocumentId, source_path: &Path) -> Self {
        Self {
            doc_id,
            title: title_from_file_name(source_path),
            authors: Vec::new(),
            year: None,
            doc_type: Some(DocType::Other),
            tags: Vec::new(),
            ingested_at: Utc::now(),
            source_path: Some(source_path.display().to_string()),
            status: MetadataStatus::Draft,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == MetadataStatus::Ready
    }

    pub fn validate(&self) -> Result<(), MetadataValidationError> {
        if self.title.trim().is_empty() {
            return Err(MetadataValidationError::EmptyTitle);
        }
        if let Some(year) = self.year {
            let max = Utc::now().year() + 1;
            if !(1000..=max).contains(&year) {
                return Err(MetadataValidationError::YearOutOfRange { year, max });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Book,
    Paper,
    Article,
    Report,
    Other,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Book => "book",
            DocType::Paper => "paper",
            DocType::Article => "article",
            DocType::Report => "report",
            DocType::Other => "other",
        }
    }
}

impl FromStr for DocType {
    type Err = MetadataValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "book" => Ok(DocType::Book),
            "paper" => Ok(DocType::Paper),
            "article" => Ok(DocType::Article),
            "report" => Ok(DocType::Report),
            "other" => Ok(DocType::Other),
            other => Err(MetadataValidationError::UnknownDocType(other.to_string())),
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataStatus {
    #[default]
    Draft,
    Ready,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MetadataValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("year {year} is out of range (1000..={max})")]
    YearOutOfRange { year: i32, max: i32 },
    #[error("unknown doc_type: {0}")]
    UnknownDocType(String),
}

fn title_from_file_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(|word| {
            if word.chars().all(|c| !c.is_lowercase()) {
                word.to_string()
            } else {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
