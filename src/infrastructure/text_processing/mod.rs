mod content_hash;
mod page_linearizer;
mod pdf_span_parser;
mod text_sanitizer;
mod token_estimator_factory;

pub use content_hash::hash_file;
pub use page_linearizer::PageLinearizer;
pub use pdf_span_parser::{DEFAULT_LINE_TOLERANCE, PdfSpanParser};
pub use text_sanitizer::{TextSanitizer, sanitize_extracted_text};
pub use token_estimator_factory::TokenEstimatorFactory;
