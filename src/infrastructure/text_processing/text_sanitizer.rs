use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use crate::application::ports::TextCleaner;

static HYPHEN_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w+)-\n(?P<suffix>\w+)").unwrap());
static SINGLE_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\n])\n([^\n])").unwrap());
static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static HORIZONTAL_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// Page-level cleanup applied before paragraph splitting.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSanitizer;

impl TextSanitizer {
    pub fn new() -> Self {
        Self
    }
}

impl TextCleaner for TextSanitizer {
    fn clean(&self, raw: &str) -> String {
        sanitize_extracted_text(raw)
    }
}

pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw
        .nfkc()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
        .collect();
    let normalized = normalized.replace("\r\n", "\n").replace('\r', "\n");

    let de_hyphenated = HYPHEN_NEWLINE.replace_all(&normalized, "$prefix$suffix");
    let joined = join_wrapped_lines(&de_hyphenated);
    let paragraphs = EXCESS_NEWLINES.replace_all(&joined, "\n\n");
    let collapsed = HORIZONTAL_RUNS.replace_all(&paragraphs, " ");

    collapsed.trim().to_string()
}

/// Turns single line breaks into spaces while leaving blank-line breaks alone.
fn join_wrapped_lines(text: &str) -> String {
    // Adjacent matches share a character, so one pass can miss every other break.
    let once = SINGLE_NEWLINE.replace_all(text, "$1 $2");
    SINGLE_NEWLINE.replace_all(&once, "$1 $2").into_owned()
}
