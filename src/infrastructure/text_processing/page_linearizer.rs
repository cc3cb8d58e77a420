use crate::domain::{BoundingBox, PageParse, TextSpan};

/// Builds a page's linear text from spans fed in reading order, recording
/// each span's character offsets into that text.
///
/// A single space is inserted before a span when the previous piece does not
/// already end in a space or newline, and every line ends with `\n`. Trailing
/// newlines are trimmed from the final text.
#[derive(Debug, Default)]
pub struct PageLinearizer {
    text: String,
    char_len: usize,
    spans: Vec<TextSpan>,
    last_piece_terminated: Option<bool>,
}

impl PageLinearizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_span(&mut self, text: &str, bbox: BoundingBox) {
        if self.last_piece_terminated == Some(false) {
            self.push_piece(" ");
        }

        let start_offset = self.char_len;
        self.push_piece(text);
        self.spans.push(TextSpan {
            text: text.to_string(),
            bbox,
            start_offset,
            end_offset: self.char_len,
        });
    }

    pub fn end_line(&mut self) {
        self.push_piece("\n");
    }

    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    pub fn finish(mut self, page_number: u32) -> PageParse {
        let trimmed_len = self.text.trim_end_matches('\n').len();
        self.text.truncate(trimmed_len);
        PageParse {
            page_number,
            text: self.text,
            spans: self.spans,
        }
    }

    fn push_piece(&mut self, piece: &str) {
        self.text.push_str(piece);
        self.char_len += piece.chars().count();
        self.last_piece_terminated = Some(piece.ends_with(' ') || piece.ends_with('\n'));
    }
}
