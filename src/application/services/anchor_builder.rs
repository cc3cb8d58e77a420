use std::collections::BTreeMap;

use crate::domain::{Anchor, Block};

pub const DEFAULT_ANCHOR_WINDOW_CHARS: usize = 160;

/// One anchor per distinct page in `blocks`, ordered by page number.
///
/// `start_snippet` is the head of the first paragraph seen on that page and
/// `end_snippet` the tail of the last one, each at most `window_chars` long.
pub fn build_anchors(blocks: &[Block], window_chars: usize) -> Vec<Anchor> {
    let mut by_page: BTreeMap<u32, (&str, &str)> = BTreeMap::new();
    for block in blocks {
        by_page
            .entry(block.page_number)
            .and_modify(|(_, last)| *last = block.text.as_str())
            .or_insert((block.text.as_str(), block.text.as_str()));
    }

    by_page
        .into_iter()
        .map(|(page, (first, last))| Anchor {
            page,
            start_snippet: head_chars(first, window_chars).to_string(),
            end_snippet: tail_chars(last, window_chars).to_string(),
        })
        .collect()
}

fn head_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn tail_chars(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match text.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}
