use std::sync::LazyLock;

use tiktoken_rs::CoreBPE;

use crate::application::ports::TokenEstimator;

pub const DEFAULT_CHARS_PER_TOKEN: usize = 4;

static TOKENIZER: LazyLock<CoreBPE> = LazyLock::new(|| {
    tiktoken_rs::cl100k_base().expect("Failed to initialize cl100k_base tokenizer")
});

/// Exact cl100k_base token count.
pub fn count_tokens(text: &str) -> usize {
    TOKENIZER.encode_with_special_tokens(text).len()
}

/// Fixed characters-per-token heuristic; never returns less than one.
#[derive(Debug, Clone, Copy)]
pub struct CharRatioEstimator {
    chars_per_token: usize,
}

impl CharRatioEstimator {
    pub fn new(chars_per_token: usize) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }
}

impl Default for CharRatioEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_CHARS_PER_TOKEN)
    }
}

impl TokenEstimator for CharRatioEstimator {
    fn estimate(&self, text: &str) -> usize {
        (text.chars().count() / self.chars_per_token).max(1)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TiktokenEstimator;

impl TokenEstimator for TiktokenEstimator {
    fn estimate(&self, text: &str) -> usize {
        count_tokens(text).max(1)
    }
}
