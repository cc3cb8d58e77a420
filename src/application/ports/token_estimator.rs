/// Approximate token count for a piece of text.
///
/// Implementations must be deterministic and monotonic in text length; the
/// estimate is a soft capacity guard, not a tokenizer contract.
pub trait TokenEstimator: Send + Sync {
    fn estimate(&self, text: &str) -> usize;
}
