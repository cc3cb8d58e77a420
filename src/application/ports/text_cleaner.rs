/// Normalizes raw page text before it is split into paragraphs.
pub trait TextCleaner: Send + Sync {
    fn clean(&self, raw: &str) -> String;
}
