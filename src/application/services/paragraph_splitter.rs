/// Lazily splits page text into trimmed, non-empty paragraphs on blank lines.
///
/// Runs of two or more newlines count as a single separator.
pub fn split_paragraphs(text: &str) -> Paragraphs<'_> {
    Paragraphs { rest: Some(text) }
}

#[derive(Debug, Clone)]
pub struct Paragraphs<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for Paragraphs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = self.rest?;
            let (part, tail) = match rest.find("\n\n") {
                Some(idx) => (&rest[..idx], Some(&rest[idx + 2..])),
                None => (rest, None),
            };
            self.rest = tail;

            let part = part.trim();
            if !part.is_empty() {
                return Some(part);
            }
        }
    }
}

impl std::iter::FusedIterator for Paragraphs<'_> {}
