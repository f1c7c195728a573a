//! Fixed-size sliding-window text splitter

/// Splits text into overlapping chunks. Boundaries are measured in
/// characters, never bytes, so multi-byte input cannot split a code point.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        assert!(
            chunk_overlap < chunk_size,
            "chunk_overlap must be smaller than chunk_size"
        );
        Self { chunk_size, chunk_overlap }
    }

    /// Split `text` into chunks of at most `chunk_size` characters, each
    /// sharing `chunk_overlap` characters with its predecessor.
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return vec![];
        }

        let mut chunks = Vec::new();
        let mut start = 0;
        loop {
            let end = (start + self.chunk_size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start = end - self.chunk_overlap;
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let splitter = TextSplitter::new(1000, 100);
        let chunks = splitter.split("hello world");
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let splitter = TextSplitter::new(1000, 100);
        assert!(splitter.split("").is_empty());
    }

    #[test]
    fn chunks_respect_size_and_overlap() {
        let splitter = TextSplitter::new(10, 3);
        let text: String = ('a'..='z').collect();
        let chunks = splitter.split(&text);

        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
        for pair in chunks.windows(2) {
            let prev_tail: String = pair[0].chars().rev().take(3).collect::<Vec<_>>()
                .into_iter().rev().collect();
            assert!(pair[1].starts_with(&prev_tail));
        }
        // Every character of the input survives, in order
        let mut reassembled = chunks[0].clone();
        for chunk in &chunks[1..] {
            reassembled.push_str(&chunk[chunk.char_indices().nth(3).unwrap().0..]);
        }
        assert_eq!(reassembled, text);
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let splitter = TextSplitter::new(5, 1);
        let text = "héllo wörld ünïcode";
        let chunks = splitter.split(text);
        assert!(chunks.iter().all(|c| c.chars().count() <= 5));
    }

    #[test]
    #[should_panic]
    fn overlap_must_be_smaller_than_chunk_size() {
        TextSplitter::new(100, 100);
    }
}
