use crate::error::DocumentError;

#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            overlap: 50,
        }
    }
}

/// Split text into overlapping windows of whitespace-delimited words.
///
/// Windows hold `chunk_size` words and advance by `chunk_size - overlap`
/// words each step, so consecutive chunks share `overlap` words. Words are
/// rejoined with single spaces; the final window may be shorter. Purely
/// word-count based, no sentence or paragraph awareness.
///
/// # Errors
///
/// Returns `DocumentError::InvalidChunking` when `chunk_size` is zero or
/// `overlap >= chunk_size` (the stride would be non-positive and the walk
/// would never terminate).
pub fn chunk_text(
    text: &str,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<String>, DocumentError> {
    if chunk_size == 0 || overlap >= chunk_size {
        return Err(DocumentError::InvalidChunking {
            chunk_size,
            overlap,
        });
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let stride = chunk_size - overlap;
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < words.len() {
        let end = (start + chunk_size).min(words.len());
        let chunk = words[start..end].join(" ");
        if !chunk.is_empty() {
            chunks.push(chunk);
        }
        start += stride;
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_count(chunks: &[String]) -> usize {
        chunks.iter().map(|c| c.split_whitespace().count()).sum()
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunks = chunk_text("", 500, 50).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn whitespace_only_yields_no_chunks() {
        let chunks = chunk_text("   \n\t  ", 10, 2).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn single_short_chunk() {
        let chunks = chunk_text("one two three", 500, 50).unwrap();
        assert_eq!(chunks, vec!["one two three"]);
    }

    #[test]
    fn windows_overlap_by_configured_amount() {
        // 10 words, size 4, overlap 2 -> stride 2 -> windows at 0,2,4,6,8
        let text = "w0 w1 w2 w3 w4 w5 w6 w7 w8 w9";
        let chunks = chunk_text(text, 4, 2).unwrap();
        assert_eq!(chunks.len(), 5);
        assert_eq!(chunks[0], "w0 w1 w2 w3");
        assert_eq!(chunks[1], "w2 w3 w4 w5");
        assert_eq!(chunks[4], "w8 w9");
    }

    #[test]
    fn last_window_may_be_short() {
        let text = "a b c d e";
        let chunks = chunk_text(text, 3, 1).unwrap();
        assert_eq!(chunks.last().unwrap(), "e");
    }

    #[test]
    fn overlap_equal_to_chunk_size_rejected() {
        let err = chunk_text("a b c", 10, 10).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::InvalidChunking {
                chunk_size: 10,
                overlap: 10
            }
        ));
    }

    #[test]
    fn overlap_greater_than_chunk_size_rejected() {
        assert!(chunk_text("a b c", 5, 7).is_err());
    }

    #[test]
    fn zero_chunk_size_rejected() {
        assert!(chunk_text("a b c", 0, 0).is_err());
    }

    #[test]
    fn rejoins_with_single_spaces() {
        let chunks = chunk_text("a\n\nb\t c", 10, 0).unwrap();
        assert_eq!(chunks, vec!["a b c"]);
    }

    #[test]
    fn config_defaults_match_upload_path() {
        let cfg = ChunkingConfig::default();
        assert_eq!(cfg.chunk_size, 500);
        assert_eq!(cfg.overlap, 50);
    }

    mod proptest_chunker {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn never_panics_on_valid_params(
                text in "\\PC{0,2000}",
                chunk_size in 1usize..200,
                overlap in 0usize..200,
            ) {
                let _ = chunk_text(&text, chunk_size, overlap);
            }

            #[test]
            fn covers_every_word(
                text in "[a-z ]{0,500}",
                chunk_size in 1usize..50,
            ) {
                // With zero overlap the chunks partition the words exactly.
                let chunks = chunk_text(&text, chunk_size, 0).unwrap();
                let original = text.split_whitespace().count();
                prop_assert_eq!(word_count(&chunks), original);
            }

            #[test]
            fn overlap_never_loses_words(
                text in "[a-z ]{1,500}",
                chunk_size in 2usize..50,
                overlap in 1usize..49,
            ) {
                prop_assume!(overlap < chunk_size);
                let chunks = chunk_text(&text, chunk_size, overlap).unwrap();
                let original = text.split_whitespace().count();
                // Overlapping windows revisit words, so the total is at least
                // the source word count and no chunk is empty.
                prop_assert!(word_count(&chunks) >= original);
                for chunk in &chunks {
                    prop_assert!(!chunk.is_empty());
                }
            }
        }
    }
}
