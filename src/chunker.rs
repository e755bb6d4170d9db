// src/chunker.rs
use crate::config::usize_from_env;

/// Default max characters per chunk.
/// Can be overridden with the CHUNK_SIZE environment variable.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap between consecutive chunks.
/// Can be overridden with the CHUNK_OVERLAP environment variable.
pub const DEFAULT_CHUNK_OVERLAP: usize = 500;

/// Get chunk size from environment or use default
pub fn chunk_size_from_env() -> usize {
    usize_from_env("CHUNK_SIZE", DEFAULT_CHUNK_SIZE)
}

/// Get chunk overlap from environment or use default
pub fn chunk_overlap_from_env() -> usize {
    usize_from_env("CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP)
}

/// Splits text into overlapping fixed-size chunks, in document order.
///
/// Chunk starts advance by `size - overlap` characters, so every character of
/// the input appears in at least one chunk and the final chunk may be shorter
/// than `size`. Character-based, so multi-byte input never splits a code point.
/// Stateless and deterministic.
///
/// Panics if `overlap >= size` (the walk would never terminate).
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<String> {
    assert!(
        overlap < size,
        "chunk overlap ({overlap}) must be smaller than chunk size ({size})"
    );

    let chars: Vec<char> = text.chars().collect();
    let step = size - overlap;
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = usize::min(start + size, chars.len());
        chunks.push(chars[start..end].iter().collect());
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_offsets_and_count() {
        // 2500 chars, size 1000, overlap 500 -> starts at 0/500/1000/1500/2000
        let text = "a".repeat(2500);
        let chunks = chunk_text(&text, 1000, 500);

        assert_eq!(chunks.len(), 5);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[3].len(), 1000);
        assert_eq!(chunks[4].len(), 500);
    }

    #[test]
    fn test_chunk_starts_follow_stride() {
        let text: String = ('a'..='z').cycle().take(2500).collect();
        let chars: Vec<char> = text.chars().collect();
        let chunks = chunk_text(&text, 1000, 500);

        for (i, chunk) in chunks.iter().enumerate() {
            let start = i * 500;
            let expected: String = chars[start..usize::min(start + 1000, chars.len())]
                .iter()
                .collect();
            assert_eq!(chunk, &expected, "chunk {i} does not match its window");
        }
    }

    #[test]
    fn test_chunks_cover_every_character() {
        let text: String = ('0'..='9').cycle().take(1234).collect();
        let chunks = chunk_text(&text, 100, 30);

        let mut covered = vec![false; text.chars().count()];
        for (i, chunk) in chunks.iter().enumerate() {
            let start = i * 70;
            for offset in 0..chunk.chars().count() {
                covered[start + offset] = true;
            }
        }
        assert!(covered.iter().all(|&c| c), "every character appears in some chunk");
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = chunk_text("short", 1000, 500);
        assert_eq!(chunks, vec!["short".to_string()]);
    }

    #[test]
    fn test_empty_text_no_chunks() {
        assert!(chunk_text("", 1000, 500).is_empty());
    }

    #[test]
    fn test_multibyte_text_does_not_split_code_points() {
        let text = "pidana—denda—penjara".repeat(50);
        let chunks = chunk_text(&text, 64, 16);
        let rejoined_len: usize = chunks[0].chars().count();
        assert_eq!(rejoined_len, 64);
    }

    #[test]
    #[should_panic(expected = "overlap")]
    fn test_overlap_must_be_smaller_than_size() {
        chunk_text("text", 100, 100);
    }
}
