use crate::error::{RagError, Result};
use crate::models::TextChunk;

/// Splits text into overlapping character windows
///
/// Sizes are counted in characters, never bytes, so multi-byte text is never cut
/// inside a code point. Break points prefer the last whitespace in the second half of
/// a window.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    /// Maximum characters per chunk
    pub chunk_size: usize,

    /// Characters shared by consecutive chunks
    pub chunk_overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self { chunk_size: 1000, chunk_overlap: 200 }
    }
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RagError::ConfigInvalid {
                key: "chunk_size".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if chunk_overlap >= chunk_size {
            return Err(RagError::ConfigInvalid {
                key: "chunk_overlap".to_string(),
                reason: format!(
                    "overlap ({}) must be less than chunk_size ({})",
                    chunk_overlap, chunk_size
                ),
            });
        }

        Ok(Self { chunk_size, chunk_overlap })
    }

    /// Split `text` into chunks; blank text yields no chunks
    pub fn split(&self, text: &str) -> Vec<TextChunk> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = if chars.len() - start <= self.chunk_size {
                chars.len()
            } else {
                self.find_break_point(&chars, start)
            };

            let content: String = chars[start..end].iter().collect();
            if !content.trim().is_empty() {
                chunks.push(TextChunk { index: chunks.len(), content, offset: start });
            }

            if end >= chars.len() {
                break;
            }

            // Always advance, even when the overlap would cover the whole window
            start = end.saturating_sub(self.chunk_overlap).max(start + 1);
        }

        chunks
    }

    fn find_break_point(&self, chars: &[char], start: usize) -> usize {
        let ideal_end = start + self.chunk_size;
        let search_start = start + self.chunk_size / 2;

        chars[search_start..ideal_end]
            .iter()
            .rposition(|c| c.is_whitespace())
            .map(|pos| search_start + pos + 1)
            .unwrap_or(ideal_end)
    }
}
