//! Buffer coordinates.
//!
//! Columns count Unicode scalar values, not bytes. A column equal to the
//! line's length addresses the slot after the last character.

use serde::{Deserialize, Serialize};

/// Cursor or anchor position in a line-oriented buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    pub const fn zero() -> Self {
        Self { line: 0, col: 0 }
    }

    /// Same line, `n` columns to the right.
    pub const fn offset(self, n: usize) -> Self {
        Self {
            line: self.line,
            col: self.col + n,
        }
    }
}

/// Byte offset of character column `col` in `text`, clamped to `text.len()`.
pub fn byte_offset(text: &str, col: usize) -> usize {
    text.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Characters `[from, to)` of `text`, clamped to the line.
pub fn char_slice(text: &str, from: usize, to: usize) -> &str {
    let start = byte_offset(text, from);
    let end = byte_offset(text, to).max(start);
    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.line, 5);
        assert_eq!(pos.col, 10);
        assert_eq!(pos.offset(2), Position::new(5, 12));
        assert_eq!(Position::zero(), Position::new(0, 0));
    }

    #[test]
    fn test_byte_offset_multibyte() {
        let text = "αβ$x";
        assert_eq!(byte_offset(text, 0), 0);
        assert_eq!(byte_offset(text, 2), 4);
        assert_eq!(byte_offset(text, 4), text.len());
        assert_eq!(byte_offset(text, 99), text.len());
    }

    #[test]
    fn test_char_slice() {
        assert_eq!(char_slice("a_{bc}", 2, 6), "{bc}");
        assert_eq!(char_slice("αβγ", 1, 2), "β");
        assert_eq!(char_slice("abc", 2, 1), "");
        assert_eq!(char_slice("abc", 1, 10), "bc");
        assert_eq!(char_len("αβγ"), 3);
    }
}
