//! Numerator boundary resolution for fast fractions.
//!
//! Typing `a+b/c` should turn into `a+\frac{b}{c}`, while `(a+b)/c` should
//! capture the whole group. The numerator is found by scanning left from the
//! slash with a small precedence grammar.

use tracing::warn;

use crate::tables::{
    is_closing_bracket, is_opening_bracket, matching_bracket, operator_precedence,
    DIVISION_PRECEDENCE,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FractionError {
    #[error("unpaired closing bracket at column {column}")]
    UnpairedBracket { column: usize },
    #[error("division marker column {column} is past the end of the line")]
    OutOfRange { column: usize },
}

/// Column where the numerator of a fraction whose bar sits at `slash_col` begins.
///
/// Scans leftward from `slash_col - 1`, skipping operands and operators that
/// bind at least as tightly as division, and stops after the first operator
/// that binds more loosely (space, `$`, `+`, `-`). Bracket groups are skipped
/// whole; an unmatched opening bracket ends the expression.
pub fn find_numerator_start(line: &str, slash_col: usize) -> Result<usize, FractionError> {
    let chars: Vec<char> = line.chars().collect();
    if slash_col > chars.len() {
        return Err(FractionError::OutOfRange { column: slash_col });
    }

    let mut pos = slash_col;
    while pos > 0 {
        let c = chars[pos - 1];

        if is_closing_bracket(c) {
            let opener = matching_opener(&chars, pos - 1)?;
            pos = opener;
            continue;
        }

        if is_opening_bracket(c) {
            return Ok(pos);
        }

        match operator_precedence(c) {
            Some(p) if p < DIVISION_PRECEDENCE => return Ok(pos),
            _ => pos -= 1,
        }
    }
    Ok(0)
}

/// Index of the opener matching the closing bracket at `close_idx`.
fn matching_opener(chars: &[char], close_idx: usize) -> Result<usize, FractionError> {
    let close = chars[close_idx];
    let open = matching_bracket(close).ok_or(FractionError::UnpairedBracket { column: close_idx })?;

    let mut depth = 0usize;
    for idx in (0..=close_idx).rev() {
        let c = chars[idx];
        if c == close {
            depth += 1;
        } else if c == open {
            depth -= 1;
            if depth == 0 {
                return Ok(idx);
            }
        }
    }

    warn!(column = close_idx, "unpaired bracket in fraction numerator");
    Err(FractionError::UnpairedBracket { column: close_idx })
}

/// Remove one pair of brackets enclosing all of `s`.
///
/// `(a+b)` becomes `a+b`; `(a)+(b)` is left alone because the first opener
/// closes before the end.
pub fn strip_enclosing(s: &str) -> &str {
    let chars: Vec<char> = s.chars().collect();
    let (Some(&first), Some(&last)) = (chars.first(), chars.last()) else {
        return s;
    };
    if chars.len() < 2 || !is_opening_bracket(first) || matching_bracket(first) != Some(last) {
        return s;
    }

    let mut depth = 0usize;
    for (idx, &c) in chars.iter().enumerate() {
        if c == first {
            depth += 1;
        } else if c == last {
            depth -= 1;
            if depth == 0 && idx != chars.len() - 1 {
                return s;
            }
        }
    }

    &s[first.len_utf8()..s.len() - last.len_utf8()]
}
