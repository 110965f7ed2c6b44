use rustc_hash::FxHashMap;
use tracing::trace;

use super::token::{next_token, TokenKind};
use super::{Environment, LineEnvironment, LineSource, MathFlavor};
use crate::position::byte_offset;

/// Scan `text` left to right starting in `seed` and return the environment
/// in effect after its last character.
///
/// `text` is usually a line prefix ending at the queried column; a trailing
/// unescaped `\` therefore yields `EscapedChar`.
pub fn scan_line(seed: Environment, text: &str) -> Environment {
    let bytes = text.as_bytes();
    let mut env = match seed {
        Environment::EscapedChar => Environment::PlainText,
        other => other,
    };
    let mut pos = 0;

    while let Some(token) = next_token(&env, bytes, pos) {
        pos = token.end;
        env = match (env, token.kind) {
            (Environment::PlainText, TokenKind::DoubleDollar) => Environment::BlockMath,
            (Environment::PlainText, TokenKind::Dollar) => Environment::InlineMath,
            (Environment::PlainText, TokenKind::TripleBacktick) => Environment::BlockCode,
            (Environment::PlainText, TokenKind::Backtick) => Environment::InlineCode,
            (Environment::PlainText, TokenKind::Backslash) => {
                match text[pos..].chars().next() {
                    // The escaped character is taken literally.
                    Some(c) => {
                        pos += c.len_utf8();
                        Environment::PlainText
                    }
                    None => Environment::EscapedChar,
                }
            }

            (Environment::InlineMath, TokenKind::Dollar) => Environment::PlainText,
            (Environment::InlineMath, TokenKind::DoubleDollar) => Environment::BlockMath,
            (Environment::InlineMath, TokenKind::TextOpen) => Environment::MathText {
                parent: MathFlavor::Inline,
                depth: 0,
            },

            (Environment::BlockMath, TokenKind::DoubleDollar) => Environment::PlainText,
            (Environment::BlockMath, TokenKind::TextOpen) => Environment::MathText {
                parent: MathFlavor::Block,
                depth: 0,
            },

            (Environment::MathText { parent, depth }, TokenKind::OpenBrace) => {
                Environment::MathText {
                    parent,
                    depth: depth + 1,
                }
            }
            (Environment::MathText { parent, depth: 0 }, TokenKind::CloseBrace) => match parent {
                MathFlavor::Inline => Environment::InlineMath,
                MathFlavor::Block => Environment::BlockMath,
            },
            (Environment::MathText { parent, depth }, TokenKind::CloseBrace) => {
                Environment::MathText {
                    parent,
                    depth: depth - 1,
                }
            }

            (Environment::InlineCode, TokenKind::Backtick) => Environment::PlainText,
            (Environment::BlockCode, TokenKind::TripleBacktick) => Environment::PlainText,

            // Markers that mean nothing in the current environment.
            (env, _) => env,
        };
    }

    env
}

#[derive(Debug)]
struct MemoEntry {
    seed: LineEnvironment,
    text: String,
    summary: LineEnvironment,
}

/// Environment classifier with per-line memoization of end-of-line summaries.
///
/// A memo entry is reused only while both the line text and the summary
/// carried in from the previous line are unchanged, so edits anywhere above
/// a line are picked up on the next query.
///
/// A scanner built with [`EnvironmentScanner::tracking`] also keeps a prefix
/// of clean rows whose summaries are returned without re-reading their text.
/// Its owner must report every edit through [`EnvironmentScanner::invalidate_from`].
#[derive(Debug, Default)]
pub struct EnvironmentScanner {
    memo: FxHashMap<usize, MemoEntry>,
    tracks_edits: bool,
    /// Rows below this are memoized and known unchanged.
    clean_rows: usize,
}

impl EnvironmentScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scanner that trusts verified rows until told they changed.
    pub fn tracking() -> Self {
        Self {
            tracks_edits: true,
            ..Self::default()
        }
    }

    /// Environment at `(line, column)`. Lines outside the buffer are plain text;
    /// columns past the end of the line are clamped.
    pub fn classify_at<S: LineSource + ?Sized>(
        &mut self,
        src: &S,
        line: usize,
        column: usize,
    ) -> Environment {
        let Some(text) = src.line(line) else {
            return Environment::PlainText;
        };
        let seed = self.carried_into(src, line);
        scan_line(seed.into(), &text[..byte_offset(text, column)])
    }

    /// Environment carried out of the end of `line`.
    pub fn line_summary<S: LineSource + ?Sized>(&mut self, src: &S, line: usize) -> LineEnvironment {
        if src.line(line).is_none() {
            return LineEnvironment::PlainText;
        }

        let mut row = self.clean_rows.min(line + 1);
        let mut carried = match row.checked_sub(1).and_then(|prev| self.memo.get(&prev)) {
            Some(entry) => entry.summary,
            None => {
                row = 0;
                LineEnvironment::PlainText
            }
        };
        while row <= line {
            let Some(text) = src.line(row) else {
                return LineEnvironment::PlainText;
            };
            carried = self.summarize(row, text, carried);
            row += 1;
        }

        if self.tracks_edits {
            self.clean_rows = self.clean_rows.max(line + 1);
        }
        carried
    }

    /// Rows from `row` on may have changed and must be verified again.
    pub fn invalidate_from(&mut self, row: usize) {
        if row < self.clean_rows {
            trace!(row, clean_rows = self.clean_rows, "clean prefix shortened");
            self.clean_rows = row;
        }
    }

    pub fn clean_rows(&self) -> usize {
        self.clean_rows
    }

    /// Environment in effect at column 0 of `line`.
    pub fn carried_into<S: LineSource + ?Sized>(&mut self, src: &S, line: usize) -> LineEnvironment {
        match line.checked_sub(1) {
            Some(prev) => self.line_summary(src, prev),
            None => LineEnvironment::PlainText,
        }
    }

    /// Drop every memoized summary.
    pub fn clear(&mut self) {
        self.memo.clear();
        self.clean_rows = 0;
    }

    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    fn summarize(&mut self, row: usize, text: &str, seed: LineEnvironment) -> LineEnvironment {
        if let Some(entry) = self.memo.get(&row) {
            if entry.seed == seed && entry.text == text {
                trace!(row, "line summary memo hit");
                return entry.summary;
            }
            self.memo.remove(&row);
            trace!(row, "line summary memo invalidated");
        }

        let summary = scan_line(seed.into(), text).line_summary();
        self.memo.insert(
            row,
            MemoEntry {
                seed,
                text: text.to_owned(),
                summary,
            },
        );
        summary
    }
}
