//! Lexical environment classification.
//!
//! `EnvironmentScanner` answers "which environment contains this position?"
//! for a line-oriented buffer. Each line is scanned from the summary carried
//! out of the previous line; summaries are memoized per line.

mod scanner;
mod token;

pub use scanner::{scan_line, EnvironmentScanner};

use serde::{Deserialize, Serialize};

/// Read access to the lines of a buffer.
pub trait LineSource {
    fn line(&self, row: usize) -> Option<&str>;
}

impl LineSource for [String] {
    fn line(&self, row: usize) -> Option<&str> {
        self.get(row).map(|s| s.as_str())
    }
}

impl LineSource for [&str] {
    fn line(&self, row: usize) -> Option<&str> {
        self.get(row).copied()
    }
}

impl LineSource for Vec<String> {
    fn line(&self, row: usize) -> Option<&str> {
        self.as_slice().line(row)
    }
}

/// Which math variant a `\text{...}` region is nested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MathFlavor {
    Inline,
    Block,
}

/// Environment containing a buffer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Environment {
    PlainText,
    /// `$...$`
    InlineMath,
    /// `$$...$$`, may span lines.
    BlockMath,
    /// `\text{...}` inside math. `depth` counts unclosed `{` opened inside it.
    MathText { parent: MathFlavor, depth: u32 },
    /// `` `...` ``
    InlineCode,
    /// ```` ```...``` ````, may span lines.
    BlockCode,
    /// Directly after an unescaped trailing `\` in plain text.
    EscapedChar,
}

impl Environment {
    pub fn is_markdown(&self) -> bool {
        matches!(self, Environment::PlainText)
    }

    /// Inline or block math, not counting `\text{}` regions.
    pub fn is_latex(&self) -> bool {
        matches!(self, Environment::InlineMath | Environment::BlockMath)
    }

    pub fn is_latex_text(&self) -> bool {
        matches!(self, Environment::MathText { .. })
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Environment::InlineCode | Environment::BlockCode)
    }

    pub fn is_inline_latex(&self) -> bool {
        matches!(self, Environment::InlineMath)
    }

    pub fn is_block_latex(&self) -> bool {
        matches!(self, Environment::BlockMath)
    }

    pub fn is_escaped_char(&self) -> bool {
        matches!(self, Environment::EscapedChar)
    }

    /// Environment carried past the end of a line.
    pub fn line_summary(&self) -> LineEnvironment {
        match self {
            Environment::BlockMath => LineEnvironment::BlockMath,
            Environment::BlockCode => LineEnvironment::BlockCode,
            Environment::PlainText
            | Environment::InlineMath
            | Environment::MathText { .. }
            | Environment::InlineCode
            | Environment::EscapedChar => LineEnvironment::PlainText,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::PlainText => "plain-text",
            Environment::InlineMath => "inline-math",
            Environment::BlockMath => "block-math",
            Environment::MathText {
                parent: MathFlavor::Inline,
                ..
            } => "math-text(inline)",
            Environment::MathText {
                parent: MathFlavor::Block,
                ..
            } => "math-text(block)",
            Environment::InlineCode => "inline-code",
            Environment::BlockCode => "block-code",
            Environment::EscapedChar => "escaped-char",
        }
    }
}

/// Multi-line-capable environment in effect at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineEnvironment {
    #[default]
    PlainText,
    BlockMath,
    BlockCode,
}

impl LineEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnvironment::PlainText => "plain-text",
            LineEnvironment::BlockMath => "block-math",
            LineEnvironment::BlockCode => "block-code",
        }
    }
}

impl From<LineEnvironment> for Environment {
    fn from(env: LineEnvironment) -> Self {
        match env {
            LineEnvironment::PlainText => Environment::PlainText,
            LineEnvironment::BlockMath => Environment::BlockMath,
            LineEnvironment::BlockCode => Environment::BlockCode,
        }
    }
}
