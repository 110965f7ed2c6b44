//! Static bracket pairing and operator precedence tables.

use serde::{Deserialize, Serialize};

/// Bracket kinds the engine auto-pairs inside math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bracket {
    Round,
    Square,
    Curly,
    /// `|`, which opens and closes with the same character.
    Bar,
}

impl Bracket {
    pub const ALL: [Bracket; 4] = [Bracket::Round, Bracket::Square, Bracket::Curly, Bracket::Bar];

    pub fn open(self) -> char {
        match self {
            Bracket::Round => '(',
            Bracket::Square => '[',
            Bracket::Curly => '{',
            Bracket::Bar => '|',
        }
    }

    pub fn close(self) -> char {
        match self {
            Bracket::Round => ')',
            Bracket::Square => ']',
            Bracket::Curly => '}',
            Bracket::Bar => '|',
        }
    }

    /// Bracket whose opening character is `c`.
    pub fn from_open(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.open() == c)
    }

    /// Bracket whose closing character is `c`.
    pub fn from_close(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.close() == c)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Bracket::Round => "round",
            Bracket::Square => "square",
            Bracket::Curly => "curly",
            Bracket::Bar => "bar",
        }
    }
}

/// `(`, `[` or `{`. The bar is symmetric and never counts as a grouping opener.
pub fn is_opening_bracket(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

pub fn is_closing_bracket(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

/// Partner of a grouping bracket in either direction: `(` ↔ `)`, `[` ↔ `]`, `{` ↔ `}`.
pub fn matching_bracket(c: char) -> Option<char> {
    match c {
        '(' => Some(')'),
        ')' => Some('('),
        '[' => Some(']'),
        ']' => Some('['),
        '{' => Some('}'),
        '}' => Some('{'),
        _ => None,
    }
}

/// Precedence of division, the operator an implicit fraction bar stands for.
pub const DIVISION_PRECEDENCE: i8 = 3;

/// Precedence of `c` when it acts as an infix operator inside math.
///
/// Space and `$` delimit the expression and rank below every operator.
pub fn operator_precedence(c: char) -> Option<i8> {
    match c {
        ' ' | '$' => Some(-1),
        '+' | '-' => Some(2),
        '*' | '/' => Some(3),
        '^' | '_' => Some(4),
        _ => None,
    }
}

pub fn is_operator(c: char) -> bool {
    operator_precedence(c).is_some()
}
