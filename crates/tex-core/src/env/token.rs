//! Token search.
//!
//! Each environment recognises its own set of marker strings. The next token
//! is the one starting earliest; at the same start the longer marker wins
//! (`$$` over `$`, ```` ``` ```` over `` ` ``).

use memchr::{memchr, memchr2, memchr3};

use super::Environment;

const TEXT_OPEN: &[u8] = b"\\text{";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TokenKind {
    DoubleDollar,
    Dollar,
    TripleBacktick,
    Backtick,
    Backslash,
    TextOpen,
    OpenBrace,
    CloseBrace,
}

impl TokenKind {
    fn len(self) -> usize {
        match self {
            TokenKind::DoubleDollar => 2,
            TokenKind::TripleBacktick => 3,
            TokenKind::TextOpen => TEXT_OPEN.len(),
            TokenKind::Dollar
            | TokenKind::Backtick
            | TokenKind::Backslash
            | TokenKind::OpenBrace
            | TokenKind::CloseBrace => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    fn at(kind: TokenKind, start: usize) -> Self {
        Self {
            kind,
            start,
            end: start + kind.len(),
        }
    }
}

/// Next token valid in `env` at or after byte `from`.
pub(super) fn next_token(env: &Environment, bytes: &[u8], from: usize) -> Option<Token> {
    if from >= bytes.len() {
        return None;
    }
    match env {
        Environment::PlainText | Environment::EscapedChar => markdown_token(bytes, from),
        Environment::InlineMath | Environment::BlockMath => latex_token(bytes, from),
        Environment::MathText { .. } => brace_token(bytes, from),
        Environment::InlineCode | Environment::BlockCode => code_token(bytes, from),
    }
}

fn markdown_token(bytes: &[u8], from: usize) -> Option<Token> {
    let start = from + memchr3(b'$', b'`', b'\\', &bytes[from..])?;
    let kind = match bytes[start] {
        b'$' => dollar_kind(bytes, start),
        b'`' => backtick_kind(bytes, start),
        _ => TokenKind::Backslash,
    };
    Some(Token::at(kind, start))
}

fn latex_token(bytes: &[u8], from: usize) -> Option<Token> {
    let mut pos = from;
    while pos < bytes.len() {
        let start = pos + memchr2(b'$', b'\\', &bytes[pos..])?;
        if bytes[start] == b'$' {
            return Some(Token::at(dollar_kind(bytes, start), start));
        }
        if bytes[start..].starts_with(TEXT_OPEN) {
            return Some(Token::at(TokenKind::TextOpen, start));
        }
        pos = start + 1;
    }
    None
}

fn brace_token(bytes: &[u8], from: usize) -> Option<Token> {
    let start = from + memchr2(b'{', b'}', &bytes[from..])?;
    let kind = if bytes[start] == b'{' {
        TokenKind::OpenBrace
    } else {
        TokenKind::CloseBrace
    };
    Some(Token::at(kind, start))
}

fn code_token(bytes: &[u8], from: usize) -> Option<Token> {
    let start = from + memchr(b'`', &bytes[from..])?;
    Some(Token::at(backtick_kind(bytes, start), start))
}

fn dollar_kind(bytes: &[u8], start: usize) -> TokenKind {
    if bytes.get(start + 1) == Some(&b'$') {
        TokenKind::DoubleDollar
    } else {
        TokenKind::Dollar
    }
}

fn backtick_kind(bytes: &[u8], start: usize) -> TokenKind {
    if bytes[start..].starts_with(b"```") {
        TokenKind::TripleBacktick
    } else {
        TokenKind::Backtick
    }
}
