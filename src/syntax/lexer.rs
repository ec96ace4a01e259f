//! Signature tokenizer.
//!
//! One regex scan splits the input into `(`, `)`, whitespace runs and runs of
//! anything else. Whitespace runs are kept as tokens so the parser can skip
//! them by position, which means concatenating every token's text gives back
//! the input exactly.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::Span;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(|\)|\s+|[^()\s]+").expect("token pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Open,
    Close,
    Space,
    Atom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    fn classify(text: &'a str, span: Span) -> Self {
        let kind = match text {
            "(" => TokenKind::Open,
            ")" => TokenKind::Close,
            _ if text.starts_with(char::is_whitespace) => TokenKind::Space,
            _ => TokenKind::Atom,
        };
        Token { kind, text, span }
    }
}

/// Tokens of one signature plus a read cursor.
///
/// Running off the end is not an error here; `peek` simply returns `None`.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    input_len: usize,
}

impl<'a> TokenStream<'a> {
    pub fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub fn skip_space(&mut self) {
        while matches!(self.peek(), Some(t) if t.kind == TokenKind::Space) {
            self.advance();
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Zero-width span at the end of the input.
    pub fn end_span(&self) -> Span {
        Span::new(self.input_len, self.input_len)
    }

    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// Tokens not yet consumed.
    pub fn remaining(&self) -> &[Token<'a>] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }
}

pub fn tokenize(text: &str) -> TokenStream<'_> {
    let tokens = TOKEN_RE
        .find_iter(text)
        .map(|m| Token::classify(m.as_str(), Span::new(m.start(), m.end())))
        .collect();
    TokenStream {
        tokens,
        pos: 0,
        input_len: text.len(),
    }
}
