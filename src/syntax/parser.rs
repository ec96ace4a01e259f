//! Recursive-descent reader for signature S-expressions.
//!
//! Only the first complete form is read; whatever follows it is free text and
//! ignored. Errors name the structural problem and point at it.

use crate::ast::{Sexp, Span};
use crate::diagnostics::{ParseErrorKind, ScmError};
use crate::err_msg;
use crate::syntax::lexer::{tokenize, TokenKind, TokenStream};

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses the first S-expression in `text`.
///
/// # Examples
///
/// ```rust
/// use scmdoc::ast::Sexp;
/// use scmdoc::syntax::parse;
/// let sexp = parse("(make-foo bar (baz))").unwrap();
/// assert_eq!(sexp.head(), Some(&Sexp::atom("make-foo")));
/// ```
pub fn parse(text: &str) -> Result<Sexp, ScmError> {
    let mut tokens = tokenize(text);
    parse_one(&mut tokens, text)
}

/// Returns the function name of a parsed signature: the head atom of a
/// non-empty list.
pub fn extract_name(sexp: &Sexp) -> Result<&str, ScmError> {
    let items = sexp
        .as_list()
        .ok_or_else(|| ScmError::parse_bare(ParseErrorKind::NotAForm))?;
    let head = items
        .first()
        .ok_or_else(|| ScmError::parse_bare(ParseErrorKind::EmptyForm))?;
    head.as_atom()
        .ok_or_else(|| ScmError::parse_bare(ParseErrorKind::NameNotAtom))
}

/// Parses `sig` and extracts its name in one step, keeping the signature as
/// the error source.
pub fn signature_name(sig: &str) -> Result<String, ScmError> {
    let sexp = parse(sig)?;
    extract_name(&sexp)
        .map(str::to_string)
        .map_err(|e| e.with_source("signature", sig))
}

// ============================================================================
// READER
// ============================================================================

fn parse_one(tokens: &mut TokenStream<'_>, text: &str) -> Result<Sexp, ScmError> {
    tokens.skip_space();

    let Some(token) = tokens.peek().copied() else {
        return Err(ScmError::parse(
            ParseErrorKind::UnexpectedEof,
            text,
            tokens.end_span(),
        ));
    };

    match token.kind {
        TokenKind::Close => Err(ScmError::parse(
            ParseErrorKind::UnexpectedClose,
            text,
            token.span,
        )),
        TokenKind::Open => {
            tokens.advance();
            parse_list_tail(tokens, text, token.span)
        }
        TokenKind::Atom => {
            tokens.advance();
            Ok(Sexp::atom(token.text))
        }
        TokenKind::Space => Err(err_msg!(
            Internal,
            "whitespace token at offset {} after skipping whitespace",
            token.span.start
        )),
    }
}

/// Reads list elements after an already consumed `(` up to its `)`.
fn parse_list_tail(
    tokens: &mut TokenStream<'_>,
    text: &str,
    open: Span,
) -> Result<Sexp, ScmError> {
    let mut items = Vec::new();
    loop {
        tokens.skip_space();
        match tokens.peek() {
            None => {
                return Err(ScmError::parse(
                    ParseErrorKind::ExpectedClose,
                    text,
                    open.to(tokens.end_span()),
                ));
            }
            Some(t) if t.kind == TokenKind::Close => {
                tokens.advance();
                return Ok(Sexp::list(items));
            }
            Some(_) => items.push(parse_one(tokens, text)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(text: &str) -> ParseErrorKind {
        parse(text)
            .expect_err("input should be rejected")
            .parse_kind()
            .expect("a parse error")
    }

    #[test]
    fn nested_signature() {
        let sexp = parse("(a b (c d) e)").unwrap();
        assert_eq!(
            sexp,
            Sexp::list(vec![
                "a".into(),
                "b".into(),
                Sexp::list(vec!["c".into(), "d".into()]),
                "e".into(),
            ])
        );
        assert_eq!(extract_name(&sexp).unwrap(), "a");
    }

    #[test]
    fn structural_errors_are_distinct() {
        assert_eq!(kind_of(")"), ParseErrorKind::UnexpectedClose);
        assert_eq!(kind_of("(a b"), ParseErrorKind::ExpectedClose);
        assert_eq!(kind_of(""), ParseErrorKind::UnexpectedEof);
        assert_eq!(kind_of("   "), ParseErrorKind::UnexpectedEof);
        assert_eq!(kind_of("(a (b c)"), ParseErrorKind::ExpectedClose);
    }

    #[test]
    fn inner_close_never_reaches_the_stray_check() {
        // The `)` closing the list is consumed by the list reader.
        assert_eq!(parse("()").unwrap(), Sexp::list(vec![]));
        assert_eq!(parse("(())").unwrap(), Sexp::list(vec![Sexp::list(vec![])]));
    }

    #[test]
    fn trailing_input_is_ignored() {
        assert_eq!(parse("(f x) )) (g").unwrap().to_string(), "(f x)");
        assert_eq!(parse("foo bar").unwrap(), Sexp::atom("foo"));
    }

    #[test]
    fn atoms_strip_surrounding_space() {
        assert_eq!(parse("foo").unwrap(), Sexp::atom("foo"));
        assert_eq!(parse("  foo  ").unwrap(), Sexp::atom("foo"));
    }

    #[test]
    fn unterminated_list_points_from_the_open_paren() {
        let err = parse("  (a b").unwrap_err();
        match err {
            ScmError::Parse { ctx, .. } => assert_eq!(ctx.span, Some(Span::new(2, 6))),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn extract_name_rejects_non_forms() {
        let kind = |sexp: Sexp| extract_name(&sexp).unwrap_err().parse_kind();
        assert_eq!(kind(Sexp::atom("foo")), Some(ParseErrorKind::NotAForm));
        assert_eq!(kind(Sexp::list(vec![])), Some(ParseErrorKind::EmptyForm));
        assert_eq!(
            kind(Sexp::list(vec![Sexp::list(vec!["f".into()])])),
            Some(ParseErrorKind::NameNotAtom)
        );
    }

    #[test]
    fn signature_name_reads_the_head() {
        assert_eq!(signature_name("(make-foo bar baz)").unwrap(), "make-foo");
        assert_eq!(signature_name(" (x) rest").unwrap(), "x");
        assert!(signature_name("foo").is_err());
    }
}
