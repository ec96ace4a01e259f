// tests/parser_tests.rs

use scmdoc::ast::Sexp;
use scmdoc::syntax::{extract_name, parse, signature_name, tokenize};
use scmdoc::{ParseErrorKind, ScmError};

fn parse_kind(src: &str) -> Option<ParseErrorKind> {
    parse(src).err().and_then(|e| e.parse_kind())
}

#[test]
fn test_tokens_reproduce_input() {
    let cases = [
        "(make-foo bar baz)",
        "  (a  b\n(c\td)   e)  trailing",
        ")(",
        "",
        "((((",
        "x",
        "(string-ref \"a b\" 0)",
    ];
    for src in cases {
        let joined: String = tokenize(src).tokens().iter().map(|t| t.text).collect();
        assert_eq!(joined, src, "tokens must cover: {:?}", src);
    }
}

#[test]
fn test_parse_nested_signature() {
    let sexp = parse("(a b (c d) e)").unwrap();
    let expected = Sexp::list(vec![
        "a".into(),
        "b".into(),
        Sexp::list(vec!["c".into(), "d".into()]),
        "e".into(),
    ]);
    assert_eq!(sexp, expected);
    assert_eq!(extract_name(&sexp).unwrap(), "a");
}

#[test]
fn test_structural_errors() {
    assert_eq!(parse_kind(")"), Some(ParseErrorKind::UnexpectedClose));
    assert_eq!(parse_kind("(a b"), Some(ParseErrorKind::ExpectedClose));
    assert_eq!(parse_kind(""), Some(ParseErrorKind::UnexpectedEof));
    assert_eq!(parse_kind("( ) )"), None);
}

#[test]
fn test_error_messages_name_the_problem() {
    let messages: Vec<String> = [")", "(a b", " "]
        .iter()
        .map(|src| parse(src).unwrap_err().to_string())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Parse error: unexpected closing parenthesis",
            "Parse error: expected closing parenthesis",
            "Parse error: unexpected end of input",
        ]
    );
}

#[test]
fn test_atoms_at_top_level() {
    assert_eq!(parse("foo").unwrap(), Sexp::atom("foo"));
    assert_eq!(parse("  foo  ").unwrap(), Sexp::atom("foo"));
}

#[test]
fn test_whitespace_never_becomes_an_atom() {
    for src in [" ", "\t\n", "   \n  "] {
        assert_eq!(parse_kind(src), Some(ParseErrorKind::UnexpectedEof), "{:?}", src);
    }
    assert_eq!(parse_kind("(  \t"), Some(ParseErrorKind::ExpectedClose));
    assert_eq!(parse("( \t a \n )").unwrap(), Sexp::list(vec!["a".into()]));
    assert_eq!(parse("(\n)").unwrap(), Sexp::list(vec![]));
}

#[test]
fn test_atoms_are_opaque() {
    let sexp = parse("(vector-ref v 0 #t \"s\" 'q x.y)").unwrap();
    let atoms: Vec<_> = sexp
        .as_list()
        .unwrap()
        .iter()
        .map(|s| s.as_atom().unwrap())
        .collect();
    assert_eq!(atoms, vec!["vector-ref", "v", "0", "#t", "\"s\"", "'q", "x.y"]);
}

#[test]
fn test_pretty_print_normalizes_spacing() {
    let sexp = parse("(  define-record-type\n  point (make-point x y)  point? )").unwrap();
    assert_eq!(sexp.to_string(), "(define-record-type point (make-point x y) point?)");
    assert_eq!(parse(&sexp.to_string()).unwrap(), sexp);
}

#[test]
fn test_bare_atom_signature_is_rejected() {
    let err = signature_name("make-foo").unwrap_err();
    assert!(matches!(
        err,
        ScmError::Parse {
            kind: ParseErrorKind::NotAForm,
            ..
        }
    ));
}

#[test]
fn test_deeply_nested_arguments() {
    let sig = "(f ((((x)))) (y (z)))";
    assert_eq!(signature_name(sig).unwrap(), "f");
    assert_eq!(parse(sig).unwrap().atom_count(), 4);
}
