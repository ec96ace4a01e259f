//! Unified, `miette`-based diagnostics for scmdoc.
//!
//! Every failure the reader, the domain, the session or the host driver can
//! produce is a [`ScmError`]. Duplicate registrations are *not* errors; they
//! travel through [`WarningSink`](crate::domain::WarningSink) instead.
//!
//! # Error Construction Macros
//!
//! - `err_msg!(Config, "unknown option {}", key)` for message-only errors.
//! - `err_ctx!(Config, msg, name, text, span)` when the error points into a named source.
//!
//! Parse errors carry a [`ParseErrorKind`] rather than a free-form message and
//! are built with [`ScmError::parse`].

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::ast::Span;

pub type SourceArc = Arc<NamedSource<String>>;

/// The structural problem a signature failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A `)` where a value was expected.
    UnexpectedClose,
    /// A list ran to the end of input without its `)`.
    ExpectedClose,
    /// Input ended where a value was expected.
    UnexpectedEof,
    /// The signature parsed, but it is not a parenthesized form.
    NotAForm,
    /// The signature is `()`.
    EmptyForm,
    /// The head of the signature is itself a list.
    NameNotAtom,
}

impl ParseErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedClose => "unexpected closing parenthesis",
            ParseErrorKind::ExpectedClose => "expected closing parenthesis",
            ParseErrorKind::UnexpectedEof => "unexpected end of input",
            ParseErrorKind::NotAForm => "signature is not a parenthesized form",
            ParseErrorKind::EmptyForm => "signature form is empty",
            ParseErrorKind::NameNotAtom => "signature name must be an atom",
        }
    }

    fn help(&self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedClose => "remove the stray `)` or add the matching `(`",
            ParseErrorKind::ExpectedClose => "add the missing `)` at the end of the signature",
            ParseErrorKind::UnexpectedEof => "write the signature as `(name arg ...)`",
            ParseErrorKind::NotAForm => "wrap the signature in parentheses: `(name arg ...)`",
            ParseErrorKind::EmptyForm => "put the function name first: `(name arg ...)`",
            ParseErrorKind::NameNotAtom => "the first element names the function",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source, span and help attached to an error.
#[derive(Debug, Default)]
pub struct ErrorContext {
    pub source: Option<SourceArc>,
    pub span: Option<Span>,
    pub help: Option<String>,
}

impl ErrorContext {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_source_and_span(source: SourceArc, span: Span) -> Self {
        Self {
            source: Some(source),
            span: Some(span),
            help: None,
        }
    }
}

/// Unified error type for every scmdoc failure mode.
#[derive(Debug, Error)]
pub enum ScmError {
    #[error("Parse error: {kind}")]
    Parse { kind: ParseErrorKind, ctx: ErrorContext },
    #[error("Config error: {message}")]
    Config {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    #[error("I/O error: {message}")]
    Io {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl ScmError {
    /// Builds a parse error pointing at `span` inside `text`.
    pub fn parse(kind: ParseErrorKind, text: &str, span: Span) -> Self {
        let mut ctx = ErrorContext::with_source_and_span(to_error_source("signature", text), span);
        ctx.help = Some(kind.help().to_string());
        ScmError::Parse { kind, ctx }
    }

    /// Builds a parse error with no source attached yet.
    pub fn parse_bare(kind: ParseErrorKind) -> Self {
        let ctx = ErrorContext {
            help: Some(kind.help().to_string()),
            ..ErrorContext::none()
        };
        ScmError::Parse { kind, ctx }
    }

    /// The parse failure kind, if this is a parse error.
    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            ScmError::Parse { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Renames (or attaches) the source this error points into, so reports
    /// name the document rather than a bare signature.
    pub fn with_source(mut self, name: impl AsRef<str>, text: &str) -> Self {
        self.ctx_mut().source = Some(to_error_source(name, text));
        self
    }

    /// Attaches an underlying cause to a non-parse error.
    pub fn caused_by(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        match &mut self {
            ScmError::Config { source, .. }
            | ScmError::Io { source, .. }
            | ScmError::Internal { source, .. } => *source = Some(Box::new(cause)),
            ScmError::Parse { .. } => {}
        }
        self
    }

    fn get_ctx(&self) -> &ErrorContext {
        match self {
            ScmError::Parse { ctx, .. } => ctx,
            ScmError::Config { ctx, .. } => ctx,
            ScmError::Io { ctx, .. } => ctx,
            ScmError::Internal { ctx, .. } => ctx,
        }
    }

    fn ctx_mut(&mut self) -> &mut ErrorContext {
        match self {
            ScmError::Parse { ctx, .. } => ctx,
            ScmError::Config { ctx, .. } => ctx,
            ScmError::Io { ctx, .. } => ctx,
            ScmError::Internal { ctx, .. } => ctx,
        }
    }
}

impl Diagnostic for ScmError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self {
            ScmError::Parse { .. } => "scmdoc::parse",
            ScmError::Config { .. } => "scmdoc::config",
            ScmError::Io { .. } => "scmdoc::io",
            ScmError::Internal { .. } => "scmdoc::internal",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.get_ctx()
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.get_ctx()
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let ctx = self.get_ctx();
        // A span is only meaningful against the source it was taken from.
        ctx.source.as_ref()?;
        let span = ctx.span?;
        let text = match self {
            ScmError::Parse { kind, .. } => kind.to_string(),
            ScmError::Config { message, .. }
            | ScmError::Io { message, .. }
            | ScmError::Internal { message, .. } => message.clone(),
        };
        let label = LabeledSpan::new(Some(text), span.start, span.len());
        Some(Box::new(std::iter::once(label)))
    }
}

/// Wraps a source string in the shared `NamedSource` used by error contexts.
pub fn to_error_source(name: impl AsRef<str>, source: &str) -> SourceArc {
    Arc::new(NamedSource::new(name.as_ref(), source.to_string()))
}

/// Constructs a message-only `ScmError` variant.
#[macro_export]
macro_rules! err_msg {
    ($variant:ident, $msg:expr, $($arg:expr),+ $(,)?) => {
        $crate::ScmError::$variant {
            message: format!($msg, $($arg),+),
            ctx: $crate::ErrorContext::none(),
            source: None,
        }
    };
    ($variant:ident, $msg:expr) => {
        $crate::ScmError::$variant {
            message: format!("{}", $msg),
            ctx: $crate::ErrorContext::none(),
            source: None,
        }
    };
}

/// Constructs an `ScmError` variant that points into a named source.
#[macro_export]
macro_rules! err_ctx {
    // Message, source name, source text, span
    ($variant:ident, $msg:expr, $name:expr, $src:expr, $span:expr) => {
        $crate::ScmError::$variant {
            message: $msg.to_string(),
            ctx: $crate::ErrorContext {
                source: Some($crate::diagnostics::to_error_source($name, $src)),
                span: Some($span),
                help: None,
            },
            source: None,
        }
    };
}

#[cfg(test)]
mod diagnostics_tests {
    use miette::Report;

    use super::*;

    #[test]
    fn parse_error_report_names_the_problem() {
        let err = ScmError::parse(
            ParseErrorKind::ExpectedClose,
            "(make-foo bar",
            Span { start: 0, end: 13 },
        );
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("expected closing parenthesis"));
        assert!(output.contains("add the missing `)`"));
    }

    #[test]
    fn with_source_renames_the_report() {
        let err = ScmError::parse(ParseErrorKind::UnexpectedClose, ")", Span { start: 0, end: 1 })
            .with_source("api.rst:12", ")");
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("api.rst:12"));
    }

    #[test]
    fn message_errors_chain_their_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = err_msg!(Io, "failed to read '{}'", "conf.yaml").caused_by(cause);
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("failed to read 'conf.yaml'"));
        assert!(output.contains("no such file"));
    }

    #[test]
    fn bare_parse_errors_have_no_labels() {
        let err = ScmError::parse_bare(ParseErrorKind::NotAForm);
        assert!(err.labels().is_none());
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::NotAForm));
        assert_eq!(err.to_string(), "Parse error: signature is not a parenthesized form");
    }
}
