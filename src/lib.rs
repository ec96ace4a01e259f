//! scmdoc: a Scheme signature reader and cross-reference domain for
//! documentation builds.
//!
//! ```rust
//! use scmdoc::domain::{CollectingSink, DirectiveContext, FunctionDirective, ScmDomain, SignatureHandler};
//! let mut domain = ScmDomain::new();
//! let mut sink = CollectingSink::new();
//! let mut ctx = DirectiveContext { docname: "api", line: Some(3), sink: &mut sink };
//! let desc = FunctionDirective.run(&mut domain, "(make-foo bar baz)", &mut ctx).unwrap();
//! assert_eq!(desc.signature.name, "make-foo");
//! assert_eq!(domain.resolve_xref("guide", "make-foo", "(make-foo)").unwrap().to_doc, "api");
//! ```

pub use crate::diagnostics::{ErrorContext, ParseErrorKind, ScmError};

pub mod ast;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod host;
pub mod session;
pub mod syntax;
