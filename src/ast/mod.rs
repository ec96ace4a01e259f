//! Values produced by the signature reader.

// ============================================================================
// IMPORTS
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Byte range of a token in the signature text.
///
/// # Examples
///
/// ```rust
/// use scmdoc::ast::Span;
/// let span = Span { start: 1, end: 4 };
/// assert_eq!(span.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A parsed S-expression.
///
/// Atoms are opaque strings; the reader does not distinguish numbers,
/// strings or symbols. List elements keep source order.
///
/// # Examples
///
/// ```rust
/// use scmdoc::ast::Sexp;
/// let sexp = Sexp::list(vec![Sexp::atom("make-foo"), Sexp::atom("bar")]);
/// assert_eq!(sexp.to_string(), "(make-foo bar)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sexp {
    Atom(String),
    List(Vec<Sexp>),
}

// ============================================================================
// CONSTRUCTORS AND ACCESSORS
// ============================================================================

impl Sexp {
    pub fn atom(text: impl Into<String>) -> Self {
        Sexp::Atom(text.into())
    }

    pub fn list(items: Vec<Sexp>) -> Self {
        Sexp::List(items)
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Sexp::Atom(text) => Some(text),
            Sexp::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Sexp]> {
        match self {
            Sexp::List(items) => Some(items),
            Sexp::Atom(_) => None,
        }
    }

    /// First element of a non-empty list.
    pub fn head(&self) -> Option<&Sexp> {
        self.as_list().and_then(|items| items.first())
    }

    /// Number of atoms in the whole tree.
    pub fn atom_count(&self) -> usize {
        match self {
            Sexp::Atom(_) => 1,
            Sexp::List(items) => items.iter().map(Sexp::atom_count).sum(),
        }
    }
}

impl From<&str> for Sexp {
    fn from(text: &str) -> Self {
        Sexp::atom(text)
    }
}

impl From<Vec<Sexp>> for Sexp {
    fn from(items: Vec<Sexp>) -> Self {
        Sexp::list(items)
    }
}

// ============================================================================
// PRETTY PRINTING
// ============================================================================

/// Lists print as `(a b c)` with single spaces, whatever the source spacing.
impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::Atom(text) => f.write_str(text),
            Sexp::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}
