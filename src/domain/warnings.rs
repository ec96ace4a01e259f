//! Warning delivery from the domain to the host.

use std::fmt;

use serde::Serialize;

/// A non-fatal problem found while processing a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// Document the warning is attributed to.
    pub docname: String,
    /// Where to show it: usually the document's source path.
    pub location: String,
    pub line: Option<usize>,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: WARNING: {}", self.location, line, self.message),
            None => write!(f, "{}: WARNING: {}", self.location, self.message),
        }
    }
}

/// Where non-fatal warnings go.
///
/// `doc2path` maps a document name to the location shown to the author; the
/// default shows the document name itself.
pub trait WarningSink {
    fn warn(&mut self, warning: Warning);

    fn doc2path(&self, docname: &str) -> String {
        docname.to_string()
    }
}

/// Buffers warnings for tests and programmatic callers.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub warnings: Vec<Warning>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|w| w.message.as_str()).collect()
    }
}

impl WarningSink for CollectingSink {
    fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}

/// Drops every warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl WarningSink for NullSink {
    fn warn(&mut self, _warning: Warning) {}
}
