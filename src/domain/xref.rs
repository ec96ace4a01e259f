//! Cross-reference roles: title formatting and target resolution.

use serde::Serialize;
use tracing::debug;

use crate::domain::objtype::ObjType;
use crate::domain::ScmDomain;

/// A cross-reference as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingXRef<'a> {
    pub target: &'a str,
    /// Explicit title, when the author wrote `Title <target>`.
    pub title: Option<&'a str>,
}

/// A resolved link, ready for the host to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefNode {
    pub from_doc: String,
    pub to_doc: String,
    pub anchor: String,
    pub title: String,
    pub uri: String,
}

/// Builds a link from `from_doc` to `anchor` in `to_doc`.
pub fn make_refnode(from_doc: &str, to_doc: &str, anchor: &str, title: &str) -> RefNode {
    let uri = if from_doc == to_doc {
        format!("#{anchor}")
    } else {
        format!("{to_doc}.html#{anchor}")
    };
    RefNode {
        from_doc: from_doc.to_string(),
        to_doc: to_doc.to_string(),
        anchor: anchor.to_string(),
        title: title.to_string(),
        uri,
    }
}

/// A role that links mentions to registered objects.
pub trait XRefResolver {
    fn objtype(&self) -> ObjType;

    /// Returns the `(title, target)` pair the link is built from.
    fn process_link(&self, has_explicit_title: bool, title: &str, target: &str) -> (String, String);

    /// Resolves `xref` from `from_doc`. `None` means the target is unknown,
    /// which is an ordinary outcome.
    fn resolve(&self, domain: &ScmDomain, from_doc: &str, xref: &PendingXRef<'_>) -> Option<RefNode> {
        let (title, target) = match xref.title {
            Some(title) => self.process_link(true, title, xref.target),
            None => self.process_link(false, xref.target, xref.target),
        };
        let node = domain.resolve_xref(from_doc, &target, &title);
        if node.is_none() {
            debug!(from_doc, target = %target, "unresolved reference");
        }
        node
    }
}

/// The `scm:func` role.
#[derive(Debug, Default, Clone, Copy)]
pub struct FunctionXRef;

impl XRefResolver for FunctionXRef {
    fn objtype(&self) -> ObjType {
        ObjType::Function
    }

    /// Bare names render in call syntax: `(name)`.
    fn process_link(&self, has_explicit_title: bool, title: &str, target: &str) -> (String, String) {
        let title = if has_explicit_title {
            title.to_string()
        } else {
            format!("({title})")
        };
        (title, target.to_string())
    }
}
