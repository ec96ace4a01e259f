//! Finds Scheme domain markup in plain-text documentation sources.
//!
//! Directives occupy a line of their own:
//!
//! ```text
//! .. scm:function:: (make-foo bar baz)
//! ```
//!
//! Roles may appear anywhere in running text, with or without an explicit
//! title: ``:scm:func:`make-foo` `` or ``:scm:func:`the constructor <make-foo>` ``.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::domain::{PendingXRef, ScmDomain};

static DIRECTIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\.\.\s+scm:([A-Za-z][\w-]*)::(?:\s+(.*?))?\s*$")
        .expect("directive pattern is valid")
});

static ROLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":scm:([A-Za-z][\w-]*):`([^`]+)`").expect("role pattern is valid")
});

static EXPLICIT_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s*<([^<>]+)>$").expect("title pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveUse {
    pub line: usize,
    pub name: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleUse {
    pub line: usize,
    pub role: String,
    pub title: Option<String>,
    pub target: String,
}

impl RoleUse {
    pub fn as_pending(&self) -> PendingXRef<'_> {
        PendingXRef {
            target: &self.target,
            title: self.title.as_deref(),
        }
    }
}

/// Scheme markup found in one document. Line numbers are 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScannedDocument {
    pub docname: String,
    pub directives: Vec<DirectiveUse>,
    pub roles: Vec<RoleUse>,
}

pub fn scan(docname: &str, text: &str) -> ScannedDocument {
    let mut doc = ScannedDocument {
        docname: docname.to_string(),
        ..Default::default()
    };

    for (idx, line) in text.lines().enumerate() {
        let lineno = idx + 1;
        if let Some(caps) = DIRECTIVE_RE.captures(line) {
            doc.directives.push(DirectiveUse {
                line: lineno,
                name: caps[1].to_string(),
                signature: caps.get(2).map_or("", |m| m.as_str()).to_string(),
            });
            continue;
        }
        for caps in ROLE_RE.captures_iter(line) {
            let (title, target) = split_explicit_title(&caps[2]);
            doc.roles.push(RoleUse {
                line: lineno,
                role: caps[1].to_string(),
                title,
                target,
            });
        }
    }
    doc
}

fn split_explicit_title(content: &str) -> (Option<String>, String) {
    match EXPLICIT_TITLE_RE.captures(content) {
        Some(caps) => (Some(caps[1].to_string()), caps[2].trim().to_string()),
        None => (None, content.trim().to_string()),
    }
}

impl ScannedDocument {
    /// Markup naming a directive or role the domain does not define.
    pub fn unknown_markup<'a>(&'a self, domain: &'a ScmDomain) -> impl Iterator<Item = (usize, String)> + 'a {
        let directives = self
            .directives
            .iter()
            .filter(|d| domain.directive(&d.name).is_none())
            .map(|d| (d.line, format!("unknown directive type \"scm:{}\"", d.name)));
        let roles = self
            .roles
            .iter()
            .filter(|r| domain.role(&r.role).is_none())
            .map(|r| (r.line, format!("unknown interpreted text role \"scm:{}\"", r.role)));
        directives.chain(roles)
    }
}
