//! Object registry backing cross-reference resolution and search indexing.
//!
//! Maps a globally unique name to the document that describes it and the
//! object type. Names are case-sensitive.
//!
//! # Duplicates
//! Registering a name that is already present is not an error: a warning
//! naming the previous owner goes to the [`WarningSink`], then the new entry
//! replaces the old one.
//!
//! # Invalidation
//! [`ObjectRegistry::clear_doc`] drops every entry a document owns. Hosts call
//! it before re-reading a document so stale names neither linger nor trigger
//! false duplicate warnings.
//!
//! # Thread Safety
//! Not thread-safe. Hosts processing documents in parallel wrap the owning
//! session in a single mutex (see [`SharedSession`](crate::session::SharedSession)).
//!
//! # Example
//! ```rust
//! use scmdoc::domain::{CollectingSink, ObjType, ObjectRegistry};
//! let mut reg = ObjectRegistry::new();
//! let mut sink = CollectingSink::new();
//! reg.register("f", "doc1", ObjType::Function, None, &mut sink);
//! reg.register("f", "doc2", ObjType::Function, None, &mut sink);
//! assert_eq!(sink.warnings.len(), 1);
//! assert_eq!(reg.resolve("f").unwrap().docname, "doc2");
//! ```

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::objtype::ObjType;
use crate::domain::warnings::{Warning, WarningSink};

/// Search priority meaning "always include in full-text search".
pub const SEARCH_PRIORITY: i32 = 1;

/// Owner and type of a registered name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub docname: String,
    pub objtype: ObjType,
}

/// One inventory record, as handed to search indexers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObjectRecord<'a> {
    pub name: &'a str,
    pub display_name: &'a str,
    pub objtype: ObjType,
    pub docname: &'a str,
    pub anchor: &'a str,
    pub priority: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRegistry {
    objects: HashMap<String, ObjectEntry>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name` as described by `docname`.
    ///
    /// An existing entry is reported through `sink` (attributed to `docname`
    /// at `line`) and then overwritten.
    pub fn register(
        &mut self,
        name: &str,
        docname: &str,
        objtype: ObjType,
        line: Option<usize>,
        sink: &mut dyn WarningSink,
    ) {
        let entry = ObjectEntry {
            docname: docname.to_string(),
            objtype,
        };
        match self.objects.insert(name.to_string(), entry) {
            Some(previous) => {
                let message = format!(
                    "duplicate Scheme object description of {}, other instance in {}",
                    name,
                    sink.doc2path(&previous.docname)
                );
                warn!(object = name, docname, previous = %previous.docname, "duplicate object description");
                let location = sink.doc2path(docname);
                sink.warn(Warning {
                    docname: docname.to_string(),
                    location,
                    line,
                    message,
                });
            }
            None => debug!(object = name, docname, %objtype, "registered object"),
        }
    }

    /// Removes every entry owned by `docname`. A no-op for unknown documents.
    pub fn clear_doc(&mut self, docname: &str) {
        let before = self.objects.len();
        self.objects.retain(|_, entry| entry.docname != docname);
        let removed = before - self.objects.len();
        if removed > 0 {
            debug!(docname, removed, "cleared document objects");
        }
    }

    pub fn resolve(&self, name: &str) -> Option<&ObjectEntry> {
        self.objects.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Documents that currently own at least one entry.
    pub fn documents(&self) -> BTreeSet<&str> {
        self.objects.values().map(|e| e.docname.as_str()).collect()
    }

    /// Inventory records for the current entries, in no particular order.
    ///
    /// Each call walks the current state afresh.
    pub fn objects(&self) -> impl Iterator<Item = ObjectRecord<'_>> + '_ {
        self.objects.iter().map(|(name, entry)| ObjectRecord {
            name,
            display_name: name,
            objtype: entry.objtype,
            docname: &entry.docname,
            anchor: name,
            priority: SEARCH_PRIORITY,
        })
    }
}
