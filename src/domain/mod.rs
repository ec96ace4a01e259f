//! The Scheme (`scm`) documentation domain.
//!
//! [`ScmDomain`] owns the object registry and exposes the hooks a host
//! documentation builder calls: directive and role lookup, per-document
//! clearing, cross-reference resolution and inventory enumeration. The reader
//! and the registry stay host-agnostic; [`FunctionDirective`] and
//! [`FunctionXRef`] are the thin adapters between them and the host.

use serde::{Deserialize, Serialize};

pub mod directive;
pub mod objtype;
pub mod registry;
pub mod warnings;
pub mod xref;

pub use directive::{
    Description, DirectiveContext, FunctionDirective, IndexEntry, Signature, SignatureHandler,
};
pub use objtype::ObjType;
pub use registry::{ObjectEntry, ObjectRecord, ObjectRegistry, SEARCH_PRIORITY};
pub use warnings::{CollectingSink, NullSink, Warning, WarningSink};
pub use xref::{make_refnode, FunctionXRef, PendingXRef, RefNode, XRefResolver};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScmDomain {
    objects: ObjectRegistry,
}

impl ScmDomain {
    pub const NAME: &'static str = "scm";
    pub const LABEL: &'static str = "Scheme";

    /// A domain with an empty object table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object_types(&self) -> &'static [ObjType] {
        ObjType::ALL
    }

    /// The directive registered under `name`, e.g. `function`.
    pub fn directive(&self, name: &str) -> Option<Box<dyn SignatureHandler>> {
        match ObjType::from_key(name)? {
            ObjType::Function => Some(Box::new(FunctionDirective)),
        }
    }

    /// The role registered under `name`, e.g. `func`.
    pub fn role(&self, name: &str) -> Option<Box<dyn XRefResolver>> {
        match ObjType::from_role(name)? {
            ObjType::Function => Some(Box::new(FunctionXRef)),
        }
    }

    pub fn directive_names(&self) -> Vec<&'static str> {
        ObjType::ALL.iter().map(ObjType::key).collect()
    }

    pub fn role_names(&self) -> Vec<&'static str> {
        ObjType::ALL
            .iter()
            .flat_map(|t| t.roles().iter().copied())
            .collect()
    }

    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.objects
    }

    pub fn clear_doc(&mut self, docname: &str) {
        self.objects.clear_doc(docname);
    }

    /// Link to `target` as seen from `from_doc`, or `None` if unknown.
    pub fn resolve_xref(&self, from_doc: &str, target: &str, title: &str) -> Option<RefNode> {
        let entry = self.objects.resolve(target)?;
        Some(make_refnode(from_doc, &entry.docname, target, title))
    }

    pub fn get_objects(&self) -> impl Iterator<Item = ObjectRecord<'_>> + '_ {
        self.objects.objects()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hooks_are_keyed_like_the_taxonomy() {
        let domain = ScmDomain::new();
        assert_eq!((ScmDomain::NAME, ScmDomain::LABEL), ("scm", "Scheme"));
        assert_eq!(domain.directive_names(), vec!["function"]);
        assert_eq!(domain.role_names(), vec!["func"]);
        assert_eq!(domain.directive("function").map(|d| d.objtype()), Some(ObjType::Function));
        assert_eq!(domain.role("func").map(|r| r.objtype()), Some(ObjType::Function));
        assert!(domain.directive("macro").is_none());
        assert!(domain.role("var").is_none());
    }

    #[test]
    fn clear_doc_then_resolve() {
        let mut domain = ScmDomain::new();
        let mut sink = CollectingSink::new();
        domain.objects_mut().register("f", "doc1", ObjType::Function, None, &mut sink);
        domain.objects_mut().register("f", "doc2", ObjType::Function, None, &mut sink);
        assert!(sink.messages()[0].contains("doc1"));

        domain.clear_doc("doc2");
        assert!(domain.resolve_xref("index", "f", "(f)").is_none());
        domain.clear_doc("doc1");
        assert_eq!(domain.get_objects().count(), 0);
    }
}
