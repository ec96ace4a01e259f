//! Signature handling for `scm:function` descriptions.

use serde::Serialize;

use crate::diagnostics::ScmError;
use crate::domain::objtype::ObjType;
use crate::domain::warnings::WarningSink;
use crate::domain::ScmDomain;
use crate::syntax;

/// What a parsed signature contributes to the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    /// Canonical name, the head of the signature form.
    pub name: String,
    /// Text shown in the description header: the signature as written.
    pub display: String,
}

/// A general index entry, as `(kind, text, target, key)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub kind: &'static str,
    pub text: String,
    pub target: String,
    pub key: String,
}

/// A fully processed object description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub signature: Signature,
    /// Anchor ids attached to the signature node.
    pub ids: Vec<String>,
    pub index: IndexEntry,
}

/// Where a description is being processed.
pub struct DirectiveContext<'a> {
    pub docname: &'a str,
    pub line: Option<usize>,
    pub sink: &'a mut dyn WarningSink,
}

/// A directive that turns signature text into a registered object.
pub trait SignatureHandler {
    fn objtype(&self) -> ObjType;

    /// Parses `sig` into the object's name and display text.
    fn handle_signature(&self, sig: &str) -> Result<Signature, ScmError>;

    /// Registers the object with the domain and returns its index entry.
    fn add_target_and_index(
        &self,
        domain: &mut ScmDomain,
        signature: &Signature,
        ctx: &mut DirectiveContext<'_>,
    ) -> IndexEntry;

    /// Handles one signature end to end. A parse failure returns before
    /// anything is registered.
    fn run(
        &self,
        domain: &mut ScmDomain,
        sig: &str,
        ctx: &mut DirectiveContext<'_>,
    ) -> Result<Description, ScmError> {
        let signature = self.handle_signature(sig)?;
        let index = self.add_target_and_index(domain, &signature, ctx);
        Ok(Description {
            ids: vec![signature.name.clone()],
            signature,
            index,
        })
    }
}

/// The `scm:function` directive.
#[derive(Debug, Default, Clone, Copy)]
pub struct FunctionDirective;

impl SignatureHandler for FunctionDirective {
    fn objtype(&self) -> ObjType {
        ObjType::Function
    }

    fn handle_signature(&self, sig: &str) -> Result<Signature, ScmError> {
        let name = syntax::signature_name(sig)?;
        Ok(Signature {
            name,
            display: sig.to_string(),
        })
    }

    fn add_target_and_index(
        &self,
        domain: &mut ScmDomain,
        signature: &Signature,
        ctx: &mut DirectiveContext<'_>,
    ) -> IndexEntry {
        let name = &signature.name;
        domain.objects_mut().register(
            name,
            ctx.docname,
            self.objtype(),
            ctx.line,
            &mut *ctx.sink,
        );
        IndexEntry {
            kind: "single",
            text: format!("{} ({})", name, self.objtype().label()),
            target: name.clone(),
            key: name.clone(),
        }
    }
}
