//! Incremental build driver over a directory of documentation sources.
//!
//! 1. Discover source files and derive document names from their paths.
//! 2. Forget documents that disappeared.
//! 3. Clear the objects of every changed document, then re-read each one and
//!    register its `scm:function` signatures. A malformed signature is
//!    reported and skipped.
//! 4. Resolve every `scm:func` reference in every document.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::domain::{DirectiveContext, RefNode, Warning, WarningSink};
use crate::host::scanner::{scan, ScannedDocument};
use crate::session::{digest, BuildSession};
use crate::{err_msg, ScmError};

/// A reference whose target is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unresolved {
    pub docname: String,
    pub line: usize,
    pub role: String,
    pub target: String,
}

#[derive(Debug, Default)]
pub struct BuildReport {
    /// Documents (re)read in this build.
    pub read: Vec<String>,
    /// Documents dropped because their source is gone.
    pub removed: Vec<String>,
    /// Signatures registered.
    pub described: usize,
    /// Signatures that failed to parse.
    pub skipped: Vec<ScmError>,
    pub links: Vec<RefNode>,
    pub unresolved: Vec<Unresolved>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Gives warnings source-file locations instead of bare document names.
struct SourceTreeSink<'a> {
    inner: &'a mut dyn WarningSink,
    srcdir: &'a Path,
    suffix: &'a str,
}

impl WarningSink for SourceTreeSink<'_> {
    fn warn(&mut self, warning: Warning) {
        self.inner.warn(warning);
    }

    fn doc2path(&self, docname: &str) -> String {
        self.srcdir
            .join(format!("{docname}{}", self.suffix))
            .display()
            .to_string()
    }
}

pub struct Builder<'s> {
    session: &'s mut BuildSession,
    srcdir: PathBuf,
}

impl<'s> Builder<'s> {
    pub fn new(session: &'s mut BuildSession, srcdir: impl Into<PathBuf>) -> Self {
        Self {
            session,
            srcdir: srcdir.into(),
        }
    }

    /// Source files under the source dir, as sorted `(docname, path)` pairs.
    pub fn discover(&self) -> Result<Vec<(String, PathBuf)>, ScmError> {
        let suffix = self.session.config().source_suffix.as_str();
        let mut found = Vec::new();
        for entry in WalkDir::new(&self.srcdir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                err_msg!(Io, "failed to walk '{}'", self.srcdir.display()).caused_by(e)
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(docname) = docname_for(&self.srcdir, entry.path(), suffix) {
                found.push((docname, entry.path().to_path_buf()));
            }
        }
        found.sort();
        Ok(found)
    }

    pub fn build(&mut self, sink: &mut dyn WarningSink) -> Result<BuildReport, ScmError> {
        let mut report = BuildReport::default();
        let sources = self.discover()?;

        let present: BTreeSet<&str> = sources.iter().map(|(doc, _)| doc.as_str()).collect();
        let gone: Vec<String> = self
            .session
            .documents()
            .filter(|doc| !present.contains(doc))
            .map(str::to_string)
            .collect();
        for doc in gone {
            self.session.forget_document(&doc);
            report.removed.push(doc);
        }

        let srcdir = self.srcdir.clone();
        let suffix = self.session.config().source_suffix.clone();
        let mut sink = SourceTreeSink {
            inner: sink,
            srcdir: &srcdir,
            suffix: &suffix,
        };

        let mut scanned = Vec::with_capacity(sources.len());
        let mut outdated = Vec::new();
        for (index, (docname, path)) in sources.iter().enumerate() {
            let text = std::fs::read_to_string(path).map_err(|e| {
                err_msg!(Io, "failed to read '{}'", path.display()).caused_by(e)
            })?;
            let hash = digest(&text);
            if !self.session.is_current(docname, &hash) {
                outdated.push((index, hash));
            }
            scanned.push(scan(docname, &text));
        }

        // Every outdated document is cleared before any is re-read, so a name
        // moving between two changed documents is never seen twice.
        for (index, _) in &outdated {
            self.session.begin_document(&scanned[*index].docname);
        }
        for (index, hash) in outdated {
            let doc = &scanned[index];
            self.read_document(doc, &sources[index].1, &mut sink, &mut report);
            self.session.finish_document(&doc.docname, hash);
            report.read.push(doc.docname.clone());
        }

        let nitpicky = self.session.config().nitpicky;
        for doc in &scanned {
            self.resolve_references(doc, nitpicky, &mut sink, &mut report);
        }

        info!(
            read = report.read.len(),
            removed = report.removed.len(),
            described = report.described,
            skipped = report.skipped.len(),
            unresolved = report.unresolved.len(),
            "build finished"
        );
        Ok(report)
    }

    fn read_document(
        &mut self,
        doc: &ScannedDocument,
        path: &Path,
        sink: &mut SourceTreeSink<'_>,
        report: &mut BuildReport,
    ) {
        debug!(docname = %doc.docname, "reading document");

        let unknown: Vec<_> = doc.unknown_markup(self.session.domain()).collect();
        for (line, message) in unknown {
            let location = sink.doc2path(&doc.docname);
            sink.warn(Warning {
                docname: doc.docname.clone(),
                location,
                line: Some(line),
                message,
            });
        }

        for directive in &doc.directives {
            let Some(handler) = self.session.domain().directive(&directive.name) else {
                continue;
            };
            let mut ctx = DirectiveContext {
                docname: &doc.docname,
                line: Some(directive.line),
                sink: &mut *sink,
            };
            match handler.run(self.session.domain_mut(), &directive.signature, &mut ctx) {
                Ok(_) => report.described += 1,
                Err(err) => {
                    let origin = format!("{}:{}", path.display(), directive.line);
                    warn!(%origin, error = %err, "skipping malformed signature");
                    report.skipped.push(err.with_source(origin, &directive.signature));
                }
            }
        }
    }

    fn resolve_references(
        &self,
        doc: &ScannedDocument,
        nitpicky: bool,
        sink: &mut SourceTreeSink<'_>,
        report: &mut BuildReport,
    ) {
        let domain = self.session.domain();
        for role in &doc.roles {
            let Some(resolver) = domain.role(&role.role) else {
                continue;
            };
            match resolver.resolve(domain, &doc.docname, &role.as_pending()) {
                Some(node) => report.links.push(node),
                None => {
                    if nitpicky {
                        let location = sink.doc2path(&doc.docname);
                        sink.warn(Warning {
                            docname: doc.docname.clone(),
                            location,
                            line: Some(role.line),
                            message: format!(
                                "scm:{} reference target not found: {}",
                                role.role, role.target
                            ),
                        });
                    }
                    report.unresolved.push(Unresolved {
                        docname: doc.docname.clone(),
                        line: role.line,
                        role: role.role.clone(),
                        target: role.target.clone(),
                    });
                }
            }
        }
    }
}

/// `api/core.rst` under `srcdir` becomes `api/core`.
fn docname_for(srcdir: &Path, path: &Path, suffix: &str) -> Option<String> {
    let relative = path.strip_prefix(srcdir).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let joined = parts.join("/");
    let docname = joined.strip_suffix(suffix)?;
    if docname.is_empty() || docname.ends_with('/') {
        return None;
    }
    Some(docname.to_string())
}

/// Loads the saved session (if any), builds `srcdir`, and saves the session
/// back to `env_file`.
pub fn incremental_build(
    srcdir: &Path,
    env_file: &Path,
    config: Config,
    sink: &mut dyn WarningSink,
) -> Result<(BuildSession, BuildReport), ScmError> {
    let mut session = BuildSession::load(env_file, config)?;
    let report = Builder::new(&mut session, srcdir).build(sink)?;
    session.save(env_file)?;
    Ok((session, report))
}
