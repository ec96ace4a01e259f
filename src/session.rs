//! Build sessions: the owner of all cross-document state for one build.
//!
//! A session starts empty, is threaded by reference through every document
//! it processes, and is either discarded or saved for the next incremental
//! build. Nothing is shared between sessions.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::ScmDomain;
use crate::{err_msg, ScmError};

/// Bumped whenever the saved layout changes.
pub const ENV_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSession {
    version: u32,
    domain: ScmDomain,
    /// Content digest of every document read in this session.
    documents: BTreeMap<String, String>,
    #[serde(skip)]
    config: Config,
}

impl BuildSession {
    pub fn new(config: Config) -> Self {
        Self {
            version: ENV_VERSION,
            domain: ScmDomain::new(),
            documents: BTreeMap::new(),
            config,
        }
    }

    /// Ends the session, dropping all of its state.
    pub fn discard(self) {
        debug!(documents = self.documents.len(), objects = self.domain.objects().len(), "session discarded");
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn domain(&self) -> &ScmDomain {
        &self.domain
    }

    pub fn domain_mut(&mut self) -> &mut ScmDomain {
        &mut self.domain
    }

    /// Invalidates everything `docname` registered. Must run before the
    /// document registers anything new.
    pub fn begin_document(&mut self, docname: &str) {
        self.domain.clear_doc(docname);
        self.documents.remove(docname);
    }

    /// Marks `docname` as read with the given content digest.
    pub fn finish_document(&mut self, docname: &str, digest: String) {
        self.documents.insert(docname.to_string(), digest);
    }

    /// Drops a document that no longer exists.
    pub fn forget_document(&mut self, docname: &str) {
        self.domain.clear_doc(docname);
        if self.documents.remove(docname).is_some() {
            debug!(docname, "document removed");
        }
    }

    /// Whether `docname` was read with exactly this content.
    pub fn is_current(&self, docname: &str, digest: &str) -> bool {
        self.documents.get(docname).is_some_and(|d| d == digest)
    }

    pub fn documents(&self) -> impl Iterator<Item = &str> + '_ {
        self.documents.keys().map(String::as_str)
    }

    pub fn save(&self, path: &Path) -> Result<(), ScmError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| err_msg!(Internal, "failed to serialize session").caused_by(e))?;
        std::fs::write(path, json).map_err(|e| {
            err_msg!(Io, "failed to write environment '{}'", path.display()).caused_by(e)
        })?;
        debug!(path = %path.display(), "session saved");
        Ok(())
    }

    /// Restores a saved session, or starts a fresh one when there is nothing
    /// usable to restore.
    pub fn load(path: &Path, config: Config) -> Result<Self, ScmError> {
        if !path.exists() {
            return Ok(Self::new(config));
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            err_msg!(Io, "failed to read environment '{}'", path.display()).caused_by(e)
        })?;

        #[derive(Deserialize)]
        struct Header {
            version: u32,
        }
        let header: Header = serde_json::from_str(&text).map_err(|e| {
            err_msg!(Io, "corrupt environment '{}'", path.display()).caused_by(e)
        })?;
        if header.version != ENV_VERSION {
            info!(
                found = header.version,
                expected = ENV_VERSION,
                "environment version changed, starting a fresh build"
            );
            return Ok(Self::new(config));
        }

        let mut session: BuildSession = serde_json::from_str(&text).map_err(|e| {
            err_msg!(Io, "corrupt environment '{}'", path.display()).caused_by(e)
        })?;
        session.config = config;
        Ok(session)
    }
}

/// SHA-256 of a document's text, hex encoded.
pub fn digest(text: &str) -> String {
    Sha256::digest(text.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// A session behind one lock, for hosts that process documents in parallel.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<BuildSession>>,
}

impl SharedSession {
    pub fn new(session: BuildSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Runs `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut BuildSession) -> R) -> Result<R, ScmError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| err_msg!(Internal, "build session lock poisoned"))?;
        Ok(f(&mut guard))
    }

    /// Returns the session once no other handle remains.
    pub fn into_inner(self) -> Result<BuildSession, ScmError> {
        let mutex = Arc::try_unwrap(self.inner)
            .map_err(|_| err_msg!(Internal, "build session still shared"))?;
        mutex
            .into_inner()
            .map_err(|_| err_msg!(Internal, "build session lock poisoned"))
    }
}
