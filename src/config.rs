//! Build configuration, read from an optional YAML file.
//!
//! ```yaml
//! source_suffix: .txt
//! nitpicky: true
//! env_file: build/.scmdoc-env.json
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ast::Span;
use crate::{err_ctx, err_msg, ScmError};

pub const DEFAULT_SOURCE_SUFFIX: &str = ".rst";
pub const DEFAULT_ENV_FILE: &str = ".scmdoc-env.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Suffix of documentation source files.
    pub source_suffix: String,
    /// Report every unresolved cross-reference as a warning.
    pub nitpicky: bool,
    /// Where the session is saved between builds, relative to the source dir.
    pub env_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_suffix: DEFAULT_SOURCE_SUFFIX.to_string(),
            nitpicky: false,
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self, ScmError> {
        Self::from_named_yaml("config", text)
    }

    pub fn load(path: &Path) -> Result<Self, ScmError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            err_msg!(Io, "failed to read config '{}'", path.display()).caused_by(e)
        })?;
        Self::from_named_yaml(&path.display().to_string(), &text)
    }

    fn from_named_yaml(name: &str, text: &str) -> Result<Self, ScmError> {
        let config: Config = serde_yaml::from_str(text).map_err(|e| match e.location() {
            Some(loc) => err_ctx!(
                Config,
                format!("invalid configuration: {e}"),
                name,
                text,
                Span::new(loc.index(), loc.index())
            ),
            None => err_msg!(Config, "invalid configuration: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ScmError> {
        if !self.source_suffix.starts_with('.') || self.source_suffix.len() < 2 {
            return Err(err_msg!(
                Config,
                "source_suffix must look like '.rst', got '{}'",
                self.source_suffix
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_yaml("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_override() {
        let config = Config::from_yaml("source_suffix: .txt\nnitpicky: true\n").unwrap();
        assert_eq!(config.source_suffix, ".txt");
        assert!(config.nitpicky);
        assert_eq!(config.env_file, PathBuf::from(DEFAULT_ENV_FILE));
    }

    #[test]
    fn syntax_errors_point_into_the_file() {
        match Config::from_yaml("nitpicky: [true") {
            Err(ScmError::Config { ctx, .. }) => {
                assert!(ctx.source.is_some());
                assert!(ctx.span.is_some());
            }
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_keys_and_bad_suffixes() {
        assert!(matches!(
            Config::from_yaml("sufix: .txt"),
            Err(ScmError::Config { .. })
        ));
        assert!(matches!(
            Config::from_yaml("source_suffix: rst"),
            Err(ScmError::Config { .. })
        ));
    }
}
