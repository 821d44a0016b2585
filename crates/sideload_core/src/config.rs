//! Resolver manifest configuration.
//!
//! The allow-list evolves with the extension's own module manifest, so
//! membership is deployment data: a JSON manifest beside the extension
//! binaries, not a compiled-in snapshot.

use crate::allowlist::{AllowList, AllowListError};
use crate::diagnostics::Diagnostics;
use crate::loader::ModuleLoader;
use crate::resolver::LoadMissResolver;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Declarative resolver manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolverConfig {
    /// Directory holding the extension's deployed modules.
    pub install_dir: PathBuf,
    /// Module short names the resolver may supply from `install_dir`.
    pub allow: Vec<String>,
}

impl ResolverConfig {
    /// Parses and validates one JSON manifest document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses the manifest file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.install_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyInstallDir);
        }
        if self.allow.is_empty() {
            return Err(ConfigError::EmptyAllowList);
        }
        Ok(())
    }

    /// Builds the normalized allow-list declared by this manifest.
    pub fn allow_list(&self) -> Result<AllowList, ConfigError> {
        AllowList::from_names(&self.allow).map_err(ConfigError::AllowList)
    }

    /// Assembles a resolver for this manifest with injected collaborators.
    pub fn build_resolver<L: ModuleLoader>(
        &self,
        loader: L,
        diagnostics: Diagnostics,
    ) -> Result<LoadMissResolver<L>, ConfigError> {
        Ok(LoadMissResolver::new(
            self.install_dir.clone(),
            self.allow_list()?,
            loader,
            diagnostics,
        ))
    }
}

/// Manifest loading and validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    EmptyInstallDir,
    EmptyAllowList,
    AllowList(AllowListError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read manifest `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid manifest document: {err}"),
            Self::EmptyInstallDir => write!(f, "manifest install_dir must not be empty"),
            Self::EmptyAllowList => write!(f, "manifest allow-list must not be empty"),
            Self::AllowList(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::AllowList(err) => Some(err),
            Self::EmptyInstallDir | Self::EmptyAllowList => None,
        }
    }
}
