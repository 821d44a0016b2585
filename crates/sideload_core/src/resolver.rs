//! Load-miss resolution over the extension install directory.
//!
//! # Responsibility
//! - Gate failed module-load requests through the extension allow-list.
//! - Supply allow-listed modules from the install directory only.
//!
//! # Invariants
//! - Requests rejected by the allow-list never touch the filesystem.
//! - No error crosses `resolve`; every internal failure becomes exactly one
//!   diagnostic line plus a "no opinion" outcome.

use crate::allowlist::AllowList;
use crate::diagnostics::Diagnostics;
use crate::identity::{IdentityError, ModuleIdentity};
use crate::loader::{LoadError, ModuleLoader};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Resolver supplying allow-listed modules when the host's own probing
/// misses.
///
/// All state is fixed at construction, so one value can serve resolution
/// callbacks from any number of host loader threads without locking.
pub struct LoadMissResolver<L: ModuleLoader> {
    install_dir: PathBuf,
    allow_list: AllowList,
    loader: L,
    diagnostics: Diagnostics,
}

impl<L: ModuleLoader> LoadMissResolver<L> {
    pub fn new(
        install_dir: impl Into<PathBuf>,
        allow_list: AllowList,
        loader: L,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            install_dir: install_dir.into(),
            allow_list,
            loader,
            diagnostics,
        }
    }

    /// The extension's deployed-binary directory, the sole alternate search
    /// path.
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Resolves one failed load request.
    ///
    /// Returns `Some(module)` only when the request's short name is
    /// allow-listed and the candidate file beside the extension binary
    /// exists and loads. Every other outcome, including internal errors, is
    /// `None` so the host's normal failure path proceeds.
    pub fn resolve(&self, request: &str) -> Option<L::Module> {
        match self.try_resolve(request) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.diagnostics.emit(&format!(
                    "error resolving `{}` from `{}`: {err}",
                    request.trim(),
                    self.install_dir.display()
                ));
                None
            }
        }
    }

    fn try_resolve(&self, request: &str) -> Result<Option<L::Module>, ResolveError> {
        let identity = ModuleIdentity::parse(request)?;

        // Allow-list gate comes first: rejected names must not reach the
        // filesystem.
        if !self.allow_list.contains(identity.short_name()) {
            debug!(
                "event=resolve_skip module=core name={} reason=not_allow_listed",
                identity.short_name()
            );
            return Ok(None);
        }

        let candidate = self.candidate_path(identity.short_name());
        if !candidate.is_file() {
            debug!(
                "event=resolve_miss module=core name={} candidate={}",
                identity.short_name(),
                candidate.display()
            );
            return Ok(None);
        }

        let module = self.loader.load(&candidate)?;
        debug!(
            "event=resolve_hit module=core name={} candidate={}",
            identity.short_name(),
            candidate.display()
        );
        Ok(Some(module))
    }

    fn candidate_path(&self, short_name: &str) -> PathBuf {
        self.install_dir
            .join(format!("{short_name}.{}", std::env::consts::DLL_EXTENSION))
    }
}

/// Internal resolution failure, never surfaced past `resolve`.
#[derive(Debug)]
pub enum ResolveError {
    Identity(IdentityError),
    Load(LoadError),
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity(err) => write!(f, "{err}"),
            Self::Load(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ResolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Identity(err) => Some(err),
            Self::Load(err) => Some(err),
        }
    }
}

impl From<IdentityError> for ResolveError {
    fn from(value: IdentityError) -> Self {
        Self::Identity(value)
    }
}

impl From<LoadError> for ResolveError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}
