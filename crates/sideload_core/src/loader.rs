//! Module loading seam and native `libloading` implementation.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::{Path, PathBuf};

/// Loading backend injected into the resolver.
///
/// Production hosts use [`NativeLoader`]; tests substitute fakes to observe
/// which candidate paths the resolver actually hands over.
pub trait ModuleLoader {
    type Module;

    /// Loads one module from exactly `path`.
    fn load(&self, path: &Path) -> Result<Self::Module, LoadError>;
}

/// Module loaded by [`NativeLoader`].
///
/// Holds the library handle alive; dropping this value unloads the module.
pub struct NativeModule {
    path: PathBuf,
    library: libloading::Library,
}

impl NativeModule {
    /// The exact filesystem path the module was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn library(&self) -> &libloading::Library {
        &self.library
    }
}

impl Debug for NativeModule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeModule")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Dynamic-library loader over `libloading`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeLoader;

impl NativeLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ModuleLoader for NativeLoader {
    type Module = NativeModule;

    fn load(&self, path: &Path) -> Result<NativeModule, LoadError> {
        // Safety: candidates are restricted to the extension's own install
        // directory; running their initializers is the host's contract for
        // its deployed binaries.
        let library = unsafe { libloading::Library::new(path) }
            .map_err(|source| LoadError::new(path, source))?;
        Ok(NativeModule {
            path: path.to_path_buf(),
            library,
        })
    }
}

/// Failure to load one candidate module file.
#[derive(Debug)]
pub struct LoadError {
    path: PathBuf,
    source: Box<dyn Error + Send + Sync>,
}

impl LoadError {
    pub fn new(path: &Path, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to load module from `{}`: {}",
            self.path.display(),
            self.source
        )
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.source.as_ref())
    }
}
