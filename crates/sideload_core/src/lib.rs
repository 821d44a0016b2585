//! Load-miss resolution for side-loaded extension modules.
//!
//! When the host's own module probing fails, the resolver consults an
//! allow-list of extension-owned module names and either supplies the module
//! from the extension's install directory or stays silent so the host's
//! normal failure path proceeds. Internal failures never cross the boundary:
//! they become one diagnostic line and a "no opinion" outcome.

pub mod allowlist;
pub mod config;
pub mod diagnostics;
pub mod hook;
pub mod identity;
pub mod loader;
pub mod logging;
pub mod resolver;

pub use allowlist::{AllowList, AllowListError};
pub use config::{ConfigError, ResolverConfig};
pub use diagnostics::{DiagnosticSink, Diagnostics, MemorySink, TraceSink};
pub use hook::{HookError, LoadMissEvents, ResolveCallback, ResolverHook, SubscriptionId};
pub use identity::{IdentityError, ModuleIdentity};
pub use loader::{LoadError, ModuleLoader, NativeLoader, NativeModule};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use resolver::{LoadMissResolver, ResolveError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
