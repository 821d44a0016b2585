//! Module identity parsing for load-miss requests.

use std::error::Error;
use std::fmt::{Display, Formatter};

const MODULE_FILE_SUFFIXES: &[&str] = &[".dll", ".so", ".dylib"];

/// Parsed identity of one failed module-load request.
///
/// A full identity carries `key=value` attributes after the simple name,
/// e.g. `GitHub.Api, Version=1.0.0.0, Culture=neutral`. Only the simple
/// name participates in resolution decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleIdentity {
    full: String,
    short_name: String,
}

impl ModuleIdentity {
    /// Parses one request identity string.
    ///
    /// The short name is the segment before the first `,`, trimmed, with one
    /// trailing module-file suffix stripped case-insensitively.
    pub fn parse(request: &str) -> Result<Self, IdentityError> {
        let full = request.trim();
        if full.is_empty() {
            return Err(IdentityError::EmptyRequest);
        }

        let simple = full.split(',').next().unwrap_or(full).trim();
        let short_name = strip_module_suffix(simple);
        if short_name.is_empty() {
            return Err(IdentityError::MissingShortName(full.to_string()));
        }

        Ok(Self {
            full: full.to_string(),
            short_name: short_name.to_string(),
        })
    }

    /// The raw request identity, trimmed.
    pub fn full(&self) -> &str {
        &self.full
    }

    /// The simple module name used for allow-list and candidate lookups.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }
}

impl Display for ModuleIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full)
    }
}

fn strip_module_suffix(name: &str) -> &str {
    let lowered = name.to_ascii_lowercase();
    for suffix in MODULE_FILE_SUFFIXES {
        if lowered.ends_with(suffix) {
            // Suffixes are ASCII, so byte length is stable across case.
            return name[..name.len() - suffix.len()].trim_end();
        }
    }
    name
}

/// Identity parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    EmptyRequest,
    MissingShortName(String),
}

impl Display for IdentityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRequest => write!(f, "request identity must not be empty"),
            Self::MissingShortName(value) => {
                write!(f, "request identity has no module name: {value}")
            }
        }
    }
}

impl Error for IdentityError {}
