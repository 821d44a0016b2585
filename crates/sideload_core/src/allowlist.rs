//! Case-insensitive allow-list of extension-owned module names.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Immutable set of module short names the resolver may supply.
///
/// Names are normalized to ASCII lowercase at construction; membership checks
/// are case-insensitive. Membership is configuration data and never changes
/// for the lifetime of the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    names: BTreeSet<String>,
}

impl AllowList {
    /// Builds an allow-list from declared module short names.
    pub fn from_names<I, S>(names: I) -> Result<Self, AllowListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = BTreeSet::new();
        for name in names {
            let entry = name.as_ref().trim().to_ascii_lowercase();
            if entry.is_empty() {
                return Err(AllowListError::EmptyName);
            }
            if !normalized.insert(entry.clone()) {
                return Err(AllowListError::DuplicateName(entry));
            }
        }
        Ok(Self { names: normalized })
    }

    /// Case-insensitive membership check.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.trim().to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns normalized (lowercased, sorted) member names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Allow-list construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowListError {
    EmptyName,
    DuplicateName(String),
}

impl Display for AllowListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "allow-list name must not be empty"),
            Self::DuplicateName(value) => {
                write!(f, "allow-list name is duplicated: {value}")
            }
        }
    }
}

impl Error for AllowListError {}

#[cfg(test)]
mod tests {
    use super::{AllowList, AllowListError};

    #[test]
    fn matches_names_case_insensitively() {
        let allow = AllowList::from_names(["GitHub.App"]).expect("allow-list build");
        assert!(allow.contains("github.app"));
        assert!(allow.contains("GITHUB.APP"));
        assert!(allow.contains("GitHub.App"));
        assert!(!allow.contains("GitHub.Api"));
    }

    #[test]
    fn trims_membership_probes() {
        let allow = AllowList::from_names(["GitHub.Api"]).expect("allow-list build");
        assert!(allow.contains("  github.api  "));
    }

    #[test]
    fn exposes_normalized_sorted_names() {
        let allow =
            AllowList::from_names(["GitHub.UI", "GitHub.Api"]).expect("allow-list build");
        let names: Vec<&str> = allow.names().collect();
        assert_eq!(names, vec!["github.api", "github.ui"]);
        assert_eq!(allow.len(), 2);
        assert!(!allow.is_empty());
    }

    #[test]
    fn rejects_blank_name() {
        let err = AllowList::from_names(["GitHub.Api", "   "])
            .expect_err("blank name must be rejected");
        assert_eq!(err, AllowListError::EmptyName);
    }

    #[test]
    fn rejects_case_variant_duplicates() {
        let err = AllowList::from_names(["GitHub.Api", "github.api"])
            .expect_err("duplicate name must be rejected");
        assert_eq!(err, AllowListError::DuplicateName("github.api".to_string()));
    }

    #[test]
    fn empty_iterator_builds_empty_list() {
        let allow = AllowList::from_names(std::iter::empty::<&str>()).expect("empty build");
        assert!(allow.is_empty());
        assert!(!allow.contains("anything"));
    }
}
