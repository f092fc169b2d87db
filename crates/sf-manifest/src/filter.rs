//! Managed-package exclusion.

use regex_lite::Regex;
use sf_inventory_metadata::ComponentRecord;
use tracing::warn;

const INSTALLED_STATE: &str = "installed";

/// Matches full names carrying an installed package's namespace, compiled
/// once per run as `^(ns1|ns2|...)+__`.
#[derive(Debug, Clone, Default)]
pub struct ManagedPackageFilter {
    pattern: Option<Regex>,
}

impl ManagedPackageFilter {
    /// Build the pattern from installed namespace prefixes. Blank prefixes
    /// are ignored; with none left the filter matches nothing.
    pub fn from_namespaces<I, S>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alternatives: Vec<String> = namespaces
            .into_iter()
            .map(|ns| ns.as_ref().trim().to_string())
            .filter(|ns| !ns.is_empty())
            .map(|ns| regex_lite::escape(&ns))
            .collect();

        if alternatives.is_empty() {
            return Self::none();
        }

        let source = format!("^({})+__", alternatives.join("|"));
        match Regex::new(&source) {
            Ok(pattern) => Self { pattern: Some(pattern) },
            Err(err) => {
                warn!(pattern = %source, error = %err, "installed package pattern rejected");
                Self::none()
            }
        }
    }

    /// A filter that matches nothing.
    pub fn none() -> Self {
        Self { pattern: None }
    }

    pub fn matches(&self, full_name: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(full_name))
    }

    /// Whether any managed signal holds for `record`: a namespaced full
    /// name, a namespace prefix, or the `installed` manageable state.
    pub fn excludes(&self, record: &ComponentRecord) -> bool {
        self.matches(&record.full_name)
            || record.is_namespaced()
            || record.manageable_state.as_deref() == Some(INSTALLED_STATE)
    }
}
