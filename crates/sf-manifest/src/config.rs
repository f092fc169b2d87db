//! Run configuration.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result};

/// Default manifest location.
pub const DEFAULT_OUTPUT_FILE: &str = "package.xml";

/// Environment variable prefix read by [`BuildFlags::from_env`].
pub const ENV_PREFIX: &str = "SF_INVENTORY_";

/// Raw flag input, as given on a command line or in a JSON config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildFlags {
    /// Drop managed-package components.
    pub excludemanaged: bool,
    /// API version; the connection's maximum when absent.
    pub apiversion: Option<String>,
    /// Comma-separated metadata type names. Empty means every type.
    pub quickfilter: Option<String>,
    /// Manifest output path.
    pub outputfile: Option<PathBuf>,
}

impl BuildFlags {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read `SF_INVENTORY_EXCLUDE_MANAGED`, `SF_INVENTORY_API_VERSION`,
    /// `SF_INVENTORY_QUICK_FILTER` and `SF_INVENTORY_OUTPUT_FILE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |suffix: &str| {
            lookup(&format!("{ENV_PREFIX}{suffix}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let excludemanaged = match var("EXCLUDE_MANAGED") {
            Some(value) => parse_bool(&value)?,
            None => false,
        };

        Ok(Self {
            excludemanaged,
            apiversion: var("API_VERSION"),
            quickfilter: var("QUICK_FILTER"),
            outputfile: var("OUTPUT_FILE").map(PathBuf::from),
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::new(ErrorKind::Config(format!(
            "expected a boolean for {ENV_PREFIX}EXCLUDE_MANAGED, got '{other}'"
        )))),
    }
}

/// Immutable configuration for one manifest build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    quick_filters: BTreeSet<String>,
    exclude_managed: bool,
    api_version: String,
    output_path: PathBuf,
}

impl BuildConfig {
    /// Merge flags over defaults. `default_api_version` is used when the
    /// flags carry no version, normally the connection's maximum.
    pub fn new(flags: BuildFlags, default_api_version: impl Into<String>) -> Self {
        let quick_filters = flags
            .quickfilter
            .as_deref()
            .map(split_filters)
            .unwrap_or_default();

        let api_version = flags
            .apiversion
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default_api_version.into());

        Self {
            quick_filters,
            exclude_managed: flags.excludemanaged,
            api_version,
            output_path: flags
                .outputfile
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
        }
    }

    pub fn with_quick_filters<I, S>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.quick_filters = filters
            .into_iter()
            .map(|f| f.as_ref().trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
        self
    }

    pub fn with_exclude_managed(mut self, exclude_managed: bool) -> Self {
        self.exclude_managed = exclude_managed;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn quick_filters(&self) -> &BTreeSet<String> {
        &self.quick_filters
    }

    /// Whether a type passes the quick filter. An empty filter passes all.
    pub fn includes(&self, type_name: &str) -> bool {
        self.quick_filters.is_empty() || self.quick_filters.contains(type_name)
    }

    pub fn exclude_managed(&self) -> bool {
        self.exclude_managed
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

fn split_filters(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}
