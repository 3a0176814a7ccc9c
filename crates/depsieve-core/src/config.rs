use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dependency::ScopeType;

/// Resolver configuration loaded from `~/.depsieve/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub transitive: TransitiveConfig,

    #[serde(default)]
    pub reject: RejectConfig,

    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

/// Default transitive exclusion policy from `[transitive]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitiveConfig {
    #[serde(default, rename = "allow-optional")]
    pub allow_optional: bool,
    #[serde(default = "default_filtered_scopes", rename = "filtered-scopes")]
    pub filtered_scopes: BTreeSet<ScopeType>,
}

impl Default for TransitiveConfig {
    fn default() -> Self {
        Self {
            allow_optional: false,
            filtered_scopes: default_filtered_scopes(),
        }
    }
}

fn default_filtered_scopes() -> BTreeSet<ScopeType> {
    [ScopeType::Provided, ScopeType::Test].into_iter().collect()
}

/// How a reject filter treats dependencies that have ancestors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitiveRejection {
    /// Only the dependency itself is checked against the banned set.
    Disabled,
    /// With a non-empty ancestor chain the dependency must equal the nearest
    /// ancestor entry to be accepted.
    #[default]
    NearestAncestor,
    /// Rejected when any ancestor is itself banned.
    BannedAncestor,
}

/// Reject filter settings from `[reject]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RejectConfig {
    #[serde(default, rename = "transitive-mode")]
    pub transitive_mode: TransitiveRejection,
}

/// What the workspace locator does with a descriptor it cannot read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorErrorPolicy {
    /// Log a warning and keep scanning the remaining classpath entries.
    #[default]
    Skip,
    /// Fail the lookup with an error naming the descriptor.
    Abort,
}

/// Workspace locator settings from `[workspace]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Environment variables holding classpaths, highest priority first.
    #[serde(default = "default_classpath_vars", rename = "classpath-vars")]
    pub classpath_vars: Vec<String>,
    #[serde(default, rename = "descriptor-errors")]
    pub descriptor_errors: DescriptorErrorPolicy,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            classpath_vars: default_classpath_vars(),
            descriptor_errors: DescriptorErrorPolicy::default(),
        }
    }
}

fn default_classpath_vars() -> Vec<String> {
    vec![
        "SUREFIRE_TEST_CLASS_PATH".to_string(),
        "CLASSPATH".to_string(),
    ]
}

impl ResolverConfig {
    /// Load `~/.depsieve/config.toml`, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from an explicit path, or return defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            depsieve_util::errors::DepsieveError::Config {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            depsieve_util::errors::DepsieveError::Config {
                message: format!("Failed to parse config: {e}"),
            }
            .into()
        })
    }

    /// Returns the default path to the config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the depsieve data directory (`~/.depsieve/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".depsieve")
}
