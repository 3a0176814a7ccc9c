use std::fmt;
use std::str::FromStr;

use depsieve_util::errors::DepsieveError;
use serde::{Deserialize, Serialize};

use crate::coordinate::{Coordinate, PackagingType};

/// Maven-compatible dependency scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeType {
    Compile,
    Provided,
    Runtime,
    Test,
    System,
    Import,
}

impl Default for ScopeType {
    fn default() -> Self {
        Self::Compile
    }
}

impl ScopeType {
    pub const ALL: [ScopeType; 6] = [
        Self::Compile,
        Self::Provided,
        Self::Runtime,
        Self::Test,
        Self::System,
        Self::Import,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Provided => "provided",
            Self::Runtime => "runtime",
            Self::Test => "test",
            Self::System => "system",
            Self::Import => "import",
        }
    }
}

impl FromStr for ScopeType {
    type Err = miette::Report;

    /// Case-insensitive; an empty string is the default `compile` scope.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                DepsieveError::InvalidArgument {
                    message: format!("unknown scope '{s}'"),
                }
                .into()
            })
    }
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transitive dependency to exclude. Either side may be the `*` wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Exclusion {
    pub group_id: String,
    pub artifact_id: String,
}

impl Exclusion {
    pub const WILDCARD: &'static str = "*";

    pub fn new(group_id: &str, artifact_id: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
        }
    }

    /// Parse `group:artifact` or a bare `group` (all artifacts of the group).
    pub fn parse(s: &str) -> miette::Result<Self> {
        let parts: Vec<&str> = s.trim().split(':').map(str::trim).collect();
        let (group, artifact) = match parts.as_slice() {
            [g] => (*g, Self::WILDCARD),
            [g, a] => (*g, *a),
            _ => {
                return Err(DepsieveError::CoordinateParse {
                    coordinate: s.to_string(),
                    message: "an exclusion is group[:artifact]".to_string(),
                }
                .into())
            }
        };
        if group.is_empty() || artifact.is_empty() {
            return Err(DepsieveError::CoordinateParse {
                coordinate: s.to_string(),
                message: "exclusion group and artifact must not be empty".to_string(),
            }
            .into());
        }
        Ok(Self::new(group, artifact))
    }

    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        let part = |pattern: &str, value: &str| pattern == Self::WILDCARD || pattern == value;
        part(&self.group_id, &coordinate.group_id) && part(&self.artifact_id, &coordinate.artifact_id)
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// Identity of a dependency slot: group, artifact and packaging.
///
/// Two declarations with the same key compete for the same slot in the
/// resolver regardless of classifier or version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyKey {
    pub group_id: String,
    pub artifact_id: String,
    pub packaging: PackagingType,
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.packaging)
    }
}

/// A declared dependency: coordinate, scope, optional flag and exclusions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub coordinate: Coordinate,
    pub scope: ScopeType,
    pub optional: bool,
    pub exclusions: Vec<Exclusion>,
}

impl Dependency {
    /// A `compile`-scoped, non-optional dependency without exclusions.
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            scope: ScopeType::default(),
            optional: false,
            exclusions: Vec::new(),
        }
    }

    /// Parse a coordinate string into a dependency with default scope.
    pub fn parse(s: &str) -> miette::Result<Self> {
        Coordinate::parse(s).map(Self::new)
    }

    pub fn with_scope(mut self, scope: ScopeType) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Add exclusions, skipping ones already present.
    pub fn with_exclusions<I>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = Exclusion>,
    {
        for excl in exclusions {
            if !self.exclusions.contains(&excl) {
                self.exclusions.push(excl);
            }
        }
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.coordinate = self.coordinate.with_version(version);
        self
    }

    pub fn key(&self) -> DependencyKey {
        DependencyKey {
            group_id: self.coordinate.group_id.clone(),
            artifact_id: self.coordinate.artifact_id.clone(),
            packaging: self.coordinate.packaging.clone(),
        }
    }

    /// Whether `other` occupies the same dependency slot as `self`.
    pub fn same_slot(&self, other: &Dependency) -> bool {
        self.coordinate.group_id == other.coordinate.group_id
            && self.coordinate.artifact_id == other.coordinate.artifact_id
            && self.coordinate.packaging == other.coordinate.packaging
    }

    /// Whether a transitive `coordinate` is cut off by this dependency's exclusions.
    pub fn excludes(&self, coordinate: &Coordinate) -> bool {
        self.exclusions.iter().any(|e| e.matches(coordinate))
    }

    pub fn to_canonical_form(&self) -> String {
        self.coordinate.to_canonical_form()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.coordinate, self.scope)?;
        if self.optional {
            f.write_str(" optional")?;
        }
        Ok(())
    }
}
