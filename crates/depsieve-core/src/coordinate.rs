//! Artifact coordinates and packaging types.

use std::fmt;

use depsieve_util::errors::DepsieveError;
use serde::{Deserialize, Serialize};

/// Known packagings: `(name, file extension, implied classifier)`.
const KNOWN_PACKAGINGS: &[(&str, &str, &str)] = &[
    ("jar", "jar", ""),
    ("war", "war", ""),
    ("ear", "ear", ""),
    ("rar", "rar", ""),
    ("pom", "pom", ""),
    ("test-jar", "jar", "tests"),
    ("ejb", "jar", ""),
    ("ejb-client", "jar", "client"),
    ("maven-plugin", "jar", ""),
    ("bundle", "jar", ""),
    ("java-source", "jar", "sources"),
    ("javadoc", "jar", "javadoc"),
];

/// The packaging type of an artifact (`jar`, `war`, `pom`, ...).
///
/// Unknown names are kept as custom packagings whose extension is the name itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackagingType(String);

impl PackagingType {
    pub fn new(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() {
            Self::default()
        } else {
            Self(name.to_ascii_lowercase())
        }
    }

    pub fn jar() -> Self {
        Self("jar".to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    fn known(&self) -> Option<&'static (&'static str, &'static str, &'static str)> {
        KNOWN_PACKAGINGS.iter().find(|(n, _, _)| *n == self.0)
    }

    /// File extension of artifacts with this packaging.
    pub fn extension(&self) -> &str {
        match self.known() {
            Some((_, ext, _)) => *ext,
            None => self.0.as_str(),
        }
    }

    /// Classifier implied by the packaging, empty for most types.
    pub fn implied_classifier(&self) -> &str {
        self.known().map(|(_, _, c)| *c).unwrap_or("")
    }

    pub fn is_custom(&self) -> bool {
        self.known().is_none()
    }
}

impl Default for PackagingType {
    fn default() -> Self {
        Self::jar()
    }
}

impl fmt::Display for PackagingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Five-part artifact identity: group, artifact, packaging, classifier, version.
///
/// `version` is `None` when the coordinate was declared without one; such a
/// version is expected to come from dependency management.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub packaging: PackagingType,
    pub classifier: String,
    pub version: Option<String>,
}

/// Lookup identity used against dependency management: everything but the version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManagementKey {
    pub group_id: String,
    pub artifact_id: String,
    pub packaging: PackagingType,
    pub classifier: String,
}

impl Coordinate {
    pub fn new(group_id: &str, artifact_id: &str, version: Option<&str>) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            packaging: PackagingType::default(),
            classifier: String::new(),
            version: version.filter(|v| !v.is_empty()).map(str::to_string),
        }
    }

    /// Parse `group:artifact[:type[:classifier]][:version]`.
    ///
    /// Three segments are read as `group:artifact:version`, four as
    /// `group:artifact:type:version`.
    pub fn parse(s: &str) -> miette::Result<Self> {
        let parse_err = |message: &str| DepsieveError::CoordinateParse {
            coordinate: s.to_string(),
            message: message.to_string(),
        };

        let parts: Vec<&str> = s.trim().split(':').map(str::trim).collect();
        let (group, artifact, packaging, classifier, version) = match parts.as_slice() {
            [g, a] => (*g, *a, "", "", ""),
            [g, a, v] => (*g, *a, "", "", *v),
            [g, a, p, v] => (*g, *a, *p, "", *v),
            [g, a, p, c, v] => (*g, *a, *p, *c, *v),
            _ => return Err(parse_err("expected between 2 and 5 ':'-separated segments").into()),
        };
        if group.is_empty() {
            return Err(parse_err("group ID is empty").into());
        }
        if artifact.is_empty() {
            return Err(parse_err("artifact ID is empty").into());
        }

        let packaging = PackagingType::new(packaging);
        let classifier = if classifier.is_empty() {
            packaging.implied_classifier().to_string()
        } else {
            classifier.to_string()
        };

        Ok(Self {
            group_id: group.to_string(),
            artifact_id: artifact.to_string(),
            packaging,
            classifier,
            version: (!version.is_empty()).then(|| version.to_string()),
        })
    }

    pub fn with_packaging(mut self, packaging: PackagingType) -> Self {
        self.packaging = packaging;
        self
    }

    pub fn with_classifier(mut self, classifier: &str) -> Self {
        self.classifier = classifier.to_string();
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = (!version.is_empty()).then(|| version.to_string());
        self
    }

    /// The declared version, if any and non-empty.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref().filter(|v| !v.is_empty())
    }

    pub fn management_key(&self) -> ManagementKey {
        ManagementKey {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            packaging: self.packaging.clone(),
            classifier: self.classifier.clone(),
        }
    }

    /// File extension for this coordinate's artifact.
    pub fn extension(&self) -> &str {
        self.packaging.extension()
    }

    /// `group:artifact:packaging[:version]`, or
    /// `group:artifact:packaging:classifier:[version]` when a classifier is set.
    pub fn to_canonical_form(&self) -> String {
        let base = format!("{}:{}:{}", self.group_id, self.artifact_id, self.packaging);
        match (self.classifier.is_empty(), self.version()) {
            (true, None) => base,
            (true, Some(v)) => format!("{base}:{v}"),
            (false, v) => format!("{base}:{}:{}", self.classifier, v.unwrap_or_default()),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_form())
    }
}

impl fmt::Display for ManagementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.packaging)?;
        if !self.classifier.is_empty() {
            write!(f, ":{}", self.classifier)?;
        }
        Ok(())
    }
}
