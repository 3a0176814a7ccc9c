//! POM reading: project coordinates, parent reference, properties,
//! dependencies and dependency management.

use std::collections::BTreeMap;
use std::path::Path;

use depsieve_core::coordinate::{Coordinate, PackagingType};
use depsieve_core::dependency::{Dependency, Exclusion, ScopeType};
use depsieve_core::descriptor::DescriptorModel;
use depsieve_util::errors::DepsieveError;
use quick_xml::events::Event;
use quick_xml::Reader;

const MAX_INTERPOLATION_DEPTH: usize = 20;

/// A parsed POM (Project Object Model) file.
#[derive(Debug, Clone, Default)]
pub struct Pom {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,

    pub parent: Option<ParentRef>,
    pub properties: BTreeMap<String, String>,
    pub dependencies: Vec<PomDependency>,
    pub dependency_management: Vec<PomDependency>,
}

/// Reference to a parent POM.
#[derive(Debug, Clone, Default)]
pub struct ParentRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

/// A dependency declared in a POM file.
#[derive(Debug, Clone, Default)]
pub struct PomDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub optional: bool,
    pub classifier: Option<String>,
    pub type_: Option<String>,
    pub exclusions: Vec<PomExclusion>,
}

/// An exclusion within a dependency declaration.
#[derive(Debug, Clone, Default)]
pub struct PomExclusion {
    pub group_id: String,
    pub artifact_id: Option<String>,
}

impl Pom {
    /// Effective group ID (falls back to parent).
    pub fn effective_group_id(&self) -> Option<&str> {
        non_empty(self.group_id.as_deref())
            .or(self.parent.as_ref().map(|p| p.group_id.as_str()))
            .filter(|s| !s.is_empty())
    }

    /// Effective version (falls back to parent).
    pub fn effective_version(&self) -> Option<&str> {
        non_empty(self.version.as_deref())
            .or(self.parent.as_ref().map(|p| p.version.as_str()))
            .filter(|s| !s.is_empty())
    }

    /// Effective packaging, `jar` when the POM declares none.
    pub fn effective_packaging(&self) -> PackagingType {
        PackagingType::new(self.packaging.as_deref().unwrap_or_default())
    }

    /// The project's own coordinate, if group and artifact can be determined.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let group = self.effective_group_id()?;
        let artifact = non_empty(self.artifact_id.as_deref())?;
        let version = self.effective_version().map(|v| self.interpolate(v));
        Some(
            Coordinate::new(&self.interpolate(group), &self.interpolate(artifact), version.as_deref())
                .with_packaging(self.effective_packaging()),
        )
    }

    /// Resolve `${property}` references in a string using POM properties
    /// and built-in project variables.
    ///
    /// A reference that is unknown, cyclic, or nested deeper than
    /// `MAX_INTERPOLATION_DEPTH` is left in place verbatim.
    pub fn interpolate(&self, input: &str) -> String {
        self.interpolate_with(input, &mut Vec::new())
    }

    fn interpolate_with(&self, input: &str, expanding: &mut Vec<String>) -> String {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                out.push_str(&rest[start..]);
                return out;
            };
            let key = &after[..end];
            let expandable =
                expanding.len() < MAX_INTERPOLATION_DEPTH && !expanding.iter().any(|k| k == key);
            match self.resolve_property(key).filter(|_| expandable) {
                Some(value) => {
                    expanding.push(key.to_string());
                    out.push_str(&self.interpolate_with(&value, expanding));
                    expanding.pop();
                }
                None => out.push_str(&rest[start..start + end + 3]),
            }
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        out
    }

    fn resolve_property(&self, key: &str) -> Option<String> {
        match key {
            "project.groupId" | "pom.groupId" => self.effective_group_id().map(|s| s.to_string()),
            "project.artifactId" | "pom.artifactId" => self.artifact_id.clone(),
            "project.version" | "pom.version" => self.effective_version().map(|s| s.to_string()),
            "project.packaging" | "pom.packaging" => self.packaging.clone(),
            "project.parent.groupId" => self.parent.as_ref().map(|p| p.group_id.clone()),
            "project.parent.version" => self.parent.as_ref().map(|p| p.version.clone()),
            _ => self.properties.get(key).cloned(),
        }
    }

    /// Convert a POM dependency entry into a declaration, interpolating
    /// property references on the way.
    fn to_dependency(&self, dep: &PomDependency) -> Dependency {
        let packaging = PackagingType::new(dep.type_.as_deref().unwrap_or_default());
        let classifier = dep
            .classifier
            .as_deref()
            .map(|c| self.interpolate(c))
            .unwrap_or_else(|| packaging.implied_classifier().to_string());
        let version = dep.version.as_deref().map(|v| self.interpolate(v));

        let coordinate = Coordinate::new(
            &self.interpolate(&dep.group_id),
            &self.interpolate(&dep.artifact_id),
            version.as_deref(),
        )
        .with_packaging(packaging)
        .with_classifier(&classifier);

        let scope_str = dep.scope.as_deref().map(|s| self.interpolate(s)).unwrap_or_default();
        let scope = scope_str.parse::<ScopeType>().unwrap_or_else(|_| {
            tracing::warn!(
                "unknown scope '{scope_str}' on {}, treating it as compile",
                coordinate
            );
            ScopeType::Compile
        });

        let exclusions = dep.exclusions.iter().map(|e| {
            Exclusion::new(
                &self.interpolate(&e.group_id),
                e.artifact_id.as_deref().unwrap_or(Exclusion::WILDCARD),
            )
        });

        Dependency::new(coordinate)
            .with_scope(scope)
            .with_optional(dep.optional)
            .with_exclusions(exclusions)
    }
}

impl DescriptorModel for Pom {
    fn dependencies(&self) -> Vec<Dependency> {
        self.dependencies.iter().map(|d| self.to_dependency(d)).collect()
    }

    fn dependency_management(&self) -> Vec<Dependency> {
        self.dependency_management
            .iter()
            .map(|d| self.to_dependency(d))
            .collect()
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// Read and parse a POM file, tying any failure to its path.
pub fn parse_pom_file(path: &Path) -> miette::Result<Pom> {
    let xml = std::fs::read_to_string(path).map_err(|e| DepsieveError::Descriptor {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_pom(&xml).map_err(|e| {
        DepsieveError::Descriptor {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Parse a POM XML string into a `Pom` struct.
pub fn parse_pom(xml: &str) -> miette::Result<Pom> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pom = Pom::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    let mut current_dep: Option<PomDependency> = None;
    let mut current_exclusion: Option<PomExclusion> = None;
    let mut current_parent: Option<ParentRef> = None;
    let mut in_dep_mgmt = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                path.push(tag);
                text_buf.clear();

                let ctx = path_context(&path);
                match ctx.as_str() {
                    "project>dependencyManagement>dependencies>dependency"
                    | "project>dependencies>dependency" => {
                        in_dep_mgmt = ctx.contains("dependencyManagement");
                        current_dep = Some(PomDependency::default());
                    }
                    _ if ctx.ends_with(">exclusion") && current_dep.is_some() => {
                        current_exclusion = Some(PomExclusion::default());
                    }
                    "project>parent" => {
                        current_parent = Some(ParentRef::default());
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                text_buf = match e.unescape() {
                    Ok(text) => text.to_string(),
                    Err(err) => {
                        return Err(DepsieveError::Generic {
                            message: format!(
                                "Failed to parse POM XML: bad text at position {}: {err}",
                                reader.buffer_position()
                            ),
                        }
                        .into());
                    }
                };
            }
            Ok(Event::End(_)) => {
                let ctx = path_context(&path);
                let depth = path.len();
                let leaf = path.last().map(|s| s.as_str());

                // <project><properties><key>value</key></properties>
                if depth == 3 && path.get(1).map(|s| s.as_str()) == Some("properties") {
                    if let Some(name) = leaf {
                        pom.properties.insert(name.to_string(), text_buf.clone());
                    }
                }

                if let Some(ref mut dep) = current_dep {
                    if let Some(ref mut excl) = current_exclusion {
                        match leaf {
                            Some("groupId") => excl.group_id = text_buf.clone(),
                            Some("artifactId") => excl.artifact_id = Some(text_buf.clone()),
                            _ => {}
                        }
                        if ctx.ends_with(">exclusion") {
                            if let Some(excl) = current_exclusion.take() {
                                dep.exclusions.push(excl);
                            }
                        }
                    } else if depth >= 2 && path[depth - 2] == "dependency" {
                        match leaf {
                            Some("groupId") => dep.group_id = text_buf.clone(),
                            Some("artifactId") => dep.artifact_id = text_buf.clone(),
                            Some("version") => dep.version = Some(text_buf.clone()),
                            Some("scope") => dep.scope = Some(text_buf.clone()),
                            Some("optional") => dep.optional = text_buf.trim() == "true",
                            Some("classifier") => dep.classifier = Some(text_buf.clone()),
                            Some("type") => dep.type_ = Some(text_buf.clone()),
                            _ => {}
                        }
                    }

                    if ctx == "project>dependencies>dependency"
                        || ctx == "project>dependencyManagement>dependencies>dependency"
                    {
                        if let Some(dep) = current_dep.take() {
                            if in_dep_mgmt {
                                pom.dependency_management.push(dep);
                            } else {
                                pom.dependencies.push(dep);
                            }
                        }
                        in_dep_mgmt = false;
                    }
                }

                if let Some(ref mut parent) = current_parent {
                    match ctx.as_str() {
                        "project>parent>groupId" => parent.group_id = text_buf.clone(),
                        "project>parent>artifactId" => parent.artifact_id = text_buf.clone(),
                        "project>parent>version" => parent.version = text_buf.clone(),
                        "project>parent" => pom.parent = current_parent.take(),
                        _ => {}
                    }
                }

                // Top-level project fields
                if depth == 2 {
                    match leaf {
                        Some("groupId") => pom.group_id = Some(text_buf.clone()),
                        Some("artifactId") => pom.artifact_id = Some(text_buf.clone()),
                        Some("version") => pom.version = Some(text_buf.clone()),
                        Some("packaging") => pom.packaging = Some(text_buf.clone()),
                        _ => {}
                    }
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DepsieveError::Generic {
                    message: format!("Failed to parse POM XML: {e}"),
                }
                .into());
            }
            _ => {}
        }
    }

    if !path.is_empty() {
        return Err(DepsieveError::Generic {
            message: format!("Failed to parse POM XML: unclosed <{}>", path.join("><")),
        }
        .into());
    }

    Ok(pom)
}

/// Build a context string from the current XML path for matching.
fn path_context(path: &[String]) -> String {
    path.join(">")
}
