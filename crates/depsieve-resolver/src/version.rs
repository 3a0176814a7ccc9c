//! Version inference from dependency management.

use depsieve_core::dependency::Dependency;
use depsieve_util::errors::DepsieveError;

use crate::session::WorkingSession;

/// Supplies versions for dependencies declared without one.
pub struct VersionResolver;

impl VersionResolver {
    /// The version to resolve `dependency` at.
    ///
    /// An explicit version always wins. Otherwise the first dependency
    /// management entry with the same group, artifact, packaging and
    /// classifier supplies it.
    pub fn resolve(dependency: &Dependency, session: &WorkingSession) -> miette::Result<String> {
        if let Some(version) = dependency.coordinate.version() {
            return Ok(version.to_string());
        }

        let key = dependency.coordinate.management_key();
        let managed = session
            .dependency_management()
            .iter()
            .filter(|m| m.coordinate.management_key() == key)
            .find_map(|m| m.coordinate.version());

        if let Some(version) = managed {
            tracing::debug!("inferred version {version} for {key} from dependency management");
            return Ok(version.to_string());
        }

        let detail = describe_management(session.dependency_management());
        tracing::debug!("no managed version for {key}; {detail}");
        Err(DepsieveError::Resolution {
            message: format!(
                "dependency {} is missing a version and no dependencyManagement entry supplied one",
                dependency.to_canonical_form()
            ),
            detail: Some(detail),
        }
        .into())
    }
}

fn describe_management(managed: &[Dependency]) -> String {
    if managed.is_empty() {
        return "dependencyManagement is empty".to_string();
    }
    let mut out = format!("dependencyManagement consulted ({} entries):", managed.len());
    for m in managed {
        out.push_str("\n  ");
        out.push_str(&m.to_canonical_form());
    }
    out
}
