//! Workspace shortcut: finds artifacts that are modules of the build currently
//! running by scanning its own classpath instead of asking a repository.
//!
//! Compiled-output directories (`<module>/target/classes`) are matched through
//! the module's `pom.xml` two levels up; packaged files are matched by their
//! `artifactId-version` name.

use std::path::{Path, PathBuf};

use depsieve_core::config::{DescriptorErrorPolicy, WorkspaceConfig};
use depsieve_core::coordinate::Coordinate;
use depsieve_maven::pom::parse_pom_file;
use depsieve_util::fs::{absolutize, ancestor, dedup_paths, split_classpath};

const DESCRIPTOR_FILE: &str = "pom.xml";

/// Classpath-backed artifact locator with a fixed, deduplicated entry list.
#[derive(Debug, Clone)]
pub struct WorkspaceArtifactLocator {
    entries: Vec<PathBuf>,
    descriptor_errors: DescriptorErrorPolicy,
}

impl WorkspaceArtifactLocator {
    /// Build from explicit entries, keeping the first occurrence of each.
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        Self {
            entries: dedup_paths(entries),
            descriptor_errors: DescriptorErrorPolicy::default(),
        }
    }

    /// Build from classpath strings; test-runner entries take priority.
    pub fn from_classpaths(test_classpath: Option<&str>, classpath: Option<&str>) -> Self {
        let entries = test_classpath
            .into_iter()
            .chain(classpath)
            .flat_map(split_classpath);
        Self::new(entries)
    }

    /// Build from the classpath environment variables named in `config`.
    pub fn from_env(config: &WorkspaceConfig) -> Self {
        let entries: Vec<PathBuf> = config
            .classpath_vars
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .flat_map(|cp| split_classpath(&cp))
            .collect();
        tracing::debug!("workspace classpath has {} entries", entries.len());
        Self::new(entries).with_descriptor_errors(config.descriptor_errors)
    }

    pub fn with_descriptor_errors(mut self, policy: DescriptorErrorPolicy) -> Self {
        self.descriptor_errors = policy;
        self
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Locate `coordinate` on the classpath. `Ok(None)` when no entry matches.
    ///
    /// A descriptor that cannot be read is skipped with a warning, or fails
    /// the lookup under [`DescriptorErrorPolicy::Abort`].
    pub fn find_artifact(&self, coordinate: &Coordinate) -> miette::Result<Option<PathBuf>> {
        for entry in &self.entries {
            let found = if entry.is_dir() {
                self.match_module_dir(entry, coordinate)?
            } else if entry.is_file() {
                match_packaged_file(entry, coordinate)
            } else {
                tracing::trace!("skipping missing classpath entry {}", entry.display());
                None
            };
            if let Some(path) = found {
                tracing::debug!("found {coordinate} in workspace at {}", path.display());
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    /// Version discovery is not supported through the classpath.
    pub fn find_versions(&self, _coordinate: &Coordinate) -> Vec<String> {
        Vec::new()
    }

    fn match_module_dir(
        &self,
        dir: &Path,
        coordinate: &Coordinate,
    ) -> miette::Result<Option<PathBuf>> {
        let dir = absolutize(dir);
        let Some(module_root) = ancestor(&dir, 2) else {
            tracing::trace!("{} has no module root above it", dir.display());
            return Ok(None);
        };
        let descriptor = module_root.join(DESCRIPTOR_FILE);
        if !descriptor.is_file() {
            return Ok(None);
        }

        let pom = match parse_pom_file(&descriptor) {
            Ok(pom) => pom,
            Err(e) => match self.descriptor_errors {
                DescriptorErrorPolicy::Abort => return Err(e),
                DescriptorErrorPolicy::Skip => {
                    tracing::warn!("ignoring unreadable workspace descriptor: {e}");
                    return Ok(None);
                }
            },
        };

        let matches = pom.coordinate().is_some_and(|module| {
            module.group_id == coordinate.group_id && module.artifact_id == coordinate.artifact_id
        });
        Ok(matches.then_some(descriptor))
    }
}

fn match_packaged_file(file: &Path, coordinate: &Coordinate) -> Option<PathBuf> {
    let version = coordinate.version()?;
    let prefix = format!("{}-{}", coordinate.artifact_id, version);
    let absolute = absolutize(file);
    if !absolute.to_string_lossy().contains(&prefix) {
        return None;
    }

    let extension = coordinate.extension();
    if extension == "pom" {
        // Named from the requested coordinate, not the entry's file stem, so
        // a classifier jar still maps to the plain `artifactId-version.pom`.
        let sibling = absolute.with_file_name(format!("{prefix}.pom"));
        return sibling.is_file().then_some(sibling);
    }

    let suffix = format!(".{extension}");
    let has_extension = absolute
        .file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(&suffix));
    has_extension.then_some(absolute)
}
