//! Per-request working state: declared dependencies, dependency management
//! and the set handed to the resolver.

use std::collections::HashSet;

use depsieve_core::dependency::{Dependency, DependencyKey};
use depsieve_core::descriptor::DescriptorModel;

use crate::strategy::ResolutionStrategy;
use crate::version::VersionResolver;

/// Insertion-ordered dependency list deduplicated by dependency slot.
/// The first declaration for a slot wins.
#[derive(Debug, Clone, Default)]
struct DependencySet {
    items: Vec<Dependency>,
    keys: HashSet<DependencyKey>,
}

impl DependencySet {
    fn insert(&mut self, dependency: Dependency) -> bool {
        if !self.keys.insert(dependency.key()) {
            return false;
        }
        self.items.push(dependency);
        true
    }

    fn contains(&self, dependency: &Dependency) -> bool {
        self.keys.contains(&dependency.key())
    }
}

/// Mutable state for a single resolution request.
///
/// Collections only ever grow. A session is not meant to be shared between
/// concurrent resolutions.
#[derive(Debug, Clone, Default)]
pub struct WorkingSession {
    declared: DependencySet,
    management: DependencySet,
    for_resolution: DependencySet,
}

impl WorkingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the session from a parsed descriptor.
    ///
    /// Direct dependencies are declared and also recorded as management
    /// entries after the descriptor's own dependency management.
    pub fn load_descriptor<D: DescriptorModel>(&mut self, descriptor: &D) {
        let dependencies = descriptor.dependencies();
        let managed = descriptor.dependency_management();
        tracing::debug!(
            "loading descriptor: {} dependencies, {} managed",
            dependencies.len(),
            managed.len()
        );
        for dep in managed {
            self.add_managed_dependency(dep);
        }
        for dep in dependencies {
            self.add_managed_dependency(dep.clone());
            self.add_declared_dependency(dep);
        }
    }

    pub fn add_declared_dependency(&mut self, dependency: Dependency) -> bool {
        self.declared.insert(dependency)
    }

    pub fn add_managed_dependency(&mut self, dependency: Dependency) -> bool {
        self.management.insert(dependency)
    }

    pub fn add_dependency_for_resolution(&mut self, dependency: Dependency) -> bool {
        self.for_resolution.insert(dependency)
    }

    /// Move every declared dependency accepted by `strategy` into the
    /// resolution set. Returns how many were added.
    pub fn apply_strategy(&mut self, strategy: &ResolutionStrategy) -> usize {
        let mut added = 0;
        for dep in &self.declared.items {
            if self.for_resolution.contains(dep) {
                continue;
            }
            if strategy.accepts(dep, &self.for_resolution.items, &[]) {
                tracing::debug!("selected {dep} for resolution");
                self.for_resolution.insert(dep.clone());
                added += 1;
            } else {
                tracing::debug!("filtered out {dep}");
            }
        }
        added
    }

    /// The resolution set with every version filled in from dependency
    /// management. Fails on the first dependency whose version cannot be
    /// inferred.
    pub fn resolved_dependencies_for_resolution(&self) -> miette::Result<Vec<Dependency>> {
        self.for_resolution
            .items
            .iter()
            .map(|dep| {
                let version = VersionResolver::resolve(dep, self)?;
                Ok(dep.clone().with_version(&version))
            })
            .collect()
    }

    pub fn declared_dependencies(&self) -> &[Dependency] {
        &self.declared.items
    }

    pub fn dependency_management(&self) -> &[Dependency] {
        &self.management.items
    }

    pub fn dependencies_for_resolution(&self) -> &[Dependency] {
        &self.for_resolution.items
    }
}
