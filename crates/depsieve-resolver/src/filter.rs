//! Resolution filters: pure predicates deciding whether a dependency is
//! forwarded to the resolver.
//!
//! Every filter receives the candidate, the dependencies already selected for
//! resolution, and the candidate's ancestor chain (nearest first; empty for
//! directly declared dependencies).

use std::collections::{BTreeSet, HashSet};

use depsieve_core::config::TransitiveRejection;
use depsieve_core::dependency::{Dependency, DependencyKey, ScopeType};
use depsieve_util::errors::DepsieveError;

/// The closed set of filters understood by a resolution strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionFilter {
    AcceptAll,
    Scope(ScopeFilter),
    Strict(StrictFilter),
    Reject(RejectDependenciesFilter),
    NonTransitive,
    Combined(CombinedFilter),
}

impl ResolutionFilter {
    pub fn accepts(
        &self,
        dependency: &Dependency,
        for_resolution: &[Dependency],
        ancestors: &[Dependency],
    ) -> bool {
        match self {
            Self::AcceptAll => true,
            Self::Scope(f) => f.accepts(dependency),
            Self::Strict(f) => f.accepts(dependency),
            Self::Reject(f) => f.accepts(dependency, ancestors),
            Self::NonTransitive => {
                ancestors.is_empty() || for_resolution.iter().any(|d| d.same_slot(dependency))
            }
            Self::Combined(f) => f.accepts(dependency, for_resolution, ancestors),
        }
    }
}

impl From<ScopeFilter> for ResolutionFilter {
    fn from(f: ScopeFilter) -> Self {
        Self::Scope(f)
    }
}

impl From<StrictFilter> for ResolutionFilter {
    fn from(f: StrictFilter) -> Self {
        Self::Strict(f)
    }
}

impl From<RejectDependenciesFilter> for ResolutionFilter {
    fn from(f: RejectDependenciesFilter) -> Self {
        Self::Reject(f)
    }
}

impl From<CombinedFilter> for ResolutionFilter {
    fn from(f: CombinedFilter) -> Self {
        Self::Combined(f)
    }
}

/// Accepts dependencies whose scope is in the allowed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFilter {
    allowed: BTreeSet<ScopeType>,
}

impl ScopeFilter {
    /// An empty scope list allows `compile` only.
    pub fn new(scopes: &[ScopeType]) -> Self {
        let mut allowed: BTreeSet<ScopeType> = scopes.iter().copied().collect();
        if allowed.is_empty() {
            allowed.insert(ScopeType::Compile);
        }
        Self { allowed }
    }

    pub fn allowed_scopes(&self) -> &BTreeSet<ScopeType> {
        &self.allowed
    }

    pub fn accepts(&self, dependency: &Dependency) -> bool {
        self.allowed.contains(&dependency.scope)
    }
}

/// Accepts only dependencies explicitly listed, matching the full coordinate
/// (version and classifier included) and the scope.
#[derive(Debug, Clone, PartialEq)]
pub struct StrictFilter {
    allowed: Vec<Dependency>,
}

impl StrictFilter {
    pub fn new<I>(allowed: I) -> Self
    where
        I: IntoIterator<Item = Dependency>,
    {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn accepts(&self, dependency: &Dependency) -> bool {
        self.allowed
            .iter()
            .any(|d| d.coordinate == dependency.coordinate && d.scope == dependency.scope)
    }
}

/// Rejects a fixed set of banned dependencies, matched by dependency slot
/// (group, artifact, packaging).
#[derive(Debug, Clone, PartialEq)]
pub struct RejectDependenciesFilter {
    banned: Vec<Dependency>,
    banned_keys: HashSet<DependencyKey>,
    transitive: TransitiveRejection,
}

impl RejectDependenciesFilter {
    /// Ban the given coordinates. Fails on an empty list or an unparsable coordinate.
    pub fn new<S: AsRef<str>>(
        transitive: TransitiveRejection,
        coordinates: &[S],
    ) -> miette::Result<Self> {
        if coordinates.is_empty() {
            return Err(DepsieveError::InvalidArgument {
                message: "at least one coordinate must be given to reject dependencies".to_string(),
            }
            .into());
        }
        let banned = coordinates
            .iter()
            .map(|c| Dependency::parse(c.as_ref()))
            .collect::<miette::Result<Vec<_>>>()?;
        let banned_keys = banned.iter().map(Dependency::key).collect();
        Ok(Self {
            banned,
            banned_keys,
            transitive,
        })
    }

    pub fn banned(&self) -> &[Dependency] {
        &self.banned
    }

    pub fn transitive_mode(&self) -> TransitiveRejection {
        self.transitive
    }

    fn is_banned(&self, dependency: &Dependency) -> bool {
        self.banned_keys.contains(&dependency.key())
    }

    pub fn accepts(&self, dependency: &Dependency, ancestors: &[Dependency]) -> bool {
        if self.is_banned(dependency) {
            return false;
        }
        match (self.transitive, ancestors.first()) {
            (TransitiveRejection::Disabled, _) | (_, None) => true,
            (TransitiveRejection::NearestAncestor, Some(nearest)) => dependency.same_slot(nearest),
            (TransitiveRejection::BannedAncestor, Some(_)) => {
                !ancestors.iter().any(|a| self.is_banned(a))
            }
        }
    }
}

/// Logical AND over its sub-filters, short-circuiting on the first rejection.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedFilter {
    filters: Vec<ResolutionFilter>,
}

impl CombinedFilter {
    pub fn new(filters: Vec<ResolutionFilter>) -> miette::Result<Self> {
        if filters.is_empty() {
            return Err(DepsieveError::Composition {
                message: "a combined filter needs at least one filter".to_string(),
            }
            .into());
        }
        Ok(Self { filters })
    }

    pub fn filters(&self) -> &[ResolutionFilter] {
        &self.filters
    }

    pub fn accepts(
        &self,
        dependency: &Dependency,
        for_resolution: &[Dependency],
        ancestors: &[Dependency],
    ) -> bool {
        self.filters
            .iter()
            .all(|f| f.accepts(dependency, for_resolution, ancestors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(s: &str) -> Dependency {
        Dependency::parse(s).unwrap()
    }

    #[test]
    fn empty_scope_filter_allows_compile() {
        let f = ScopeFilter::new(&[]);
        assert!(f.accepts(&dep("a:b:1")));
        assert!(!f.accepts(&dep("a:b:1").with_scope(ScopeType::Runtime)));
    }

    #[test]
    fn nearest_ancestor_mode_rejects_unrelated_transitive() {
        let f = RejectDependenciesFilter::new(TransitiveRejection::NearestAncestor, &["foo:bar"])
            .unwrap();
        let ancestors = [dep("x:y:1")];
        assert!(!f.accepts(&dep("a:b:1"), &ancestors));
        assert!(f.accepts(&dep("x:y:2"), &ancestors));
    }

    #[test]
    fn banned_ancestor_mode_cuts_subtree() {
        let f = RejectDependenciesFilter::new(TransitiveRejection::BannedAncestor, &["foo:bar"])
            .unwrap();
        assert!(!f.accepts(&dep("a:b:1"), &[dep("x:y:1"), dep("foo:bar:1")]));
        assert!(f.accepts(&dep("a:b:1"), &[dep("x:y:1")]));
    }
}
