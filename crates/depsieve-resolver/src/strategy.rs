//! Resolution strategies: an ordered filter chain plus the policy deciding
//! which transitive dependencies the resolver may pull in on its own.

use std::collections::BTreeSet;

use depsieve_core::config::{RejectConfig, TransitiveConfig, TransitiveRejection};
use depsieve_core::dependency::{Dependency, ScopeType};
use depsieve_util::errors::DepsieveError;

use crate::filter::{RejectDependenciesFilter, ResolutionFilter, ScopeFilter};

/// Which transitive dependencies may be pulled in regardless of the filter chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitiveExclusionPolicy {
    allow_optional: bool,
    filtered_scopes: BTreeSet<ScopeType>,
}

impl Default for TransitiveExclusionPolicy {
    /// No optional transitives; `provided` and `test` never pulled in transitively.
    fn default() -> Self {
        Self {
            allow_optional: false,
            filtered_scopes: [ScopeType::Provided, ScopeType::Test].into_iter().collect(),
        }
    }
}

impl TransitiveExclusionPolicy {
    pub fn new(allow_optional: bool, filtered_scopes: &[ScopeType]) -> Self {
        Self {
            allow_optional,
            filtered_scopes: filtered_scopes.iter().copied().collect(),
        }
    }

    pub fn from_config(config: &TransitiveConfig) -> Self {
        Self {
            allow_optional: config.allow_optional,
            filtered_scopes: config.filtered_scopes.clone(),
        }
    }

    pub fn allow_optional(&self) -> bool {
        self.allow_optional
    }

    pub fn filtered_scopes(&self) -> &BTreeSet<ScopeType> {
        &self.filtered_scopes
    }

    /// Whether the resolver may pull `dependency` in transitively.
    pub fn accepts_transitive(&self, dependency: &Dependency) -> bool {
        (self.allow_optional || !dependency.optional)
            && !self.filtered_scopes.contains(&dependency.scope)
    }

    /// The strictest combination: optional only if both allow it, union of
    /// filtered scopes.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            allow_optional: self.allow_optional && other.allow_optional,
            filtered_scopes: self
                .filtered_scopes
                .union(&other.filtered_scopes)
                .copied()
                .collect(),
        }
    }
}

/// A reusable combination of filters and a transitive exclusion policy.
///
/// The filter chain is conjunctive: a dependency must pass every filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionStrategy {
    filters: Vec<ResolutionFilter>,
    policy: TransitiveExclusionPolicy,
}

impl ResolutionStrategy {
    fn with_filter(filter: ResolutionFilter) -> Self {
        Self {
            filters: vec![filter],
            policy: TransitiveExclusionPolicy::default(),
        }
    }

    /// Accept dependencies in any of `scopes`. At least one scope is required.
    pub fn accept_scopes(scopes: &[ScopeType]) -> miette::Result<Self> {
        if scopes.is_empty() {
            return Err(DepsieveError::InvalidArgument {
                message: "at least one scope must be accepted".to_string(),
            }
            .into());
        }
        Ok(Self::with_filter(ScopeFilter::new(scopes).into()))
    }

    /// Pass everything through, trusting the resolver's transitivity handling.
    pub fn transitive() -> Self {
        Self::with_filter(ResolutionFilter::AcceptAll)
    }

    /// Only dependencies without ancestors, or already selected ones.
    pub fn non_transitive() -> Self {
        Self::with_filter(ResolutionFilter::NonTransitive)
    }

    /// Reject the given coordinates (and, depending on `mode`, their descendants).
    pub fn reject_dependencies<S: AsRef<str>>(
        mode: TransitiveRejection,
        coordinates: &[S],
    ) -> miette::Result<Self> {
        Ok(Self::with_filter(
            RejectDependenciesFilter::new(mode, coordinates)?.into(),
        ))
    }

    /// Like [`Self::reject_dependencies`], with the mode taken from `[reject]`.
    pub fn reject_dependencies_from_config<S: AsRef<str>>(
        config: &RejectConfig,
        coordinates: &[S],
    ) -> miette::Result<Self> {
        Self::reject_dependencies(config.transitive_mode, coordinates)
    }

    /// Concatenate the filter chains of `strategies` in order.
    pub fn combined(strategies: &[ResolutionStrategy]) -> miette::Result<Self> {
        let Some((first, rest)) = strategies.split_first() else {
            return Err(DepsieveError::Composition {
                message: "a combined strategy needs at least one strategy".to_string(),
            }
            .into());
        };
        let mut combined = first.clone();
        for s in rest {
            combined.filters.extend(s.filters.iter().cloned());
            combined.policy = combined.policy.merge(&s.policy);
        }
        tracing::debug!(
            "combined {} strategies into {} filters",
            strategies.len(),
            combined.filters.len()
        );
        Ok(combined)
    }

    /// A copy of this strategy with `policy` as its transitive exclusion policy.
    pub fn with_policy(&self, policy: TransitiveExclusionPolicy) -> Self {
        Self {
            filters: self.filters.clone(),
            policy,
        }
    }

    pub fn resolution_filters(&self) -> &[ResolutionFilter] {
        &self.filters
    }

    pub fn transitive_exclusion_policy(&self) -> &TransitiveExclusionPolicy {
        &self.policy
    }

    /// Whether every filter in the chain accepts `dependency`.
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
