use depsieve_core::config::TransitiveRejection;
use depsieve_core::dependency::{Dependency, ScopeType};
use depsieve_resolver::filter::{
    CombinedFilter, RejectDependenciesFilter, ResolutionFilter, ScopeFilter, StrictFilter,
};
use depsieve_util::errors::DepsieveError;

fn dep(s: &str) -> Dependency {
    Dependency::parse(s).unwrap()
}

fn all_scopes_of(s: &str) -> Vec<Dependency> {
    ScopeType::ALL.iter().map(|scope| dep(s).with_scope(*scope)).collect()
}

#[test]
fn accept_all_accepts_everything() {
    let f = ResolutionFilter::AcceptAll;
    for d in all_scopes_of("foo:bar:1.0") {
        assert!(f.accepts(&d, &[], &[]));
        assert!(f.accepts(&d, &[], &[dep("x:y:1")]));
    }
}

#[test]
fn scope_filter_compile_rejects_test() {
    let f = ResolutionFilter::from(ScopeFilter::new(&[ScopeType::Compile]));
    assert!(f.accepts(&dep("foo:bar:1.0"), &[], &[]));
    assert!(!f.accepts(&dep("foo:bar:1.0").with_scope(ScopeType::Test), &[], &[]));
}

#[test]
fn scope_filter_matches_membership_for_every_scope_set() {
    let sets: [&[ScopeType]; 4] = [
        &[ScopeType::Compile],
        &[ScopeType::Test, ScopeType::Provided],
        &[ScopeType::Runtime, ScopeType::System, ScopeType::Import],
        &ScopeType::ALL,
    ];
    for set in sets {
        let f = ScopeFilter::new(set);
        for d in all_scopes_of("foo:bar:1.0") {
            assert_eq!(f.accepts(&d), set.contains(&d.scope), "{d} against {set:?}");
        }
    }
}

#[test]
fn strict_filter_requires_same_coordinate_and_scope() {
    let f = StrictFilter::new([dep("foo:bar:1.0"), dep("foo:baz:2.0").with_scope(ScopeType::Test)]);
    assert!(f.accepts(&dep("foo:bar:1.0")));
    assert!(!f.accepts(&dep("foo:bar:1.1")));
    assert!(!f.accepts(&dep("foo:bar:1.0").with_scope(ScopeType::Runtime)));
    assert!(!f.accepts(&dep("foo:bar:jar:sources:1.0")));
    assert!(f.accepts(&dep("foo:baz:2.0").with_scope(ScopeType::Test)));
    assert!(!f.accepts(&dep("foo:baz:2.0")));
}

#[test]
fn reject_filter_without_ancestors() {
    let f = RejectDependenciesFilter::new(TransitiveRejection::NearestAncestor, &["foo:bar"]).unwrap();
    for d in all_scopes_of("foo:bar:jar:1.0") {
        assert!(!f.accepts(&d, &[]), "{d} should be rejected");
    }
    assert!(f.accepts(&dep("foo:baz:1.0"), &[]));
}

#[test]
fn reject_filter_matches_by_slot_not_version_or_classifier() {
    let f = RejectDependenciesFilter::new(TransitiveRejection::Disabled, &["foo:bar:1.0"]).unwrap();
    assert!(!f.accepts(&dep("foo:bar:9.9"), &[]));
    assert!(!f.accepts(&dep("foo:bar:jar:sources:1.0"), &[]));
    assert!(f.accepts(&dep("foo:bar:war:1.0"), &[]));
}

#[test]
fn reject_filter_disabled_mode_ignores_ancestors() {
    let f = RejectDependenciesFilter::new(TransitiveRejection::Disabled, &["foo:bar"]).unwrap();
    assert!(f.accepts(&dep("a:b:1"), &[dep("foo:bar:1")]));
}

#[test]
fn reject_filter_nearest_ancestor_mode() {
    let f = RejectDependenciesFilter::new(TransitiveRejection::NearestAncestor, &["foo:bar"]).unwrap();
    // Only the nearest ancestor entry is consulted.
    assert!(!f.accepts(&dep("a:b:1"), &[dep("c:d:1")]));
    assert!(f.accepts(&dep("a:b:1"), &[dep("a:b:1"), dep("foo:bar:1")]));
}

#[test]
fn reject_filter_banned_ancestor_mode() {
    let f = RejectDependenciesFilter::new(TransitiveRejection::BannedAncestor, &["foo:bar", "x:y"]).unwrap();
    assert!(!f.accepts(&dep("a:b:1"), &[dep("c:d:1"), dep("x:y:1")]));
    assert!(f.accepts(&dep("a:b:1"), &[dep("c:d:1")]));
    assert_eq!(f.banned().len(), 2);
}

#[test]
fn reject_filter_requires_coordinates() {
    let none: [&str; 0] = [];
    let err = RejectDependenciesFilter::new(TransitiveRejection::Disabled, &none).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DepsieveError>(),
        Some(DepsieveError::InvalidArgument { .. })
    ));
}

#[test]
fn reject_filter_rejects_bad_coordinate() {
    let err = RejectDependenciesFilter::new(TransitiveRejection::Disabled, &["nope"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DepsieveError>(),
        Some(DepsieveError::CoordinateParse { .. })
    ));
}

#[test]
fn non_transitive_accepts_direct_or_selected() {
    let f = ResolutionFilter::NonTransitive;
    let selected = [dep("a:b:1")];
    assert!(f.accepts(&dep("x:y:1"), &[], &[]));
    assert!(!f.accepts(&dep("x:y:1"), &selected, &[dep("p:q:1")]));
    assert!(f.accepts(&dep("a:b:2"), &selected, &[dep("p:q:1")]));
}

#[test]
fn combined_filter_is_conjunctive() {
    let scope: ResolutionFilter = ScopeFilter::new(&[ScopeType::Compile, ScopeType::Test]).into();
    let reject: ResolutionFilter =
        RejectDependenciesFilter::new(TransitiveRejection::Disabled, &["foo:bar"]).unwrap().into();
    let combined = CombinedFilter::new(vec![scope.clone(), reject.clone()]).unwrap();

    let candidates = [
        dep("foo:bar:1"),
        dep("foo:baz:1"),
        dep("foo:baz:1").with_scope(ScopeType::Runtime),
        dep("foo:bar:1").with_scope(ScopeType::Test),
        dep("foo:qux:1").with_scope(ScopeType::Test),
    ];
    for d in &candidates {
        assert_eq!(
            combined.accepts(d, &[], &[]),
            scope.accepts(d, &[], &[]) && reject.accepts(d, &[], &[]),
            "{d}"
        );
    }
}

#[test]
fn combined_filter_nests() {
    let inner = CombinedFilter::new(vec![ResolutionFilter::AcceptAll]).unwrap();
    let outer = CombinedFilter::new(vec![inner.into(), ScopeFilter::new(&[]).into()]).unwrap();
    assert_eq!(outer.filters().len(), 2);
    assert!(outer.accepts(&dep("a:b:1"), &[], &[]));
    assert!(!outer.accepts(&dep("a:b:1").with_scope(ScopeType::Test), &[], &[]));
}

#[test]
fn combined_filter_requires_filters() {
    let err = CombinedFilter::new(Vec::new()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DepsieveError>(),
        Some(DepsieveError::Composition { .. })
    ));
}

#[test]
fn filters_are_idempotent() {
    let f: ResolutionFilter =
        RejectDependenciesFilter::new(TransitiveRejection::NearestAncestor, &["foo:bar"]).unwrap().into();
    let d = dep("a:b:1");
    let ancestors = [dep("c:d:1")];
    let first = f.accepts(&d, &[], &ancestors);
    for _ in 0..5 {
        assert_eq!(f.accepts(&d, &[], &ancestors), first);
    }
}
