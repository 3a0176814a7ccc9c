use depsieve_core::coordinate::Coordinate;
use depsieve_core::dependency::{Dependency, Exclusion, ScopeType};

#[test]
fn dependency_scope_default_is_compile() {
    assert_eq!(ScopeType::default(), ScopeType::Compile);
}

#[test]
fn scope_parse_is_case_insensitive() {
    assert_eq!("TEST".parse::<ScopeType>().unwrap(), ScopeType::Test);
    assert_eq!("Provided".parse::<ScopeType>().unwrap(), ScopeType::Provided);
    assert_eq!("".parse::<ScopeType>().unwrap(), ScopeType::Compile);
}

#[test]
fn scope_parse_unknown_fails() {
    let err = "banana".parse::<ScopeType>().unwrap_err();
    assert!(err.to_string().contains("banana"));
}

#[test]
fn parsed_dependency_has_defaults() {
    let dep = Dependency::parse("foo:bar:1.0").unwrap();
    assert_eq!(dep.scope, ScopeType::Compile);
    assert!(!dep.optional);
    assert!(dep.exclusions.is_empty());
}

#[test]
fn key_ignores_classifier_and_version() {
    let a = Dependency::parse("foo:bar:jar:sources:1.0").unwrap();
    let b = Dependency::parse("foo:bar:2.0").unwrap().with_scope(ScopeType::Test);
    assert_eq!(a.key(), b.key());
    assert!(a.same_slot(&b));
}

#[test]
fn key_respects_packaging() {
    let a = Dependency::parse("foo:bar:war:1.0").unwrap();
    let b = Dependency::parse("foo:bar:1.0").unwrap();
    assert_ne!(a.key(), b.key());
    assert!(!a.same_slot(&b));
}

#[test]
fn with_exclusions_deduplicates() {
    let dep = Dependency::parse("foo:bar:1.0").unwrap().with_exclusions([
        Exclusion::new("commons-logging", "commons-logging"),
        Exclusion::new("commons-logging", "commons-logging"),
    ]);
    assert_eq!(dep.exclusions.len(), 1);
}

#[test]
fn exclusion_parse_bare_group_is_wildcard() {
    let excl = Exclusion::parse("org.slf4j").unwrap();
    assert_eq!(excl.artifact_id, "*");
    assert!(excl.matches(&Coordinate::parse("org.slf4j:slf4j-api:2.0").unwrap()));
    assert!(!excl.matches(&Coordinate::parse("org.other:slf4j-api:2.0").unwrap()));
}

#[test]
fn exclusion_parse_rejects_bad_input() {
    assert!(Exclusion::parse("a:b:c").is_err());
    assert!(Exclusion::parse(":b").is_err());
}

#[test]
fn dependency_excludes_matching_coordinate() {
    let dep = Dependency::parse("foo:bar:1.0")
        .unwrap()
        .with_exclusions([Exclusion::new("*", "junit")]);
    assert!(dep.excludes(&Coordinate::parse("junit:junit:4.13").unwrap()));
    assert!(!dep.excludes(&Coordinate::parse("junit:hamcrest:4.13").unwrap()));
}

#[test]
fn display_includes_scope_and_optional() {
    let dep = Dependency::parse("foo:bar:1.0")
        .unwrap()
        .with_scope(ScopeType::Runtime)
        .with_optional(true);
    assert_eq!(dep.to_string(), "foo:bar:jar:1.0 (runtime) optional");
}
