use std::path::PathBuf;

use depsieve_util::errors::DepsieveError;
use miette::Diagnostic;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = DepsieveError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_invalid_argument_display() {
    let err = DepsieveError::InvalidArgument {
        message: "no scopes given".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid argument: no scopes given");
}

#[test]
fn test_coordinate_parse_display_and_help() {
    let err = DepsieveError::CoordinateParse {
        coordinate: "foo".to_string(),
        message: "too few segments".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid coordinate 'foo': too few segments");
    let help = err.help().map(|h| h.to_string()).unwrap_or_default();
    assert!(help.contains("group:artifact"), "got: {help}");
}

#[test]
fn test_resolution_error_carries_detail_as_help() {
    let err = DepsieveError::Resolution {
        message: "no version for foo:bar:jar".to_string(),
        detail: Some("managed: foo:baz:jar:1.0".to_string()),
    };
    assert_eq!(
        err.to_string(),
        "Dependency resolution failed: no version for foo:bar:jar"
    );
    let help = err.help().map(|h| h.to_string()).unwrap_or_default();
    assert_eq!(help, "managed: foo:baz:jar:1.0");
}

#[test]
fn test_resolution_error_without_detail_has_no_help() {
    let err = DepsieveError::Resolution {
        message: "x".to_string(),
        detail: None,
    };
    assert!(err.help().is_none());
}

#[test]
fn test_composition_error_display() {
    let err = DepsieveError::Composition {
        message: "no filters".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid composition: no filters");
}

#[test]
fn test_descriptor_error_names_path() {
    let err = DepsieveError::Descriptor {
        path: PathBuf::from("/work/module/pom.xml"),
        message: "unexpected EOF".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Descriptor error in /work/module/pom.xml: unexpected EOF"
    );
}

#[test]
fn test_generic_error_display() {
    let err = DepsieveError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}

#[test]
fn test_miette_report_downcasts_back() {
    let report: miette::Report = DepsieveError::Config {
        message: "bad".to_string(),
    }
    .into();
    assert!(matches!(
        report.downcast_ref::<DepsieveError>(),
        Some(DepsieveError::Config { .. })
    ));
}
