use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all depsieve operations.
#[derive(Debug, Error, Diagnostic)]
pub enum DepsieveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required input was missing or empty.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A coordinate string does not follow `group:artifact[:type[:classifier]][:version]`.
    #[error("Invalid coordinate '{coordinate}': {message}")]
    #[diagnostic(help("Expected group:artifact[:type[:classifier]][:version]"))]
    CoordinateParse { coordinate: String, message: String },

    /// A dependency could not be prepared for resolution (e.g. no version).
    #[error("Dependency resolution failed: {message}")]
    Resolution {
        message: String,
        #[help]
        detail: Option<String>,
    },

    /// A combined filter or strategy was assembled from invalid parts.
    #[error("Invalid composition: {message}")]
    Composition { message: String },

    /// A project descriptor could not be read or parsed.
    #[error("Descriptor error in {}: {message}", .path.display())]
    Descriptor { path: PathBuf, message: String },

    /// Configuration could not be loaded.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check ~/.depsieve/config.toml for syntax errors"))]
    Config { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type DepsieveResult<T> = miette::Result<T>;
