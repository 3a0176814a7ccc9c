//! Shared utilities for depsieve.
//!
//! Cross-cutting concerns used by the other depsieve crates: the unified
//! error type and classpath/path helpers.

pub mod errors;
pub mod fs;
