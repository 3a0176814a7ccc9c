//! Core data types for depsieve.
//!
//! This crate defines the value types the filtering pipeline works on:
//! artifact coordinates and packaging types, dependency scopes, dependency
//! declarations and exclusions, the descriptor model seam, and resolver
//! configuration.
//!
//! This crate is intentionally free of I/O beyond reading its config file.

pub mod config;
pub mod coordinate;
pub mod dependency;
pub mod descriptor;
