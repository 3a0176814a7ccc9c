//! Dependency selection pipeline: narrows declared dependencies into the set
//! handed to an external resolver, infers missing versions from dependency
//! management, and short-circuits lookups for modules of the running build.

pub mod filter;
pub mod session;
pub mod strategy;
pub mod version;
pub mod workspace;
