//! Maven descriptor support: reading `pom.xml` files into the dependency
//! model used by the working session and the workspace locator.

pub mod pom;
