use crate::dependency::Dependency;

/// Parsed project metadata that a working session can be populated from.
///
/// Only the two dependency sections are consulted; everything else a
/// descriptor carries is the concern of whoever parsed it.
pub trait DescriptorModel {
    /// Entries of the descriptor's `<dependencies>` section.
    fn dependencies(&self) -> Vec<Dependency>;

    /// Entries of the descriptor's `<dependencyManagement>` section.
    fn dependency_management(&self) -> Vec<Dependency>;
}
