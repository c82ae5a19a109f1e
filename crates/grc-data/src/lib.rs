#![deny(missing_docs)]
#![doc = "Typed records, closed enumerations and the load-once dataset store."]

/// Closed enumerations used for filtering and tone mapping.
pub mod enums;
/// Record schemas for the four dashboard collections.
pub mod records;
/// Dataset sources (directory and in-memory).
pub mod source;
/// The immutable dataset store.
pub mod store;

pub use enums::{ComplianceStatus, Priority, ProjectStatus, RiskLevel};
pub use records::{
    display_number, DatasetKind, GovernanceRecord, PolicyRecord, ProjectRecord, QualityRecord,
    Record,
};
pub use source::{DatasetFiles, DatasetSource, DirectorySource, MemorySource};
pub use store::{DatasetStore, LoadManifest, ManifestEntry};
