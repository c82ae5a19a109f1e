use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use grc_core::errors::{ErrorInfo, GrcError};
use serde::{Deserialize, Serialize};

use crate::records::DatasetKind;

/// Provides the raw JSON document of each collection.
///
/// Implementations must be shareable across threads: the store fetches the
/// four collections concurrently.
pub trait DatasetSource: Send + Sync {
    /// Returns the raw bytes of the requested collection.
    fn fetch(&self, kind: DatasetKind) -> Result<Vec<u8>, GrcError>;

    /// Human readable location of the collection, used in logs and the load manifest.
    fn locate(&self, kind: DatasetKind) -> String;
}

/// File names of the four collections, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetFiles {
    /// Governance and risk records.
    #[serde(default = "DatasetFiles::default_governance")]
    pub governance: String,
    /// Data-quality records.
    #[serde(default = "DatasetFiles::default_quality")]
    pub quality: String,
    /// Project alignment records.
    #[serde(default = "DatasetFiles::default_projects")]
    pub projects: String,
    /// Policy catalog.
    #[serde(default = "DatasetFiles::default_policies")]
    pub policies: String,
}

impl DatasetFiles {
    fn default_governance() -> String {
        "governance_risk_data.json".into()
    }
    fn default_quality() -> String {
        "data_quality.json".into()
    }
    fn default_projects() -> String {
        "projects_alignment.json".into()
    }
    fn default_policies() -> String {
        "policies_catalog.json".into()
    }

    /// File name configured for the given collection.
    pub fn file_for(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::Governance => &self.governance,
            DatasetKind::Quality => &self.quality,
            DatasetKind::Projects => &self.projects,
            DatasetKind::Policies => &self.policies,
        }
    }
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            governance: Self::default_governance(),
            quality: Self::default_quality(),
            projects: Self::default_projects(),
            policies: Self::default_policies(),
        }
    }
}

/// Reads the collections from JSON files in a directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    files: DatasetFiles,
}

impl DirectorySource {
    /// Creates a source rooted at `root` using the given file names.
    pub fn new(root: impl Into<PathBuf>, files: DatasetFiles) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }

    /// Data directory of the source.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, kind: DatasetKind) -> PathBuf {
        self.root.join(self.files.file_for(kind))
    }
}

impl DatasetSource for DirectorySource {
    fn fetch(&self, kind: DatasetKind) -> Result<Vec<u8>, GrcError> {
        let path = self.path_for(kind);
        fs::read(&path).map_err(|err| {
            GrcError::Load(
                ErrorInfo::new("grc_data.fetch", err.to_string())
                    .with_context("dataset", kind.name())
                    .with_context("path", path.display().to_string())
                    .with_hint("serve the data directory alongside the dashboard"),
            )
        })
    }

    fn locate(&self, kind: DatasetKind) -> String {
        self.path_for(kind).display().to_string()
    }
}

/// Holds the collections in memory; handy for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    payloads: BTreeMap<DatasetKind, Vec<u8>>,
}

impl MemorySource {
    /// Creates an empty source; every fetch fails until a payload is added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the raw document for a collection.
    pub fn with(mut self, kind: DatasetKind, bytes: impl Into<Vec<u8>>) -> Self {
        self.payloads.insert(kind, bytes.into());
        self
    }
}

impl DatasetSource for MemorySource {
    fn fetch(&self, kind: DatasetKind) -> Result<Vec<u8>, GrcError> {
        self.payloads.get(&kind).cloned().ok_or_else(|| {
            GrcError::Load(
                ErrorInfo::new("grc_data.fetch", "dataset not registered")
                    .with_context("dataset", kind.name()),
            )
        })
    }

    fn locate(&self, kind: DatasetKind) -> String {
        format!("memory:{}", kind.name())
    }
}
