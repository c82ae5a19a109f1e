use grc_core::errors::GrcError;
use grc_core::serde::from_json_slice;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{error, info};

use crate::records::{
    DatasetKind, GovernanceRecord, PolicyRecord, ProjectRecord, QualityRecord, Record,
};
use crate::source::DatasetSource;

/// Provenance of one loaded collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Collection described by the entry.
    pub kind: DatasetKind,
    /// Location the bytes were read from.
    pub location: String,
    /// Number of records decoded.
    pub records: usize,
    /// Hex encoded SHA-256 of the raw document.
    pub sha256: String,
}

/// Provenance of every collection in the store, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadManifest {
    /// One entry per collection.
    pub entries: Vec<ManifestEntry>,
}

impl LoadManifest {
    /// Entry for the given collection, if it was loaded from a source.
    pub fn entry(&self, kind: DatasetKind) -> Option<&ManifestEntry> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }
}

/// The four collections, loaded once and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetStore {
    governance: Vec<GovernanceRecord>,
    quality: Vec<QualityRecord>,
    projects: Vec<ProjectRecord>,
    policies: Vec<PolicyRecord>,
    manifest: LoadManifest,
}

type Fetched<R> = Result<(Vec<R>, ManifestEntry), GrcError>;

fn fetch_collection<R, S>(source: &S) -> Fetched<R>
where
    R: Record + DeserializeOwned,
    S: DatasetSource + ?Sized,
{
    let kind = R::KIND;
    let bytes = source.fetch(kind)?;
    let records: Vec<R> =
        from_json_slice(&bytes).map_err(|err| err.with_context("dataset", kind.name()))?;
    let entry = ManifestEntry {
        kind,
        location: source.locate(kind),
        records: records.len(),
        sha256: hex::encode(Sha256::digest(&bytes)),
    };
    info!(dataset = kind.name(), records = entry.records, "dataset loaded");
    Ok((records, entry))
}

impl DatasetStore {
    /// Fetches the four collections concurrently and joins them.
    ///
    /// Startup is all-or-nothing: the first failure (in load order) is
    /// returned and no partial store is produced.
    pub fn load<S>(source: &S) -> Result<Self, GrcError>
    where
        S: DatasetSource + ?Sized,
    {
        let ((governance, quality), (projects, policies)) = rayon::join(
            || {
                rayon::join(
                    || fetch_collection::<GovernanceRecord, S>(source),
                    || fetch_collection::<QualityRecord, S>(source),
                )
            },
            || {
                rayon::join(
                    || fetch_collection::<ProjectRecord, S>(source),
                    || fetch_collection::<PolicyRecord, S>(source),
                )
            },
        );
        let joined = Self::assemble(governance, quality, projects, policies);
        if let Err(err) = &joined {
            error!(error = %err, "dataset load failed");
        }
        joined
    }

    fn assemble(
        governance: Fetched<GovernanceRecord>,
        quality: Fetched<QualityRecord>,
        projects: Fetched<ProjectRecord>,
        policies: Fetched<PolicyRecord>,
    ) -> Result<Self, GrcError> {
        let (governance, governance_entry) = governance?;
        let (quality, quality_entry) = quality?;
        let (projects, projects_entry) = projects?;
        let (policies, policies_entry) = policies?;
        Ok(Self {
            governance,
            quality,
            projects,
            policies,
            manifest: LoadManifest {
                entries: vec![governance_entry, quality_entry, projects_entry, policies_entry],
            },
        })
    }

    /// Builds a store from already decoded collections. The manifest stays empty.
    pub fn from_parts(
        governance: Vec<GovernanceRecord>,
        quality: Vec<QualityRecord>,
        projects: Vec<ProjectRecord>,
        policies: Vec<PolicyRecord>,
    ) -> Self {
        Self {
            governance,
            quality,
            projects,
            policies,
            manifest: LoadManifest::default(),
        }
    }

    /// Governance and risk records.
    pub fn governance(&self) -> &[GovernanceRecord] {
        &self.governance
    }

    /// Data-quality records.
    pub fn quality(&self) -> &[QualityRecord] {
        &self.quality
    }

    /// Project alignment records.
    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    /// Policy catalog.
    pub fn policies(&self) -> &[PolicyRecord] {
        &self.policies
    }

    /// Provenance of the loaded collections.
    pub fn manifest(&self) -> &LoadManifest {
        &self.manifest
    }

    /// Number of records in the given collection.
    pub fn len(&self, kind: DatasetKind) -> usize {
        match kind {
            DatasetKind::Governance => self.governance.len(),
            DatasetKind::Quality => self.quality.len(),
            DatasetKind::Projects => self.projects.len(),
            DatasetKind::Policies => self.policies.len(),
        }
    }

    /// Returns true when every collection is empty.
    pub fn is_empty(&self) -> bool {
        DatasetKind::ALL.into_iter().all(|kind| self.len(kind) == 0)
    }

    /// First policy whose IT area equals `area`. Best effort, no referential guarantee.
    pub fn policy_for_area(&self, area: &str) -> Option<&PolicyRecord> {
        self.policies.iter().find(|policy| policy.it_area == area)
    }

    /// First project whose IT area equals `area`. Best effort, no referential guarantee.
    pub fn project_for_area(&self, area: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|project| project.it_area == area)
    }
}
