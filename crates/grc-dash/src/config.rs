use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use grc_core::errors::{ErrorInfo, GrcError};
use grc_core::serde::from_yaml_slice;
use grc_data::{DatasetFiles, DatasetKind, DirectorySource};
use serde::{Deserialize, Serialize};

fn config_error(code: &str, message: impl Into<String>) -> GrcError {
    GrcError::Config(ErrorInfo::new(code, message))
}

/// Dashboard configuration, usually read from a YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Directory holding the four JSON documents.
    #[serde(default = "DashboardConfig::default_data_dir")]
    pub data_dir: PathBuf,
    /// File names of the collections inside `data_dir`.
    #[serde(default)]
    pub files: DatasetFiles,
    /// Rows per explorer page.
    #[serde(default = "DashboardConfig::default_page_size")]
    pub page_size: usize,
    /// Quiet period after the last search keystroke before recomputing.
    #[serde(default = "DashboardConfig::default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Rows shown in the bottom decisions table.
    #[serde(default = "DashboardConfig::default_decisions_limit")]
    pub decisions_limit: usize,
    /// Projects plotted in the impact chart.
    #[serde(default = "DashboardConfig::default_projects_chart_limit")]
    pub projects_chart_limit: usize,
}

impl DashboardConfig {
    fn default_data_dir() -> PathBuf {
        PathBuf::from("data")
    }
    fn default_page_size() -> usize {
        10
    }
    fn default_search_debounce_ms() -> u64 {
        250
    }
    fn default_decisions_limit() -> usize {
        15
    }
    fn default_projects_chart_limit() -> usize {
        10
    }

    /// Debounce window as a [`Duration`].
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Directory-backed source for the configured data files.
    pub fn directory_source(&self) -> DirectorySource {
        DirectorySource::new(self.data_dir.clone(), self.files.clone())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            files: DatasetFiles::default(),
            page_size: Self::default_page_size(),
            search_debounce_ms: Self::default_search_debounce_ms(),
            decisions_limit: Self::default_decisions_limit(),
            projects_chart_limit: Self::default_projects_chart_limit(),
        }
    }
}

/// Rejects configurations the dashboard cannot work with.
pub fn validate_config(config: &DashboardConfig) -> Result<(), GrcError> {
    if config.page_size == 0 {
        return Err(GrcError::Config(
            ErrorInfo::new("grc_dash.config_page_size", "page size must be positive")
                .with_hint("the default is 10 rows per page"),
        ));
    }
    if config.decisions_limit == 0 {
        return Err(config_error(
            "grc_dash.config_decisions_limit",
            "decisions table limit must be positive",
        ));
    }
    if config.projects_chart_limit == 0 {
        return Err(config_error(
            "grc_dash.config_projects_limit",
            "projects chart limit must be positive",
        ));
    }
    for kind in DatasetKind::ALL {
        if config.files.file_for(kind).trim().is_empty() {
            return Err(GrcError::Config(
                ErrorInfo::new("grc_dash.config_file", "dataset file name cannot be empty")
                    .with_context("dataset", kind.name()),
            ));
        }
    }
    Ok(())
}

/// Loads and validates a configuration file. A relative `data_dir` is
/// resolved against the directory containing the file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DashboardConfig, GrcError> {
    let config_path = path.as_ref();
    let bytes = fs::read(config_path).map_err(|err| {
        GrcError::Config(
            ErrorInfo::new("grc_dash.config_read", err.to_string())
                .with_context("path", config_path.display().to_string()),
        )
    })?;
    let mut config: DashboardConfig = from_yaml_slice(&bytes)?;
    if config.data_dir.is_relative() {
        let base = config_path.parent().unwrap_or_else(|| Path::new("."));
        config.data_dir = base.join(&config.data_dir);
    }
    validate_config(&config)?;
    Ok(config)
}
