//! Parser for the ridership dataset file
//!
//! The file is a JSON array of daily entries as written by the scraper:
//! `{"date": "DD.MM.YYYY", "weekday": "...", "bus": n, "metro": n, ...}`.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{CoreError, LoadReport};
use crate::models::RawRecord;
use crate::store::TimeSeriesStore;

/// Loads dataset files into a [`TimeSeriesStore`]
#[derive(Debug, Clone, Default)]
pub struct DatasetParser;

impl DatasetParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse dataset JSON; `path` is only used for error messages
    pub fn parse_str(
        &self,
        content: &str,
        path: &Path,
    ) -> Result<(TimeSeriesStore, LoadReport), CoreError> {
        let raw: Vec<RawRecord> =
            serde_json::from_str(content).map_err(|source| CoreError::JsonParse {
                path: path.to_path_buf(),
                message: source.to_string(),
                source,
            })?;

        let mut report = LoadReport::new();
        let store = TimeSeriesStore::from_raw(raw, &mut report)?;

        if store.is_empty() {
            warn!(path = %path.display(), "Dataset contains no records");
        }
        info!(
            path = %path.display(),
            records = report.records_loaded,
            coerced = report.values_coerced,
            "Dataset loaded"
        );

        Ok((store, report))
    }

    /// Read and parse a dataset file
    pub fn load(&self, path: &Path) -> Result<(TimeSeriesStore, LoadReport), CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
        self.parse_str(&content, path)
    }

    /// Async variant for loading off the render loop
    pub async fn load_async(
        &self,
        path: PathBuf,
    ) -> Result<(TimeSeriesStore, LoadReport), CoreError> {
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| read_error(&path, e))?;
        self.parse_str(&content, &path)
    }
}

fn read_error(path: &Path, source: std::io::Error) -> CoreError {
    if source.kind() == std::io::ErrorKind::NotFound {
        CoreError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        CoreError::FileRead {
            path: path.to_path_buf(),
            source,
        }
    }
}
