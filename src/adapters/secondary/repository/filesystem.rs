/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! File-based dataset repository (CSV snapshot and JSON summary)

use crate::domain::parsers::validate_record;
use crate::domain::{Catalog, DatasetSummary, DomainError, RepositoryError, ServerRecord};
use crate::ports::DatasetRepository;
use log::debug;
use std::fs;
use std::path::Path;

/// File system repository for datasets
pub struct CsvDatasetRepository {
    /// Catalog that loaded rows are validated against
    catalog: Catalog,
}

impl CsvDatasetRepository {
    /// Create a repository validating against the default catalog
    pub fn new() -> Self {
        Self::with_catalog(Catalog::default())
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

impl Default for CsvDatasetRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_parent(path: &Path) -> Result<(), RepositoryError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| RepositoryError::IoFailed(format!("Failed to create directory: {}", e))),
        _ => Ok(()),
    }
}

impl DatasetRepository for CsvDatasetRepository {
    fn save_csv(&self, records: &[ServerRecord], path: &Path) -> Result<(), RepositoryError> {
        ensure_parent(path)?;

        let mut writer = csv::Writer::from_path(path)
            .map_err(|e| RepositoryError::IoFailed(format!("Failed to open CSV file: {}", e)))?;

        // serde only emits the header together with the first row
        if records.is_empty() {
            writer.write_record(ServerRecord::COLUMNS).map_err(|e| {
                RepositoryError::SerializationFailed(format!("CSV header failed: {}", e))
            })?;
        }
        for record in records {
            writer.serialize(record).map_err(|e| {
                RepositoryError::SerializationFailed(format!("CSV serialization failed: {}", e))
            })?;
        }

        writer
            .flush()
            .map_err(|e| RepositoryError::IoFailed(format!("Failed to write CSV file: {}", e)))?;
        debug!("Wrote {} CSV rows to {}", records.len(), path.display());
        Ok(())
    }

    fn load_csv(&self, path: &Path) -> Result<Vec<ServerRecord>, RepositoryError> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| RepositoryError::IoFailed(format!("Failed to read CSV file: {}", e)))?;

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<ServerRecord>().enumerate() {
            // header is line 1
            let line = index + 2;
            let record = row.map_err(|e| {
                RepositoryError::SerializationFailed(format!(
                    "CSV deserialization failed at line {}: {}",
                    line, e
                ))
            })?;
            validate_record(&record, &self.catalog).map_err(|reason| {
                DomainError::InvalidRecord(format!("line {}: {}", line, reason))
            })?;
            records.push(record);
        }
        Ok(records)
    }

    fn save_summary_json(
        &self,
        summary: &DatasetSummary,
        path: &Path,
    ) -> Result<(), RepositoryError> {
        let json_string = serde_json::to_string_pretty(summary).map_err(|e| {
            RepositoryError::SerializationFailed(format!("JSON serialization failed: {}", e))
        })?;

        ensure_parent(path)?;
        fs::write(path, json_string)
            .map_err(|e| RepositoryError::IoFailed(format!("Failed to write JSON file: {}", e)))?;

        Ok(())
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
