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

use crate::domain::{DatasetSummary, RepositoryError, ServerRecord};
use std::path::Path;

/// Secondary port - Dataset storage abstraction
///
/// This interface abstracts file-based storage of generated datasets
pub trait DatasetRepository: Send + Sync {
    /// Save records as CSV with a header row and no index column
    ///
    /// # Arguments
    /// * `records` - Records to save, in order
    /// * `path` - File path to save to
    ///
    /// # Returns
    /// * `Ok(())` - Dataset successfully saved
    /// * `Err(RepositoryError)` - Error occurred during save
    fn save_csv(&self, records: &[ServerRecord], path: &Path) -> Result<(), RepositoryError>;

    /// Load records from a CSV file
    ///
    /// # Arguments
    /// * `path` - File path to load from
    ///
    /// # Returns
    /// * `Ok(Vec<ServerRecord>)` - Loaded records
    /// * `Err(RepositoryError)` - Error occurred during load or validation
    fn load_csv(&self, path: &Path) -> Result<Vec<ServerRecord>, RepositoryError>;

    /// Save a dataset summary in JSON format
    ///
    /// # Arguments
    /// * `summary` - The summary to save
    /// * `path` - File path to save to
    ///
    /// # Returns
    /// * `Ok(())` - Summary successfully saved
    /// * `Err(RepositoryError)` - Error occurred during save
    fn save_summary_json(&self, summary: &DatasetSummary, path: &Path)
        -> Result<(), RepositoryError>;

    /// Check if file exists
    fn file_exists(&self, path: &Path) -> bool;
}
