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

use crate::domain::{ChartError, DatasetSummary, DomainError, RepositoryError, ServerRecord};
use rand::RngCore;
use std::path::PathBuf;

/// Primary port - Main interface offered by the dataset domain
///
/// This is what the entry point (or a library consumer) uses to run the
/// generate, persist, summarize and chart steps.
pub trait DatasetReportingService: Send + Sync {
    /// Generate records with pairwise distinct hostnames
    ///
    /// # Arguments
    /// * `count` - Number of records to generate
    /// * `rng` - Random generator owned by the caller for the whole run
    ///
    /// # Returns
    /// * `Ok(Vec<ServerRecord>)` - Exactly `count` records
    /// * `Err(DomainError)` - `count` exceeds the number of distinct hostnames
    fn generate_dataset(
        &self,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<ServerRecord>, DomainError>;

    /// Write the dataset snapshot as CSV into the output directory
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - Path of the written CSV file
    /// * `Err(RepositoryError)` - Error occurred while writing
    fn save_dataset(&self, records: &[ServerRecord]) -> Result<PathBuf, RepositoryError>;

    /// Read the CSV snapshot back from the output directory
    ///
    /// # Returns
    /// * `Ok(Vec<ServerRecord>)` - Validated records in file order
    /// * `Err(RepositoryError)` - Missing file, bad row or inconsistent record
    fn load_dataset(&self) -> Result<Vec<ServerRecord>, RepositoryError>;

    /// Compute the dataset overview
    fn summarize(&self, records: &[ServerRecord]) -> DatasetSummary;

    /// Write the summary statistics as JSON into the output directory
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - Path of the written JSON file
    /// * `Err(RepositoryError)` - Error occurred while writing
    fn export_summary(&self, summary: &DatasetSummary) -> Result<PathBuf, RepositoryError>;

    /// Render the six charts in their fixed order
    ///
    /// # Returns
    /// * `Ok(Vec<PathBuf>)` - Written image paths, in render order
    /// * `Err(ChartError)` - First chart that failed; later charts are skipped
    fn generate_charts(&self, records: &[ServerRecord]) -> Result<Vec<PathBuf>, ChartError>;
}
