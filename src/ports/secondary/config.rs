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

use crate::domain::{DatasetConfig, DomainError};

/// Secondary port - Configuration provider abstraction
///
/// This interface abstracts how configuration is loaded,
/// allowing for different sources (files, environment, in-memory, etc.)
pub trait ConfigurationProvider: Send + Sync {
    /// Get the dataset run configuration
    ///
    /// # Returns
    /// * `Ok(DatasetConfig)` - Dataset configuration
    /// * `Err(DomainError)` - Error loading or validating configuration
    fn get_dataset_config(&self) -> Result<DatasetConfig, DomainError>;

    /// Check if verbose logging is enabled
    ///
    /// # Returns
    /// * `Ok(bool)` - true if verbose logging enabled
    /// * `Err(DomainError)` - Error loading configuration
    fn is_verbose_enabled(&self) -> Result<bool, DomainError> {
        Ok(self.get_dataset_config()?.verbose)
    }
}
