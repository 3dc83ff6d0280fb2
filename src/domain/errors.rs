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

use thiserror::Error;

/// Domain-level errors that don't expose infrastructure details
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// More unique hostnames were requested than the catalog can produce
    #[error("Requested {requested} unique hostnames but only {capacity} combinations exist")]
    CapacityExceeded { requested: usize, capacity: usize },
    /// An operation needs at least one record
    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),
    /// A record does not match its own hostname or catalog
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Errors specific to chart rendering
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// Domain operation failed
    #[error("{0}")]
    Domain(#[from] DomainError),
    /// The plotting backend rejected the figure
    #[error("Chart rendering failed: {0}")]
    RenderingFailed(String),
    /// Output file or directory could not be written
    #[error("Chart I/O failed: {0}")]
    IoFailed(String),
}

/// Errors specific to dataset persistence
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RepositoryError {
    /// Domain operation failed
    #[error("{0}")]
    Domain(#[from] DomainError),
    /// File operation failed
    #[error("File operation failed: {0}")]
    IoFailed(String),
    /// Serialization failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}
