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

//! Hostname Dataset Library
//!
//! This library generates synthetic server inventory datasets and analyzes
//! them, using a Ports and Adapters (Hexagonal) architecture for
//! maintainability and testability.
//!
//! # Architecture
//!
//! - **Domain**: Records, catalog, generator and analyzer
//! - **Ports**: Interfaces for storage, rendering and configuration
//! - **Adapters**: CSV/JSON files, plotters PNG output, TOML configuration
//!
//! # Usage
//!
//! ```rust,no_run
//! use hostname_dataset::{ServiceContainer, ContainerConfigBuilder};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let container = ServiceContainer::new(
//!         ContainerConfigBuilder::new().output_dir("out").dpi(100).build(),
//!     );
//!     let service = container.create_dataset_reporting_service();
//!
//!     let mut rng = StdRng::seed_from_u64(42);
//!     let records = service.generate_dataset(100, &mut rng)?;
//!     service.save_dataset(&records)?;
//!     println!("{}", service.summarize(&records));
//!     service.generate_charts(&records)?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod container;
pub mod domain;
pub mod ports;

pub use adapters::{CsvDatasetRepository, PlottersChartRenderer, TomlConfigurationProvider};
pub use container::{ContainerConfig, ContainerConfigBuilder, ServiceContainer};
pub use domain::{
    Catalog, ChartError, DatasetAnalyzer, DatasetConfig, DatasetGenerator,
    DatasetReportService, DatasetSummary, DomainError, RepositoryError, ServerRecord,
};
pub use ports::{
    ChartRenderer, ConfigurationProvider, DatasetReportingService, DatasetRepository,
};
