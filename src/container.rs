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

//! Dependency injection container for dataset services

use crate::adapters::{CsvDatasetRepository, PlottersChartRenderer};
use crate::domain::{Catalog, DatasetConfig, DatasetGenerator, DatasetReportService, DomainError};
use crate::ports::{
    ChartRenderer, ConfigurationProvider, DatasetReportingService, DatasetRepository,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for the dependency injection container
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Directory receiving every artifact
    pub output_dir: PathBuf,
    /// Chart resolution in dots per inch
    pub dpi: u32,
    /// Enable verbose logging
    pub verbose: bool,
    /// Enumerations records are drawn from
    pub catalog: Catalog,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        let defaults = DatasetConfig::default();
        Self {
            output_dir: defaults.output_dir,
            dpi: defaults.dpi,
            verbose: defaults.verbose,
            catalog: Catalog::default(),
        }
    }
}

impl From<&DatasetConfig> for ContainerConfig {
    fn from(config: &DatasetConfig) -> Self {
        ContainerConfigBuilder::new()
            .output_dir(config.output_dir.clone())
            .dpi(config.dpi)
            .verbose(config.verbose)
            .build()
    }
}

/// Simple configuration provider implementation
pub struct SimpleConfigurationProvider {
    config: DatasetConfig,
}

impl SimpleConfigurationProvider {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }
}

impl ConfigurationProvider for SimpleConfigurationProvider {
    fn get_dataset_config(&self) -> Result<DatasetConfig, DomainError> {
        Ok(self.config.clone())
    }
}

/// Dependency injection container
pub struct ServiceContainer {
    config: ContainerConfig,
}

impl ServiceContainer {
    /// Create a new service container with configuration
    pub fn new(config: ContainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Create the record generator
    pub fn create_generator(&self) -> DatasetGenerator {
        DatasetGenerator::new(self.config.catalog.clone())
    }

    /// Create the CSV/JSON repository
    pub fn create_dataset_repository(&self) -> Arc<dyn DatasetRepository> {
        Arc::new(CsvDatasetRepository::with_catalog(self.config.catalog.clone()))
    }

    /// Create the PNG chart renderer
    pub fn create_chart_renderer(&self) -> Arc<dyn ChartRenderer> {
        Arc::new(PlottersChartRenderer::new(self.config.dpi))
    }

    /// Create the configuration provider
    pub fn create_configuration_provider(
        &self,
        config: DatasetConfig,
    ) -> Arc<dyn ConfigurationProvider> {
        Arc::new(SimpleConfigurationProvider::new(config))
    }

    /// Create the complete dataset reporting service
    pub fn create_dataset_reporting_service(&self) -> Arc<dyn DatasetReportingService> {
        Arc::new(DatasetReportService::new(
            self.create_generator(),
            self.create_dataset_repository(),
            self.create_chart_renderer(),
            self.config.output_dir.clone(),
        ))
    }
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new(ContainerConfig::default())
    }
}

/// Builder pattern for container configuration
pub struct ContainerConfigBuilder {
    config: ContainerConfig,
}

impl ContainerConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
        }
    }

    /// Set the artifact directory
    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = output_dir.into();
        self
    }

    /// Set chart resolution
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    /// Enable verbose logging
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Replace the record catalog
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.config.catalog = catalog;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ContainerConfig {
        self.config
    }
}

impl Default for ContainerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_config_builder() {
        let config = ContainerConfigBuilder::new()
            .output_dir("reports")
            .dpi(150)
            .verbose(true)
            .build();

        assert_eq!(config.output_dir, PathBuf::from("reports"));
        assert_eq!(config.dpi, 150);
        assert!(config.verbose);
        assert_eq!(config.catalog, Catalog::default());
    }

    #[test]
    fn test_config_from_dataset_config() {
        let dataset = DatasetConfig {
            output_dir: PathBuf::from("out"),
            dpi: 72,
            ..DatasetConfig::default()
        };
        let config = ContainerConfig::from(&dataset);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.dpi, 72);
        assert!(!config.verbose);
    }

    #[test]
    fn test_simple_configuration_provider() {
        let container = ServiceContainer::default();
        let provider = container.create_configuration_provider(DatasetConfig {
            verbose: true,
            ..DatasetConfig::default()
        });
        assert_eq!(provider.get_dataset_config().unwrap().server_count, 100);
        assert!(provider.is_verbose_enabled().unwrap());
    }

    #[test]
    fn test_custom_catalog_reaches_generator() {
        let catalog = Catalog {
            server_types: vec!["web"],
            environments: vec!["prod"],
            locations: vec!["useast"],
            max_suffix: 2,
            ..Catalog::default()
        };
        let container =
            ServiceContainer::new(ContainerConfigBuilder::new().catalog(catalog).build());
        let service = container.create_dataset_reporting_service();

        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(service.generate_dataset(2, &mut rng).unwrap().len(), 2);
        assert!(matches!(
            service.generate_dataset(3, &mut rng),
            Err(DomainError::CapacityExceeded { capacity: 2, .. })
        ));
    }
}
