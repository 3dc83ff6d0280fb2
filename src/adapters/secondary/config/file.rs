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

//! TOML file configuration provider

use crate::domain::{DatasetConfig, DomainError};
use crate::ports::ConfigurationProvider;
use log::debug;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file, looked up in the working directory
pub const CONFIG_FILE: &str = "hostname_dataset.toml";
/// Environment variable overriding the configuration file path
pub const CONFIG_ENV: &str = "HOSTNAME_DATASET_CONFIG";

/// Reads [`DatasetConfig`] from a TOML file
///
/// A missing file yields the defaults; keys absent from the file keep their
/// default values.
pub struct TomlConfigurationProvider {
    path: PathBuf,
}

impl TomlConfigurationProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use the path from `HOSTNAME_DATASET_CONFIG`, or [`CONFIG_FILE`]
    pub fn from_env() -> Self {
        match env::var_os(CONFIG_ENV) {
            Some(path) => Self::new(path),
            None => Self::new(CONFIG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse and validate a TOML document
pub fn parse_config(content: &str) -> Result<DatasetConfig, DomainError> {
    let config: DatasetConfig = toml::from_str(content)
        .map_err(|e| DomainError::InvalidConfiguration(format!("TOML parse failed: {}", e)))?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &DatasetConfig) -> Result<(), DomainError> {
    if config.dpi == 0 {
        return Err(DomainError::InvalidConfiguration(
            "dpi must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

impl ConfigurationProvider for TomlConfigurationProvider {
    fn get_dataset_config(&self) -> Result<DatasetConfig, DomainError> {
        if !self.path.exists() {
            debug!(
                "No configuration at {}, using defaults",
                self.path.display()
            );
            return Ok(DatasetConfig::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            DomainError::InvalidConfiguration(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))
        })?;
        parse_config(&content)
    }
}
