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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tabled::builder::Builder;
use tabled::{Table, Tabled};

/// One simulated machine (one CSV row)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Tabled)]
pub struct ServerRecord {
    /// `<type>-<env>-<location>-<NNN>`
    pub hostname: String,
    /// Hostname segment 0
    pub server_type: String,
    /// Hostname segment 1
    pub environment: String,
    /// Hostname segment 2
    pub location: String,
    /// Operating system, drawn independently of the hostname
    pub os: String,
    pub cpu_cores: u32,
    pub ram_gb: u32,
    pub disk_gb: u32,
    pub uptime_days: u32,
    /// CPU load percentage, two decimals
    pub cpu_load_pct: f64,
    /// RAM usage percentage, two decimals
    pub ram_used_pct: f64,
}

impl ServerRecord {
    /// Column names in CSV order
    pub const COLUMNS: [&'static str; 11] = [
        "hostname",
        "server_type",
        "environment",
        "location",
        "os",
        "cpu_cores",
        "ram_gb",
        "disk_gb",
        "uptime_days",
        "cpu_load_pct",
        "ram_used_pct",
    ];
}

/// Numeric columns of [`ServerRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    CpuCores,
    RamGb,
    DiskGb,
    UptimeDays,
    CpuLoadPct,
    RamUsedPct,
}

impl NumericColumn {
    /// All numeric columns in CSV order
    pub const ALL: [NumericColumn; 6] = [
        NumericColumn::CpuCores,
        NumericColumn::RamGb,
        NumericColumn::DiskGb,
        NumericColumn::UptimeDays,
        NumericColumn::CpuLoadPct,
        NumericColumn::RamUsedPct,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NumericColumn::CpuCores => "cpu_cores",
            NumericColumn::RamGb => "ram_gb",
            NumericColumn::DiskGb => "disk_gb",
            NumericColumn::UptimeDays => "uptime_days",
            NumericColumn::CpuLoadPct => "cpu_load_pct",
            NumericColumn::RamUsedPct => "ram_used_pct",
        }
    }

    pub fn value(&self, record: &ServerRecord) -> f64 {
        match self {
            NumericColumn::CpuCores => f64::from(record.cpu_cores),
            NumericColumn::RamGb => f64::from(record.ram_gb),
            NumericColumn::DiskGb => f64::from(record.disk_gb),
            NumericColumn::UptimeDays => f64::from(record.uptime_days),
            NumericColumn::CpuLoadPct => record.cpu_load_pct,
            NumericColumn::RamUsedPct => record.ram_used_pct,
        }
    }
}

/// Categorical (string) columns of [`ServerRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalColumn {
    ServerType,
    Environment,
    Location,
    Os,
}

impl CategoricalColumn {
    pub fn name(&self) -> &'static str {
        match self {
            CategoricalColumn::ServerType => "server_type",
            CategoricalColumn::Environment => "environment",
            CategoricalColumn::Location => "location",
            CategoricalColumn::Os => "os",
        }
    }

    pub fn value<'a>(&self, record: &'a ServerRecord) -> &'a str {
        match self {
            CategoricalColumn::ServerType => &record.server_type,
            CategoricalColumn::Environment => &record.environment,
            CategoricalColumn::Location => &record.location,
            CategoricalColumn::Os => &record.os,
        }
    }
}

/// Fixed enumerations every record is drawn from
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub server_types: Vec<&'static str>,
    pub environments: Vec<&'static str>,
    /// Hyphen-free so a hostname always has exactly four segments
    pub locations: Vec<&'static str>,
    pub operating_systems: Vec<&'static str>,
    pub cpu_cores: Vec<u32>,
    pub ram_gb: Vec<u32>,
    pub disk_gb: Vec<u32>,
    /// Highest hostname suffix; suffixes run from 1 to this value
    pub max_suffix: u32,
    pub uptime_days: (u32, u32),
    pub cpu_load_pct: (f64, f64),
    pub ram_used_pct: (f64, f64),
}

impl Catalog {
    /// Number of structurally distinct hostnames
    pub fn capacity(&self) -> usize {
        self.server_types.len()
            * self.environments.len()
            * self.locations.len()
            * self.max_suffix as usize
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            server_types: vec!["web", "db", "app", "mail", "ftp", "dns", "proxy", "cache"],
            environments: vec!["prod", "dev", "test", "staging", "qa"],
            locations: vec!["useast", "uswest", "euwest", "eucentral", "asiapac"],
            operating_systems: vec!["linux", "windows", "ubuntu", "centos", "debian"],
            cpu_cores: vec![2, 4, 8, 16, 32],
            ram_gb: vec![4, 8, 16, 32, 64, 128],
            disk_gb: vec![100, 250, 500, 1000, 2000],
            max_suffix: 999,
            uptime_days: (1, 365),
            cpu_load_pct: (10.0, 95.0),
            ram_used_pct: (20.0, 90.0),
        }
    }
}

/// Descriptive statistics for one numeric column
///
/// Values that do not exist for the row count (mean of zero rows, standard
/// deviation of fewer than two) are `None`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Dataset overview printed before the charts
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DatasetSummary {
    /// Total number of records
    pub total: usize,
    /// Column names in CSV order
    pub columns: Vec<String>,
    /// First five records
    pub head: Vec<ServerRecord>,
    /// One entry per numeric column
    pub stats: Vec<ColumnStats>,
}

fn format_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{:.6}", v))
}

impl DatasetSummary {
    /// `describe`-style table: one row per statistic, one column per field
    pub fn describe_table(&self) -> String {
        let mut builder = Builder::default();
        let mut header = vec![String::new()];
        header.extend(self.stats.iter().map(|s| s.column.clone()));
        builder.push_record(header);

        let rows: [(&str, fn(&ColumnStats) -> String); 8] = [
            ("count", |s| format!("{:.6}", s.count as f64)),
            ("mean", |s| format_stat(s.mean)),
            ("std", |s| format_stat(s.std)),
            ("min", |s| format_stat(s.min)),
            ("25%", |s| format_stat(s.q25)),
            ("50%", |s| format_stat(s.q50)),
            ("75%", |s| format_stat(s.q75)),
            ("max", |s| format_stat(s.max)),
        ];
        for (label, cell) in rows {
            let mut record = vec![label.to_string()];
            record.extend(self.stats.iter().map(cell));
            builder.push_record(record);
        }

        builder.build().to_string()
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total de servidores: {}", self.total)?;
        writeln!(f)?;
        writeln!(f, "Columnas: {:?}", self.columns)?;
        writeln!(f)?;
        writeln!(f, "Primeros 5 registros:")?;
        if self.head.is_empty() {
            writeln!(f, "(sin registros)")?;
        } else {
            writeln!(f, "{}", Table::new(&self.head))?;
        }
        writeln!(f)?;
        writeln!(f, "Estadísticas descriptivas:")?;
        write!(f, "{}", self.describe_table())
    }
}

/// Runtime configuration for one dataset run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Number of unique records to generate
    pub server_count: usize,
    /// Seed for the run's random generator
    pub seed: u64,
    /// Directory receiving the CSV, JSON and PNG artifacts
    pub output_dir: PathBuf,
    /// Chart resolution in dots per inch
    pub dpi: u32,
    /// Enable debug logging
    pub verbose: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            server_count: 100,
            seed: 42,
            output_dir: PathBuf::from("."),
            dpi: 300,
            verbose: false,
        }
    }
}
