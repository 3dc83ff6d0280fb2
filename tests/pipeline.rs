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

//! End-to-end dataset run against a temporary output directory

use assert_fs::prelude::*;
use assert_fs::TempDir;
use hostname_dataset::domain::{Figure, CHART_FILES, DATASET_FILE, SUMMARY_FILE};
use hostname_dataset::{
    ChartError, ChartRenderer, CsvDatasetRepository, DatasetGenerator, DatasetReportService,
    DatasetReportingService, ServerRecord,
};
use predicates::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Writes the figure's file name instead of pixels
struct PlaceholderRenderer;

impl ChartRenderer for PlaceholderRenderer {
    fn render(&self, figure: &Figure, path: &Path) -> Result<(), ChartError> {
        fs::write(path, figure.file_name).map_err(|e| ChartError::IoFailed(e.to_string()))
    }
}

fn service(output_dir: &Path) -> DatasetReportService {
    DatasetReportService::new(
        DatasetGenerator::default(),
        Arc::new(CsvDatasetRepository::new()),
        Arc::new(PlaceholderRenderer),
        output_dir,
    )
}

#[test]
fn test_full_run_writes_every_artifact() {
    let temp = TempDir::new().unwrap();
    let service = service(temp.path());
    let mut rng = StdRng::seed_from_u64(42);

    let records = service.generate_dataset(100, &mut rng).unwrap();
    service.save_dataset(&records).unwrap();
    let summary = service.summarize(&records);
    service.export_summary(&summary).unwrap();
    service.generate_charts(&records).unwrap();

    temp.child(DATASET_FILE)
        .assert(
            predicate::str::starts_with(ServerRecord::COLUMNS.join(","))
                .from_utf8()
                .from_file_path(),
        );
    temp.child(SUMMARY_FILE).assert(
        predicate::str::contains("\"total\": 100")
            .from_utf8()
            .from_file_path(),
    );
    for chart in CHART_FILES {
        temp.child(chart).assert(predicate::path::exists());
        temp.child(chart).assert(chart);
    }

    temp.close().unwrap();
}

#[test]
fn test_snapshot_reloads_identically() {
    let temp = TempDir::new().unwrap();
    let service = service(temp.path());

    let records = service
        .generate_dataset(100, &mut StdRng::seed_from_u64(7))
        .unwrap();
    service.save_dataset(&records).unwrap();
    let loaded = service.load_dataset().unwrap();

    assert_eq!(loaded, records);
    let hostnames: HashSet<&str> = loaded.iter().map(|r| r.hostname.as_str()).collect();
    assert_eq!(hostnames.len(), 100);
}

#[test]
fn test_same_seed_same_snapshot() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    for dir in [&first, &second] {
        let service = service(dir.path());
        let records = service
            .generate_dataset(10, &mut StdRng::seed_from_u64(42))
            .unwrap();
        service.save_dataset(&records).unwrap();
    }

    let expected = fs::read_to_string(first.child(DATASET_FILE).path()).unwrap();
    second
        .child(DATASET_FILE)
        .assert(predicate::str::diff(expected).from_utf8().from_file_path());
}

#[test]
fn test_empty_run_summarizes_but_skips_charts() {
    let temp = TempDir::new().unwrap();
    let service = service(temp.path());

    let records = service
        .generate_dataset(0, &mut StdRng::seed_from_u64(42))
        .unwrap();
    assert!(records.is_empty());
    service.save_dataset(&records).unwrap();

    let summary = service.summarize(&records);
    assert!(summary.to_string().starts_with("Total de servidores: 0"));

    assert!(service.generate_charts(&records).is_err());
    temp.child(CHART_FILES[0]).assert(predicate::path::missing());
}
