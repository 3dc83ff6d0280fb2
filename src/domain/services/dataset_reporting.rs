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

use crate::domain::{
    ChartError, DatasetAnalyzer, DatasetGenerator, DatasetSummary, DomainError, RepositoryError,
    ServerRecord,
};
use crate::ports::{ChartRenderer, DatasetReportingService, DatasetRepository};
use log::info;
use rand::RngCore;
use std::path::PathBuf;
use std::sync::Arc;

/// CSV snapshot of the generated dataset
pub const DATASET_FILE: &str = "servidores_dataset.csv";
/// JSON export of the summary statistics
pub const SUMMARY_FILE: &str = "resumen_estadistico.json";

/// Domain service that implements a complete dataset run
///
/// This service ties the generator and analyzer to the storage and rendering
/// adapters. All artifacts land in one output directory.
pub struct DatasetReportService {
    /// Record generator over the fixed catalog
    generator: DatasetGenerator,
    /// CSV and JSON storage
    repository: Arc<dyn DatasetRepository>,
    /// Image backend for chart figures
    renderer: Arc<dyn ChartRenderer>,
    /// Directory receiving every artifact
    output_dir: PathBuf,
}

impl DatasetReportService {
    /// Create a new dataset report service
    ///
    /// # Arguments
    /// * `generator` - Record generator
    /// * `repository` - Storage for the CSV snapshot and summary export
    /// * `renderer` - Chart image backend
    /// * `output_dir` - Directory for all artifacts
    pub fn new(
        generator: DatasetGenerator,
        repository: Arc<dyn DatasetRepository>,
        renderer: Arc<dyn ChartRenderer>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            generator,
            repository,
            renderer,
            output_dir: output_dir.into(),
        }
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.output_dir.join(DATASET_FILE)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_FILE)
    }

    fn analyzer<'a>(&self, records: &'a [ServerRecord]) -> DatasetAnalyzer<'a> {
        DatasetAnalyzer::new(records, self.renderer.clone(), self.output_dir.clone())
    }
}

impl DatasetReportingService for DatasetReportService {
    fn generate_dataset(
        &self,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<ServerRecord>, DomainError> {
        self.generator.generate(count, rng)
    }

    fn save_dataset(&self, records: &[ServerRecord]) -> Result<PathBuf, RepositoryError> {
        let path = self.dataset_path();
        self.repository.save_csv(records, &path)?;
        info!("Saved {} records to {}", records.len(), path.display());
        Ok(path)
    }

    fn load_dataset(&self) -> Result<Vec<ServerRecord>, RepositoryError> {
        let path = self.dataset_path();
        if !self.repository.file_exists(&path) {
            return Err(RepositoryError::IoFailed(format!(
                "Dataset not found: {}",
                path.display()
            )));
        }
        self.repository.load_csv(&path)
    }

    fn summarize(&self, records: &[ServerRecord]) -> DatasetSummary {
        self.analyzer(records).summary()
    }

    fn export_summary(&self, summary: &DatasetSummary) -> Result<PathBuf, RepositoryError> {
        let path = self.summary_path();
        self.repository.save_summary_json(summary, &path)?;
        Ok(path)
    }

    fn generate_charts(&self, records: &[ServerRecord]) -> Result<Vec<PathBuf>, ChartError> {
        self.analyzer(records).run_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Figure;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Mutex;

    /// Keeps saved datasets in memory keyed by path
    #[derive(Default)]
    struct MemoryRepository {
        datasets: Mutex<HashMap<PathBuf, Vec<ServerRecord>>>,
        summaries: Mutex<Vec<PathBuf>>,
    }

    impl DatasetRepository for MemoryRepository {
        fn save_csv(&self, records: &[ServerRecord], path: &Path) -> Result<(), RepositoryError> {
            self.datasets
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), records.to_vec());
            Ok(())
        }

        fn load_csv(&self, path: &Path) -> Result<Vec<ServerRecord>, RepositoryError> {
            self.datasets
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| RepositoryError::IoFailed("missing".to_string()))
        }

        fn save_summary_json(
            &self,
            _summary: &DatasetSummary,
            path: &Path,
        ) -> Result<(), RepositoryError> {
            self.summaries.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }

        fn file_exists(&self, path: &Path) -> bool {
            self.datasets.lock().unwrap().contains_key(path)
        }
    }

    struct NullRenderer;

    impl ChartRenderer for NullRenderer {
        fn render(&self, _figure: &Figure, _path: &Path) -> Result<(), ChartError> {
            Ok(())
        }
    }

    fn service(repository: Arc<MemoryRepository>) -> DatasetReportService {
        DatasetReportService::new(
            DatasetGenerator::default(),
            repository,
            Arc::new(NullRenderer),
            "artifacts",
        )
    }

    #[test]
    fn test_save_and_load_through_repository() {
        let repository = Arc::new(MemoryRepository::default());
        let service = service(repository.clone());
        let mut rng = StdRng::seed_from_u64(42);

        let records = service.generate_dataset(25, &mut rng).unwrap();
        let path = service.save_dataset(&records).unwrap();
        assert_eq!(path, Path::new("artifacts").join(DATASET_FILE));
        assert_eq!(service.load_dataset().unwrap(), records);
    }

    #[test]
    fn test_load_without_snapshot_fails() {
        let service = service(Arc::new(MemoryRepository::default()));
        assert!(matches!(
            service.load_dataset(),
            Err(RepositoryError::IoFailed(_))
        ));
    }

    #[test]
    fn test_export_summary_path() {
        let repository = Arc::new(MemoryRepository::default());
        let service = service(repository.clone());
        let records = service
            .generate_dataset(5, &mut StdRng::seed_from_u64(1))
            .unwrap();

        let summary = service.summarize(&records);
        assert_eq!(summary.total, 5);
        let path = service.export_summary(&summary).unwrap();
        assert_eq!(path, Path::new("artifacts").join(SUMMARY_FILE));
        assert_eq!(repository.summaries.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_generate_charts_returns_six_paths() {
        let service = service(Arc::new(MemoryRepository::default()));
        let records = service
            .generate_dataset(40, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let paths = service.generate_charts(&records).unwrap();
        assert_eq!(paths.len(), 6);
        assert!(paths.iter().all(|p| p.starts_with("artifacts")));
    }
}
