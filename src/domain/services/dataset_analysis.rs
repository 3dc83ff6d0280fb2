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

//! Descriptive statistics and chart aggregation over a materialized dataset

use crate::domain::{
    BarPanel, CategoricalColumn, ChartError, ColumnStats, DatasetSummary, DomainError, Figure,
    HistogramBin, HistogramPanel, NumericColumn, Orientation, Panel, PiePanel, Rgb,
    ScatterPanel, ServerRecord,
};
use crate::ports::ChartRenderer;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const SERVER_TYPE_CHART: &str = "distribucion_tipos_servidor.png";
pub const ENVIRONMENT_CHART: &str = "distribucion_ambientes.png";
pub const HARDWARE_CHART: &str = "distribucion_recursos_hardware.png";
pub const RESOURCE_USAGE_CHART: &str = "distribucion_uso_recursos.png";
pub const UPTIME_CHART: &str = "uptime_servidores.png";
pub const LOCATION_CHART: &str = "distribucion_ubicaciones.png";

/// Chart files in the order [`DatasetAnalyzer::run_all`] writes them
pub const CHART_FILES: [&str; 6] = [
    SERVER_TYPE_CHART,
    ENVIRONMENT_CHART,
    HARDWARE_CHART,
    RESOURCE_USAGE_CHART,
    UPTIME_CHART,
    LOCATION_CHART,
];

const HISTOGRAM_BINS: usize = 20;
const HEAD_ROWS: usize = 5;
const BANNER_WIDTH: usize = 70;

/// Counts per category, most frequent first
///
/// Ties keep the order in which the categories first appear.
pub fn value_counts(records: &[ServerRecord], column: CategoricalColumn) -> Vec<(String, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let value = column.value(record);
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut result: Vec<(String, usize)> = order
        .into_iter()
        .map(|value| (value.to_string(), counts[value]))
        .collect();
    // stable sort keeps first-appearance order among ties
    result.sort_by(|a, b| b.1.cmp(&a.1));
    result
}

/// Counts per distinct numeric value, ascending by value
pub fn numeric_value_counts(records: &[ServerRecord], column: NumericColumn) -> Vec<(f64, usize)> {
    let mut values: Vec<f64> = records.iter().map(|r| column.value(r)).collect();
    values.sort_by(|a, b| a.total_cmp(b));

    let mut result: Vec<(f64, usize)> = Vec::new();
    for value in values {
        if let Some((last, count)) = result.last_mut() {
            if *last == value {
                *count += 1;
                continue;
            }
        }
        result.push((value, 1));
    }
    result
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (one delta degree of freedom)
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    Some((squares / (values.len() - 1) as f64).sqrt())
}

/// Quantile of already sorted values using linear interpolation
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Count, mean, std, min, quartiles and max of one numeric column
pub fn describe(records: &[ServerRecord], column: NumericColumn) -> ColumnStats {
    let mut values: Vec<f64> = records.iter().map(|r| column.value(r)).collect();
    let avg = mean(&values);
    let std = sample_std(&values);
    values.sort_by(|a, b| a.total_cmp(b));

    ColumnStats {
        column: column.name().to_string(),
        count: values.len(),
        mean: avg,
        std,
        min: values.first().copied(),
        q25: quantile(&values, 0.25),
        q50: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values.last().copied(),
    }
}

/// Equal-width histogram over `[min, max]`
///
/// Every bin is half open except the last, which also holds `max`. When all
/// values are equal the range is widened by 0.5 on each side.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut low = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if low == high {
        low -= 0.5;
        high += 0.5;
    }
    let width = (high - low) / bins as f64;

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: low + width * i as f64,
            upper: if i + 1 == bins {
                high
            } else {
                low + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for value in values {
        let index = (((value - low) / width).floor() as usize).min(bins - 1);
        result[index].count += 1;
    }
    result
}

fn banner(title: &str) {
    println!("\n{}", "=".repeat(BANNER_WIDTH));
    println!("{}", title);
    println!("{}", "=".repeat(BANNER_WIDTH));
}

fn bar_panel(
    title: &str,
    x_label: &str,
    y_label: &str,
    counts: Vec<(String, usize)>,
    orientation: Orientation,
    color: Rgb,
) -> Panel {
    let (categories, counts) = counts.into_iter().unzip();
    Panel::Bar(BarPanel {
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        categories,
        counts,
        orientation,
        color,
    })
}

fn numeric_labels(counts: Vec<(f64, usize)>) -> Vec<(String, usize)> {
    counts
        .into_iter()
        .map(|(value, count)| (format!("{}", value), count))
        .collect()
}

/// Analyzes one materialized dataset and renders its chart battery
///
/// Every chart operation aggregates the records into a [`Figure`], hands it
/// to the renderer and overwrites the same file on each call.
pub struct DatasetAnalyzer<'a> {
    records: &'a [ServerRecord],
    renderer: Arc<dyn ChartRenderer>,
    output_dir: PathBuf,
}

impl<'a> DatasetAnalyzer<'a> {
    /// Create an analyzer writing charts into `output_dir`
    pub fn new(
        records: &'a [ServerRecord],
        renderer: Arc<dyn ChartRenderer>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            records,
            renderer,
            output_dir: output_dir.into(),
        }
    }

    pub fn records(&self) -> &[ServerRecord] {
        self.records
    }

    /// Row count, column names, first rows and numeric statistics
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            total: self.records.len(),
            columns: ServerRecord::COLUMNS.iter().map(|c| c.to_string()).collect(),
            head: self.records.iter().take(HEAD_ROWS).cloned().collect(),
            stats: NumericColumn::ALL
                .iter()
                .map(|column| describe(self.records, *column))
                .collect(),
        }
    }

    fn numeric_values(&self, column: NumericColumn) -> Vec<f64> {
        self.records.iter().map(|r| column.value(r)).collect()
    }

    fn require_records(&self, chart: &str) -> Result<(), DomainError> {
        if self.records.is_empty() {
            return Err(DomainError::EmptyDataset(format!(
                "cannot build {} without records",
                chart
            )));
        }
        Ok(())
    }

    pub fn server_type_figure(&self) -> Result<Figure, DomainError> {
        self.require_records(SERVER_TYPE_CHART)?;
        Ok(Figure::single(
            SERVER_TYPE_CHART,
            10.0,
            6.0,
            bar_panel(
                "Distribución de Tipos de Servidor",
                "Tipo de Servidor",
                "Cantidad",
                value_counts(self.records, CategoricalColumn::ServerType),
                Orientation::Vertical,
                Rgb::STEELBLUE,
            ),
        ))
    }

    pub fn environment_figure(&self) -> Result<Figure, DomainError> {
        self.require_records(ENVIRONMENT_CHART)?;
        let slices = value_counts(self.records, CategoricalColumn::Environment);
        let colors = (0..slices.len())
            .map(|i| Rgb::SET3[i % Rgb::SET3.len()])
            .collect();
        Ok(Figure::single(
            ENVIRONMENT_CHART,
            10.0,
            8.0,
            Panel::Pie(PiePanel {
                title: "Distribución de Ambientes".to_string(),
                slices,
                colors,
            }),
        ))
    }

    pub fn hardware_figure(&self) -> Result<Figure, DomainError> {
        self.require_records(HARDWARE_CHART)?;
        let panels = vec![
            bar_panel(
                "Distribución de CPU Cores",
                "CPU Cores",
                "Cantidad",
                numeric_labels(numeric_value_counts(self.records, NumericColumn::CpuCores)),
                Orientation::Vertical,
                Rgb::CORAL,
            ),
            bar_panel(
                "Distribución de RAM (GB)",
                "RAM (GB)",
                "Cantidad",
                numeric_labels(numeric_value_counts(self.records, NumericColumn::RamGb)),
                Orientation::Vertical,
                Rgb::LIGHTGREEN,
            ),
            bar_panel(
                "Distribución de Disco (GB)",
                "Disco (GB)",
                "Cantidad",
                numeric_labels(numeric_value_counts(self.records, NumericColumn::DiskGb)),
                Orientation::Vertical,
                Rgb::SKYBLUE,
            ),
            bar_panel(
                "Distribución de Sistemas Operativos",
                "Cantidad",
                "Sistema Operativo",
                value_counts(self.records, CategoricalColumn::Os),
                Orientation::Horizontal,
                Rgb::PLUM,
            ),
        ];
        Ok(Figure {
            file_name: HARDWARE_CHART,
            width_in: 14.0,
            height_in: 10.0,
            rows: 2,
            cols: 2,
            panels,
        })
    }

    fn usage_panel(
        &self,
        column: NumericColumn,
        title: &str,
        x_label: &str,
        color: Rgb,
        mean_color: Rgb,
    ) -> Result<Panel, DomainError> {
        let values = self.numeric_values(column);
        let avg = mean(&values)
            .ok_or_else(|| DomainError::EmptyDataset(format!("no values for {}", column.name())))?;
        Ok(Panel::Histogram(HistogramPanel {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: "Frecuencia".to_string(),
            bins: histogram(&values, HISTOGRAM_BINS),
            color,
            mean: avg,
            mean_color,
            mean_label: format!("Media: {:.2}%", avg),
        }))
    }

    pub fn resource_usage_figure(&self) -> Result<Figure, DomainError> {
        self.require_records(RESOURCE_USAGE_CHART)?;
        let panels = vec![
            self.usage_panel(
                NumericColumn::CpuLoadPct,
                "Distribución de Carga de CPU (%)",
                "Carga CPU (%)",
                Rgb::TOMATO,
                Rgb::RED,
            )?,
            self.usage_panel(
                NumericColumn::RamUsedPct,
                "Distribución de Uso de RAM (%)",
                "Uso RAM (%)",
                Rgb::DODGERBLUE,
                Rgb::BLUE,
            )?,
        ];
        Ok(Figure {
            file_name: RESOURCE_USAGE_CHART,
            width_in: 14.0,
            height_in: 5.0,
            rows: 1,
            cols: 2,
            panels,
        })
    }

    pub fn uptime_figure(&self) -> Result<Figure, DomainError> {
        self.require_records(UPTIME_CHART)?;
        let values = self.numeric_values(NumericColumn::UptimeDays);
        let avg = mean(&values).unwrap_or_default();
        Ok(Figure::single(
            UPTIME_CHART,
            12.0,
            6.0,
            Panel::Scatter(ScatterPanel {
                title: "Uptime de Servidores".to_string(),
                x_label: "Índice de Servidor".to_string(),
                y_label: "Uptime (días)".to_string(),
                points: values
                    .iter()
                    .enumerate()
                    .map(|(index, days)| (index as f64, *days))
                    .collect(),
                mean: avg,
                mean_label: format!("Media: {:.2} días", avg),
                color_bar_label: "Días de Uptime".to_string(),
            }),
        ))
    }

    pub fn location_figure(&self) -> Result<Figure, DomainError> {
        self.require_records(LOCATION_CHART)?;
        Ok(Figure::single(
            LOCATION_CHART,
            10.0,
            6.0,
            bar_panel(
                "Distribución de Servidores por Ubicación",
                "Cantidad de Servidores",
                "Ubicación",
                value_counts(self.records, CategoricalColumn::Location),
                Orientation::Horizontal,
                Rgb::TEAL,
            ),
        ))
    }

    fn save(&self, figure: Figure) -> Result<PathBuf, ChartError> {
        let path = self.output_dir.join(figure.file_name);
        self.renderer.render(&figure, &path)?;
        debug!("Rendered {} panel(s) into {}", figure.panels.len(), path.display());
        println!("✓ Gráfico guardado: {}", figure.file_name);
        Ok(path)
    }

    /// Bar chart of servers per type
    pub fn server_type_chart(&self) -> Result<PathBuf, ChartError> {
        self.save(self.server_type_figure()?)
    }

    /// Pie chart of servers per environment
    pub fn environment_chart(&self) -> Result<PathBuf, ChartError> {
        self.save(self.environment_figure()?)
    }

    /// 2x2 grid of cores, RAM, disk and operating system counts
    pub fn hardware_chart(&self) -> Result<PathBuf, ChartError> {
        self.save(self.hardware_figure()?)
    }

    /// CPU load and RAM usage histograms with mean markers
    pub fn resource_usage_chart(&self) -> Result<PathBuf, ChartError> {
        self.save(self.resource_usage_figure()?)
    }

    /// Uptime against record index with a mean line
    pub fn uptime_chart(&self) -> Result<PathBuf, ChartError> {
        self.save(self.uptime_figure()?)
    }

    /// Horizontal bars of servers per location
    pub fn location_chart(&self) -> Result<PathBuf, ChartError> {
        self.save(self.location_figure()?)
    }

    /// Render all six charts in order, stopping at the first failure
    pub fn run_all(&self) -> Result<Vec<PathBuf>, ChartError> {
        banner("GENERANDO GRÁFICOS");
        println!();
        info!(
            "Rendering {} charts into {}",
            CHART_FILES.len(),
            self.output_dir.display()
        );

        let paths = vec![
            self.server_type_chart()?,
            self.environment_chart()?,
            self.hardware_chart()?,
            self.resource_usage_chart()?,
            self.uptime_chart()?,
            self.location_chart()?,
        ];

        banner("TODOS LOS GRÁFICOS GENERADOS EXITOSAMENTE");
        Ok(paths)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DatasetGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    /// Records figures instead of drawing them
    #[derive(Default)]
    struct RecordingRenderer {
        figures: Mutex<Vec<(String, PathBuf)>>,
        fail_on: Option<&'static str>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render(&self, figure: &Figure, path: &Path) -> Result<(), ChartError> {
            if self.fail_on == Some(figure.file_name) {
                return Err(ChartError::RenderingFailed("boom".to_string()));
            }
            self.figures
                .lock()
                .unwrap()
                .push((figure.file_name.to_string(), path.to_path_buf()));
            Ok(())
        }
    }

    fn record(server_type: &str, os: &str, cores: u32, cpu: f64) -> ServerRecord {
        ServerRecord {
            hostname: format!("{server_type}-prod-useast-001"),
            server_type: server_type.to_string(),
            environment: "prod".to_string(),
            location: "useast".to_string(),
            os: os.to_string(),
            cpu_cores: cores,
            ram_gb: 16,
            disk_gb: 500,
            uptime_days: 100,
            cpu_load_pct: cpu,
            ram_used_pct: 50.0,
        }
    }

    fn dataset(count: usize) -> Vec<ServerRecord> {
        DatasetGenerator::default()
            .generate(count, &mut StdRng::seed_from_u64(42))
            .unwrap()
    }

    #[test]
    fn test_value_counts_order() {
        let records = vec![
            record("db", "linux", 4, 10.0),
            record("web", "linux", 4, 10.0),
            record("web", "debian", 8, 10.0),
            record("app", "debian", 2, 10.0),
        ];
        let counts = value_counts(&records, CategoricalColumn::ServerType);
        assert_eq!(
            counts,
            vec![
                ("web".to_string(), 2),
                ("db".to_string(), 1),
                ("app".to_string(), 1)
            ]
        );

        let os = value_counts(&records, CategoricalColumn::Os);
        assert_eq!(os, vec![("linux".to_string(), 2), ("debian".to_string(), 2)]);
    }

    #[test]
    fn test_numeric_value_counts_sorted_by_value() {
        let records = vec![
            record("db", "linux", 32, 10.0),
            record("db", "linux", 4, 10.0),
            record("db", "linux", 16, 10.0),
            record("db", "linux", 4, 10.0),
        ];
        let counts = numeric_value_counts(&records, NumericColumn::CpuCores);
        assert_eq!(counts, vec![(4.0, 2), (16.0, 1), (32.0, 1)]);
    }

    #[test]
    fn test_counts_sum_to_row_count() {
        let records = dataset(100);
        for column in [
            CategoricalColumn::ServerType,
            CategoricalColumn::Environment,
            CategoricalColumn::Location,
            CategoricalColumn::Os,
        ] {
            let total: usize = value_counts(&records, column).iter().map(|(_, c)| c).sum();
            assert_eq!(total, 100, "{}", column.name());
        }
        let cores = numeric_value_counts(&records, NumericColumn::RamGb);
        assert!(cores.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(cores.iter().map(|(_, c)| c).sum::<usize>(), 100);
    }

    #[test]
    fn test_describe_matches_hand_computed_values() {
        let records: Vec<ServerRecord> = [1.0, 2.0, 3.0, 4.0]
            .iter()
            .map(|cpu| record("web", "linux", 4, *cpu))
            .collect();
        let stats = describe(&records, NumericColumn::CpuLoadPct);

        assert_eq!(stats.column, "cpu_load_pct");
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, Some(2.5));
        let std = stats.std.unwrap();
        assert!((std - 1.290_994_448_735_805_6).abs() < 1e-12);
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.q25, Some(1.75));
        assert_eq!(stats.q50, Some(2.5));
        assert_eq!(stats.q75, Some(3.25));
        assert_eq!(stats.max, Some(4.0));
    }

    #[test]
    fn test_describe_small_inputs() {
        let empty = describe(&[], NumericColumn::UptimeDays);
        assert_eq!(empty.count, 0);
        assert_eq!(empty.mean, None);
        assert_eq!(empty.q50, None);

        let single = describe(&[record("web", "linux", 8, 42.0)], NumericColumn::CpuCores);
        assert_eq!(single.mean, Some(8.0));
        assert_eq!(single.std, None);
        assert_eq!(single.q75, Some(8.0));
    }

    #[test]
    fn test_histogram_bins() {
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        let bins = histogram(&values, 20);
        assert_eq!(bins.len(), 20);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 101);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[19].upper, 100.0);
        // 95..=100 lands in the closed last bin
        assert_eq!(bins[19].count, 6);

        let flat = histogram(&[7.0, 7.0], 4);
        assert_eq!(flat[0].lower, 6.5);
        assert_eq!(flat[3].upper, 7.5);
        assert_eq!(flat.iter().map(|b| b.count).sum::<usize>(), 2);

        assert!(histogram(&[], 20).is_empty());
    }

    #[test]
    fn test_summary_of_empty_dataset() {
        let renderer: Arc<dyn ChartRenderer> = Arc::new(RecordingRenderer::default());
        let analyzer = DatasetAnalyzer::new(&[], renderer, ".");
        let summary = analyzer.summary();
        assert_eq!(summary.total, 0);
        assert_eq!(summary.columns.len(), 11);
        assert!(summary.head.is_empty());
        assert_eq!(summary.stats.len(), 6);
        assert!(summary.to_string().starts_with("Total de servidores: 0"));
    }

    #[test]
    fn test_summary_head_and_stats() {
        let records = dataset(20);
        let renderer: Arc<dyn ChartRenderer> = Arc::new(RecordingRenderer::default());
        let summary = DatasetAnalyzer::new(&records, renderer, ".").summary();
        assert_eq!(summary.total, 20);
        assert_eq!(summary.head, records[..5].to_vec());
        assert!(summary.stats.iter().all(|s| s.count == 20));
        assert!(summary.to_string().contains("Estadísticas descriptivas:"));
    }

    #[test]
    fn test_figures_describe_the_dataset() {
        let records = dataset(100);
        let renderer: Arc<dyn ChartRenderer> = Arc::new(RecordingRenderer::default());
        let analyzer = DatasetAnalyzer::new(&records, renderer, ".");

        let hardware = analyzer.hardware_figure().unwrap();
        assert_eq!((hardware.rows, hardware.cols), (2, 2));
        match &hardware.panels[3] {
            Panel::Bar(bar) => {
                assert_eq!(bar.orientation, Orientation::Horizontal);
                assert_eq!(bar.counts.iter().sum::<usize>(), 100);
            }
            other => panic!("unexpected panel {:?}", other),
        }

        let usage = analyzer.resource_usage_figure().unwrap();
        for panel in &usage.panels {
            match panel {
                Panel::Histogram(hist) => {
                    assert_eq!(hist.bins.len(), 20);
                    assert_eq!(hist.bins.iter().map(|b| b.count).sum::<usize>(), 100);
                    assert!(hist.mean_label.starts_with("Media: "));
                }
                other => panic!("unexpected panel {:?}", other),
            }
        }

        match &analyzer.uptime_figure().unwrap().panels[0] {
            Panel::Scatter(scatter) => {
                assert_eq!(scatter.points.len(), 100);
                assert_eq!(scatter.points[3].0, 3.0);
            }
            other => panic!("unexpected panel {:?}", other),
        }

        match &analyzer.environment_figure().unwrap().panels[0] {
            Panel::Pie(pie) => {
                assert_eq!(pie.slices.len(), pie.colors.len());
                assert_eq!(pie.slices.iter().map(|(_, c)| c).sum::<usize>(), 100);
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[test]
    fn test_run_all_renders_in_order() {
        let records = dataset(30);
        let renderer = Arc::new(RecordingRenderer::default());
        let analyzer = DatasetAnalyzer::new(&records, renderer.clone(), "out");

        let paths = analyzer.run_all().unwrap();
        assert_eq!(paths.len(), 6);
        assert_eq!(paths[0], PathBuf::from("out").join(SERVER_TYPE_CHART));

        let names: Vec<String> = renderer
            .figures
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect();
        assert_eq!(names, CHART_FILES.to_vec());
    }

    #[test]
    fn test_run_all_stops_at_first_failure() {
        let records = dataset(30);
        let renderer = Arc::new(RecordingRenderer {
            fail_on: Some(HARDWARE_CHART),
            ..RecordingRenderer::default()
        });
        let analyzer = DatasetAnalyzer::new(&records, renderer.clone(), ".");

        let err = analyzer.run_all().unwrap_err();
        assert_eq!(err, ChartError::RenderingFailed("boom".to_string()));
        assert_eq!(renderer.figures.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_charts_on_empty_dataset_fail() {
        let renderer: Arc<dyn ChartRenderer> = Arc::new(RecordingRenderer::default());
        let analyzer = DatasetAnalyzer::new(&[], renderer, ".");
        assert!(matches!(
            analyzer.server_type_chart(),
            Err(ChartError::Domain(DomainError::EmptyDataset(_)))
        ));
        assert!(analyzer.run_all().is_err());
    }
}
