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

use hostname_dataset::domain::CHART_FILES;
use hostname_dataset::{
    ConfigurationProvider, ContainerConfig, DatasetReportingService, ServiceContainer,
    TomlConfigurationProvider,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;

const BANNER_WIDTH: usize = 70;

fn rule() -> String {
    "=".repeat(BANNER_WIDTH)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let config_provider = TomlConfigurationProvider::from_env();
    let config = config_provider.get_dataset_config()?;
    init_logging(config.verbose);
    info!(
        "Loaded configuration from {} (seed {}, {} servers)",
        config_provider.path().display(),
        config.seed,
        config.server_count
    );

    println!("\n{}", rule());
    println!("GENERACIÓN DE DATASET DE HOSTNAMES Y ANÁLISIS");
    println!("{}", rule());

    let container = ServiceContainer::new(ContainerConfig::from(&config));
    let service = container.create_dataset_reporting_service();

    // One generator for the whole run; every draw depends on seed and call order
    let mut rng = StdRng::seed_from_u64(config.seed);

    println!("\n[1] Generando hostnames aleatorios...");
    let records = service.generate_dataset(config.server_count, &mut rng)?;
    println!("✓ {} hostnames generados exitosamente", records.len());

    println!("\n[2] Guardando dataset...");
    let dataset_path = service.save_dataset(&records)?;
    println!("✓ Dataset guardado en: {}", dataset_path.display());

    println!("\n[3] Analizando datos...");
    let summary = service.summarize(&records);
    println!("\n{}", rule());
    println!("ESTADÍSTICAS BÁSICAS DEL DATASET");
    println!("{}", rule());
    println!("\n{}", summary);
    println!("\n{}", rule());
    let summary_path = service.export_summary(&summary)?;
    println!("✓ Resumen guardado en: {}", summary_path.display());

    println!("\n[4] Generando visualizaciones...");
    service.generate_charts(&records)?;

    println!("\n{}", rule());
    println!("PROCESO COMPLETADO CON ÉXITO");
    println!("{}", rule());
    println!("\nArchivos generados:");
    println!("  - {}", dataset_path.display());
    println!("  - {}", summary_path.display());
    for chart in CHART_FILES {
        println!("  - {}", config.output_dir.join(chart).display());
    }
    println!();

    Ok(())
}
