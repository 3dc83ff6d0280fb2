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

//! Synthetic server record generation

use crate::domain::parsers::{format_hostname, HostnameParts};
use crate::domain::{Catalog, DomainError, ServerRecord};
use log::{debug, info};
use rand::Rng;
use std::collections::HashSet;

/// Domain service that draws unique server records from a [`Catalog`]
///
/// All randomness comes from the generator handle passed into each call, so
/// the same seed and call order always produce the same dataset.
#[derive(Debug, Clone, Default)]
pub struct DatasetGenerator {
    catalog: Catalog,
}

/// Uniform draw from a fixed list. Catalog lists are never empty.
fn pick<'c, T, R: Rng + ?Sized>(rng: &mut R, items: &'c [T]) -> &'c T {
    &items[rng.gen_range(0..items.len())]
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl DatasetGenerator {
    /// Create a generator over the given catalog
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Draw one `<type>-<env>-<location>-<NNN>` hostname
    ///
    /// Repeated calls may return the same string.
    pub fn make_hostname<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let server_type = pick(rng, &self.catalog.server_types);
        let environment = pick(rng, &self.catalog.environments);
        let location = pick(rng, &self.catalog.locations);
        let number = rng.gen_range(1..=self.catalog.max_suffix);
        format_hostname(server_type, environment, location, number)
    }

    /// Build a full record around `hostname`
    ///
    /// Categorical fields come from the hostname segments; everything else is
    /// an independent draw.
    pub fn make_record<R: Rng + ?Sized>(&self, hostname: &str, rng: &mut R) -> ServerRecord {
        let parts = HostnameParts::split(hostname);
        let catalog = &self.catalog;
        let (min_uptime, max_uptime) = catalog.uptime_days;
        let (min_cpu, max_cpu) = catalog.cpu_load_pct;
        let (min_ram, max_ram) = catalog.ram_used_pct;

        ServerRecord {
            hostname: hostname.to_string(),
            server_type: parts.server_type.to_string(),
            environment: parts.environment.to_string(),
            location: parts.location.to_string(),
            os: pick(rng, &catalog.operating_systems).to_string(),
            cpu_cores: *pick(rng, &catalog.cpu_cores),
            ram_gb: *pick(rng, &catalog.ram_gb),
            disk_gb: *pick(rng, &catalog.disk_gb),
            uptime_days: rng.gen_range(min_uptime..=max_uptime),
            cpu_load_pct: round2(rng.gen_range(min_cpu..=max_cpu)),
            ram_used_pct: round2(rng.gen_range(min_ram..=max_ram)),
        }
    }

    /// Generate exactly `count` records with pairwise distinct hostnames
    ///
    /// Duplicate hostnames are discarded and redrawn. The request is checked
    /// against the unused combinations up front, so the loop always ends.
    ///
    /// # Returns
    /// * `Ok(Vec<ServerRecord>)` - `count` records in generation order
    /// * `Err(DomainError::CapacityExceeded)` - `count` exceeds the catalog capacity
    pub fn generate<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<ServerRecord>, DomainError> {
        let capacity = self.catalog.capacity();
        let mut used: HashSet<String> = HashSet::with_capacity(count);

        let remaining = capacity - used.len();
        if count > remaining {
            return Err(DomainError::CapacityExceeded {
                requested: count,
                capacity,
            });
        }

        let mut records = Vec::with_capacity(count);
        let mut collisions = 0usize;
        while records.len() < count {
            let hostname = self.make_hostname(rng);
            if used.contains(&hostname) {
                collisions += 1;
                continue;
            }
            records.push(self.make_record(&hostname, rng));
            used.insert(hostname);
        }

        if collisions > 0 {
            debug!("Redrew {} duplicate hostnames", collisions);
        }
        info!("Generated {} unique server records", records.len());
        Ok(records)
    }
}
