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

//! Hostname splitting and record consistency checks

use crate::domain::{Catalog, ServerRecord};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref HOSTNAME_RE: Regex = Regex::new(r"^([a-z]+)-([a-z]+)-([a-z]+)-(\d{3})$").unwrap();
}

/// Placeholder used for every hostname segment that is missing
pub const UNKNOWN_SEGMENT: &str = "unknown";

/// Categorical fields carried by a hostname
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostnameParts<'a> {
    pub server_type: &'a str,
    pub environment: &'a str,
    pub location: &'a str,
}

impl<'a> HostnameParts<'a> {
    /// Split a hostname on `-`, taking segments 0, 1 and 2
    ///
    /// Generated hostnames always have four segments. Anything shorter gets
    /// [`UNKNOWN_SEGMENT`] for each missing field.
    pub fn split(hostname: &'a str) -> Self {
        let mut segments = hostname.split('-');
        let mut next = || segments.next().unwrap_or(UNKNOWN_SEGMENT);
        Self {
            server_type: next(),
            environment: next(),
            location: next(),
        }
    }
}

/// Build `<type>-<env>-<location>-<NNN>` with the number zero padded to width 3
pub fn format_hostname(server_type: &str, environment: &str, location: &str, number: u32) -> String {
    format!("{server_type}-{environment}-{location}-{number:03}")
}

/// Check a record read from outside the generator against its own hostname
/// and the catalog
///
/// # Returns
/// * `Ok(())` - Record is consistent
/// * `Err(String)` - Description of the first inconsistency found
pub fn validate_record(record: &ServerRecord, catalog: &Catalog) -> Result<(), String> {
    let captures = HOSTNAME_RE
        .captures(&record.hostname)
        .ok_or_else(|| format!("Malformed hostname: {}", record.hostname))?;

    let derived = [
        ("server_type", &captures[1], record.server_type.as_str()),
        ("environment", &captures[2], record.environment.as_str()),
        ("location", &captures[3], record.location.as_str()),
    ];
    for (field, expected, actual) in derived {
        if expected != actual {
            return Err(format!(
                "{field} '{actual}' does not match hostname {}",
                record.hostname
            ));
        }
    }

    let number: u32 = captures[4]
        .parse()
        .map_err(|_| format!("Invalid hostname suffix: {}", &captures[4]))?;
    if number == 0 || number > catalog.max_suffix {
        return Err(format!("Hostname suffix out of range: {number:03}"));
    }

    let categorical = [
        ("server_type", &catalog.server_types, &record.server_type),
        ("environment", &catalog.environments, &record.environment),
        ("location", &catalog.locations, &record.location),
        ("os", &catalog.operating_systems, &record.os),
    ];
    for (field, allowed, value) in categorical {
        if !allowed.iter().any(|a| *a == value.as_str()) {
            return Err(format!("Unknown {field}: {value}"));
        }
    }

    let discrete = [
        ("cpu_cores", &catalog.cpu_cores, record.cpu_cores),
        ("ram_gb", &catalog.ram_gb, record.ram_gb),
        ("disk_gb", &catalog.disk_gb, record.disk_gb),
    ];
    for (field, allowed, value) in discrete {
        if !allowed.contains(&value) {
            return Err(format!("Unexpected {field}: {value}"));
        }
    }

    let (min_uptime, max_uptime) = catalog.uptime_days;
    if !(min_uptime..=max_uptime).contains(&record.uptime_days) {
        return Err(format!("uptime_days out of range: {}", record.uptime_days));
    }

    let ranges = [
        ("cpu_load_pct", catalog.cpu_load_pct, record.cpu_load_pct),
        ("ram_used_pct", catalog.ram_used_pct, record.ram_used_pct),
    ];
    for (field, (low, high), value) in ranges {
        if !(low..=high).contains(&value) {
            return Err(format!("{field} out of range: {value}"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hostname: &str) -> ServerRecord {
        let parts = HostnameParts::split(hostname);
        ServerRecord {
            hostname: hostname.to_string(),
            server_type: parts.server_type.to_string(),
            environment: parts.environment.to_string(),
            location: parts.location.to_string(),
            os: "ubuntu".to_string(),
            cpu_cores: 4,
            ram_gb: 16,
            disk_gb: 250,
            uptime_days: 200,
            cpu_load_pct: 42.42,
            ram_used_pct: 33.33,
        }
    }

    #[test]
    fn test_split_full_hostname() {
        let parts = HostnameParts::split("db-staging-euwest-120");
        assert_eq!(parts.server_type, "db");
        assert_eq!(parts.environment, "staging");
        assert_eq!(parts.location, "euwest");
    }

    #[test]
    fn test_split_short_hostname() {
        let parts = HostnameParts::split("cache-qa");
        assert_eq!(parts.server_type, "cache");
        assert_eq!(parts.environment, "qa");
        assert_eq!(parts.location, UNKNOWN_SEGMENT);

        let parts = HostnameParts::split("");
        assert_eq!(parts.server_type, "");
        assert_eq!(parts.environment, UNKNOWN_SEGMENT);
    }

    #[test]
    fn test_format_hostname_pads_number() {
        assert_eq!(format_hostname("web", "prod", "useast", 7), "web-prod-useast-007");
        assert_eq!(format_hostname("web", "prod", "useast", 999), "web-prod-useast-999");
    }

    #[test]
    fn test_validate_record() {
        let catalog = Catalog::default();
        assert!(validate_record(&record("mail-dev-asiapac-001"), &catalog).is_ok());

        let mut mismatched = record("mail-dev-asiapac-001");
        mismatched.server_type = "web".to_string();
        assert!(validate_record(&mismatched, &catalog)
            .unwrap_err()
            .contains("does not match"));

        assert!(validate_record(&record("mail-dev-asiapac-000"), &catalog).is_err());
        assert!(validate_record(&record("mail-dev-1"), &catalog).is_err());

        let mut out_of_range = record("dns-qa-uswest-500");
        out_of_range.cpu_load_pct = 99.0;
        assert!(validate_record(&out_of_range, &catalog).is_err());
    }
}
