//! Load the policy catalog from CSV or JSON exports

use super::{Policy, RateTable};
use crate::error::CatalogError;
use csv::Reader;
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default location of the catalog export
pub const DEFAULT_CATALOG_PATH: &str = "data/policies.csv";

/// Raw CSV row matching the catalog export columns
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    id: u32,
    name: String,
    min_age: u8,
    max_age: u8,
    description: Option<String>,
    /// JSON object text, empty when the plan has no calculator
    rate_table: Option<String>,
    bonus: Option<String>,
}

/// Treat blank cells as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl CsvRow {
    fn into_policy(self) -> Result<Policy, CatalogError> {
        let rate_table = match non_empty(self.rate_table) {
            Some(text) => Some(serde_json::from_str::<RateTable>(&text)?),
            None => None,
        };

        let policy = Policy {
            id: self.id,
            name: self.name,
            min_age: self.min_age,
            max_age: self.max_age,
            description: non_empty(self.description),
            rate_table,
            bonus: non_empty(self.bonus),
        };
        policy.validate()?;
        Ok(policy)
    }
}

/// Load all policies from a CSV file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Policy>, CatalogError> {
    let path = path.as_ref();
    let policies = load_catalog_from_reader(File::open(path)?)?;
    info!("Loaded {} policies from {}", policies.len(), path.display());
    Ok(policies)
}

/// Load policies from any CSV reader (e.g., string buffer, network stream)
pub fn load_catalog_from_reader<R: Read>(reader: R) -> Result<Vec<Policy>, CatalogError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut policies = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        policies.push(row.into_policy()?);
    }

    Ok(policies)
}

/// Load policies from the JSON array returned by the catalog service
///
/// Each record is validated as it is deserialized.
pub fn load_catalog_json<R: Read>(reader: R) -> Result<Vec<Policy>, CatalogError> {
    let policies: Vec<Policy> = serde_json::from_reader(reader)?;
    info!("Loaded {} policies from JSON", policies.len());
    Ok(policies)
}

/// Load policies from the default catalog location
pub fn load_default_catalog() -> Result<Vec<Policy>, CatalogError> {
    load_catalog(DEFAULT_CATALOG_PATH)
}
