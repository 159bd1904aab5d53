//! Policy data structures and catalog loading

mod data;
pub mod loader;

pub use data::{Policy, RateTable, MAX_ELIGIBLE_AGE};
pub use loader::{load_catalog, load_catalog_from_reader, load_catalog_json, load_default_catalog};
