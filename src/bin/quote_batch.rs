//! Price a file of quote requests against the catalog
//!
//! Usage: cargo run --bin quote_batch -- --requests data/quote_requests.csv

use anyhow::{Context, Result};
use clap::Parser;
use policy_quote::policy::{load_catalog, loader::DEFAULT_CATALOG_PATH};
use policy_quote::{calculate_premium, InMemoryCatalog, PolicyCatalog, QuoteRequest, QuoteResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "quote_batch", about = "Calculate premiums for a CSV of quote requests")]
struct Cli {
    /// Catalog CSV export
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    /// Quote requests (policyId,userName,age,term,ppt,sumAssured)
    #[arg(long, default_value = "data/quote_requests.csv")]
    requests: PathBuf,

    /// Where to write the priced rows
    #[arg(long, default_value = "quote_batch_output.csv")]
    output: PathBuf,
}

/// One input row
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestRow {
    policy_id: u32,
    user_name: String,
    age: u32,
    term: u32,
    ppt: u32,
    sum_assured: f64,
}

/// One output row; pricing columns are empty when the request failed
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
struct OutputRow {
    policy_id: u32,
    user_name: String,
    requested_term: u32,
    used_term: Option<u32>,
    approximated: Option<bool>,
    base_premium: Option<f64>,
    death_sum_assured: Option<f64>,
    first_year_yearly: Option<f64>,
    first_year_monthly: Option<f64>,
    renewal_yearly: Option<f64>,
    renewal_monthly: Option<f64>,
    error: Option<String>,
}

impl OutputRow {
    fn priced(row: &RequestRow, result: &QuoteResult) -> Self {
        Self {
            policy_id: row.policy_id,
            user_name: row.user_name.clone(),
            requested_term: row.term,
            used_term: Some(result.used_term),
            approximated: Some(result.approximated),
            base_premium: Some(result.base_premium),
            death_sum_assured: Some(result.death_sum_assured),
            first_year_yearly: Some(result.first_year.yearly),
            first_year_monthly: Some(result.first_year.monthly),
            renewal_yearly: Some(result.renewal.yearly),
            renewal_monthly: Some(result.renewal.monthly),
            error: None,
        }
    }

    fn failed(row: &RequestRow, error: String) -> Self {
        Self {
            policy_id: row.policy_id,
            user_name: row.user_name.clone(),
            requested_term: row.term,
            error: Some(error),
            ..Default::default()
        }
    }
}

fn price(catalog: &InMemoryCatalog, row: &RequestRow) -> OutputRow {
    let Some(policy) = catalog.get(row.policy_id) else {
        return OutputRow::failed(row, format!("Policy {} not found", row.policy_id));
    };

    let request = QuoteRequest::new(row.user_name.clone(), row.age, row.term, row.ppt, row.sum_assured);
    match calculate_premium(policy, &request) {
        Ok(result) => OutputRow::priced(row, &result),
        Err(err) => OutputRow::failed(row, err.to_string()),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let start = Instant::now();

    let catalog = InMemoryCatalog::from_policies(
        load_catalog(&cli.catalog)
            .with_context(|| format!("Unable to load catalog from {}", cli.catalog.display()))?,
    )?;
    println!("Loaded {} policies", catalog.len());

    let mut reader = csv::Reader::from_path(&cli.requests)
        .with_context(|| format!("Unable to open {}", cli.requests.display()))?;
    let rows: Vec<RequestRow> = reader
        .deserialize()
        .collect::<Result<Vec<RequestRow>, csv::Error>>()
        .context("Failed to read quote requests")?;
    println!("Loaded {} requests in {:?}", rows.len(), start.elapsed());

    // Price requests in parallel
    let results: Vec<OutputRow> = rows.par_iter().map(|row| price(&catalog, row)).collect();

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("Unable to create {}", cli.output.display()))?;
    for row in &results {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    let approximated = results.iter().filter(|r| r.approximated == Some(true)).count();

    println!("Output written to {}", cli.output.display());
    println!("\nBatch Summary:");
    println!("  Priced:       {}", results.len() - failed);
    println!("  Approximated: {}", approximated);
    println!("  Failed:       {}", failed);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
