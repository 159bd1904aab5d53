//! Policy data structures matching the catalog format

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Highest age the catalog accepts for eligibility bounds
pub const MAX_ELIGIBLE_AGE: u8 = 100;

/// Premium rates per 1000 of sum assured, keyed by policy term in years
///
/// Stored as JSON objects with string keys (`{"10": 45, "20": 50}`), which
/// is how the catalog service hands them out. Keys are parsed to positive
/// integers and rates must be positive and finite, so the calculator never
/// sees a malformed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct RateTable {
    /// Rates ordered by ascending term
    rates: BTreeMap<u32, f64>,
}

impl RateTable {
    /// Build a table from (term, rate) pairs
    pub fn new<I>(pairs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (u32, f64)>,
    {
        let mut rates = BTreeMap::new();
        for (term, rate) in pairs {
            if term == 0 {
                return Err(CatalogError::invalid_rate_table("term must be a positive integer"));
            }
            if !rate.is_finite() || rate <= 0.0 {
                return Err(CatalogError::invalid_rate_table(format!(
                    "rate for term {} must be a positive number, got {}",
                    term, rate
                )));
            }
            rates.insert(term, rate);
        }

        if rates.is_empty() {
            return Err(CatalogError::invalid_rate_table("table has no entries"));
        }

        Ok(Self { rates })
    }

    /// Get the rate for an exact term
    pub fn get(&self, term: u32) -> Option<f64> {
        self.rates.get(&term).copied()
    }

    /// Check whether a term is priced directly
    pub fn contains(&self, term: u32) -> bool {
        self.rates.contains_key(&term)
    }

    /// Priced terms in ascending order
    pub fn terms(&self) -> impl Iterator<Item = u32> + '_ {
        self.rates.keys().copied()
    }

    /// (term, rate) pairs in ascending term order
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.rates.iter().map(|(&term, &rate)| (term, rate))
    }

    /// Number of priced terms (always at least one)
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Find the priced term closest to `term`
    ///
    /// Keys are scanned in ascending order and only a strictly smaller
    /// distance replaces the current best, so ties go to the smallest term.
    pub fn nearest_term(&self, term: u32) -> u32 {
        let mut best: Option<(u32, u32)> = None;
        for candidate in self.terms() {
            let distance = candidate.abs_diff(term);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((candidate, distance)),
            }
        }
        // Non-empty by construction
        best.map(|(candidate, _)| candidate).unwrap_or(term)
    }
}

impl TryFrom<BTreeMap<String, f64>> for RateTable {
    type Error = CatalogError;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut pairs = Vec::with_capacity(raw.len());
        for (key, rate) in raw {
            let term: u32 = key.trim().parse().map_err(|_| {
                CatalogError::invalid_rate_table(format!(
                    "term key {:?} is not a positive integer",
                    key
                ))
            })?;
            pairs.push((term, rate));
        }
        Self::new(pairs)
    }
}

impl From<RateTable> for BTreeMap<String, f64> {
    fn from(table: RateTable) -> Self {
        table
            .rates
            .into_iter()
            .map(|(term, rate)| (term.to_string(), rate))
            .collect()
    }
}

/// A single plan from the policy catalog
///
/// Deserialization goes through [`Policy::validate`], so a record with
/// inverted age bounds or an empty name never reaches the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PolicyRecord")]
pub struct Policy {
    /// Catalog identifier, stable across edits
    pub id: u32,

    /// Display name
    pub name: String,

    /// Youngest eligible age (inclusive)
    pub min_age: u8,

    /// Oldest eligible age (inclusive)
    pub max_age: u8,

    /// Marketing description
    #[serde(default)]
    pub description: Option<String>,

    /// Premium rates; None means the plan is informational only
    #[serde(default)]
    pub rate_table: Option<RateTable>,

    /// Bonus feature note
    #[serde(default)]
    pub bonus: Option<String>,
}

/// Unchecked wire shape of a policy
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolicyRecord {
    id: u32,
    name: String,
    min_age: u8,
    max_age: u8,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    rate_table: Option<RateTable>,
    #[serde(default)]
    bonus: Option<String>,
}

impl TryFrom<PolicyRecord> for Policy {
    type Error = CatalogError;

    fn try_from(record: PolicyRecord) -> Result<Self, Self::Error> {
        let policy = Policy {
            id: record.id,
            name: record.name,
            min_age: record.min_age,
            max_age: record.max_age,
            description: record.description,
            rate_table: record.rate_table,
            bonus: record.bonus,
        };
        policy.validate()?;
        Ok(policy)
    }
}

impl Policy {
    /// Create an informational policy with required fields
    pub fn new(id: u32, name: impl Into<String>, min_age: u8, max_age: u8) -> Self {
        Self {
            id,
            name: name.into(),
            min_age,
            max_age,
            description: None,
            rate_table: None,
            bonus: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a rate table, making the plan quotable
    pub fn with_rate_table(mut self, rate_table: RateTable) -> Self {
        self.rate_table = Some(rate_table);
        self
    }

    /// Attach a bonus note
    pub fn with_bonus(mut self, bonus: impl Into<String>) -> Self {
        self.bonus = Some(bonus.into());
        self
    }

    /// Check the catalog invariants for this record
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::invalid_policy(format!(
                "policy {} has an empty name",
                self.id
            )));
        }
        if self.max_age > MAX_ELIGIBLE_AGE {
            return Err(CatalogError::invalid_policy(format!(
                "policy {} max age {} exceeds {}",
                self.id, self.max_age, MAX_ELIGIBLE_AGE
            )));
        }
        if self.min_age > self.max_age {
            return Err(CatalogError::invalid_policy(format!(
                "policy {} min age {} is above max age {}",
                self.id, self.min_age, self.max_age
            )));
        }
        Ok(())
    }

    /// Whether `age` falls inside the inclusive eligibility bounds
    pub fn is_eligible(&self, age: u8) -> bool {
        age >= self.min_age && age <= self.max_age
    }

    /// Whether the plan can be priced by the calculator
    pub fn has_calculator(&self) -> bool {
        self.rate_table.is_some()
    }

    /// Call to action shown on a plan card
    pub fn action_label(&self) -> &'static str {
        if self.has_calculator() {
            "View & Calculate"
        } else {
            "View Details"
        }
    }
}
