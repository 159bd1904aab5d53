//! Quote output structures

use serde::{Deserialize, Serialize};

/// Premium amounts for each payment frequency, tax included
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSchedule {
    /// Tax rate applied to every amount (0.045 = 4.5%)
    pub tax_rate: f64,
    pub yearly: f64,
    pub half_yearly: f64,
    pub quarterly: f64,
    pub monthly: f64,
    /// Yearly premium spread over the days of a year
    pub daily_average: f64,
}

impl FeeSchedule {
    /// (label, amount) pairs in display order
    pub fn rows(&self) -> [(&'static str, f64); 5] {
        [
            ("Yearly", self.yearly),
            ("Halfly", self.half_yearly),
            ("Quarterly", self.quarterly),
            ("Monthly(ECS)", self.monthly),
            ("Avg Prem/Day", self.daily_average),
        ]
    }
}

/// Result of pricing one request against one plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    /// Term actually priced
    pub used_term: u32,

    /// True when `used_term` was substituted for the requested term
    pub approximated: bool,

    /// Rate per 1000 of sum assured for `used_term`
    pub rate_per_1000: f64,

    pub death_sum_assured: f64,

    /// Premium before tax and modal loading
    pub base_premium: f64,

    /// Schedule for the first policy year
    pub first_year: FeeSchedule,

    /// Schedule from the second policy year on
    pub renewal: FeeSchedule,
}
