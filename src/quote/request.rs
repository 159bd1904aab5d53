//! Calculator inputs: the raw form and the parsed request

use crate::error::QuoteError;
use serde::{Deserialize, Serialize};

/// Parsed input to the premium calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Applicant name, shown on the quote
    pub user_name: String,

    /// Applicant age in years
    pub age: u32,

    /// Desired policy term in years
    pub term: u32,

    /// Premium paying term in years
    pub ppt: u32,

    /// Basic sum assured
    pub basic_sum_assured: f64,
}

impl QuoteRequest {
    pub fn new(
        user_name: impl Into<String>,
        age: u32,
        term: u32,
        ppt: u32,
        basic_sum_assured: f64,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            age,
            term,
            ppt,
            basic_sum_assured,
        }
    }

    /// Check that every field holds a usable value
    ///
    /// Range rules (PPT against term, minimum sum assured) are applied by
    /// the calculator after this passes, so a zero or negative sum assured
    /// is reported as below the minimum rather than as a bad field.
    pub fn check_fields(&self) -> Result<(), QuoteError> {
        if self.user_name.trim().is_empty() {
            return Err(QuoteError::invalid_field("userName"));
        }
        if self.age == 0 {
            return Err(QuoteError::invalid_field("age"));
        }
        if self.term == 0 {
            return Err(QuoteError::invalid_field("term"));
        }
        if self.ppt == 0 {
            return Err(QuoteError::invalid_field("ppt"));
        }
        if !self.basic_sum_assured.is_finite() {
            return Err(QuoteError::invalid_field("basicSumAssured"));
        }
        Ok(())
    }
}

/// Calculator form fields exactly as entered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteForm {
    pub user_name: String,
    pub age: String,
    pub term: String,
    pub ppt: String,
    pub sum_assured: String,
}

impl QuoteForm {
    /// Parse the raw fields into a request
    ///
    /// Whitespace is trimmed. Integer fields must be positive whole numbers
    /// and the sum assured must be a finite decimal; the first failing field
    /// is named in the error.
    pub fn parse(&self) -> Result<QuoteRequest, QuoteError> {
        let user_name = self.user_name.trim();
        if user_name.is_empty() {
            return Err(QuoteError::invalid_field("userName"));
        }

        let request = QuoteRequest {
            user_name: user_name.to_string(),
            age: parse_positive(&self.age, "age")?,
            term: parse_positive(&self.term, "term")?,
            ppt: parse_positive(&self.ppt, "ppt")?,
            basic_sum_assured: parse_finite(&self.sum_assured, "basicSumAssured")?,
        };
        Ok(request)
    }
}

fn parse_positive(raw: &str, field: &'static str) -> Result<u32, QuoteError> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(QuoteError::invalid_field(field)),
    }
}

fn parse_finite(raw: &str, field: &'static str) -> Result<f64, QuoteError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(QuoteError::invalid_field(field)),
    }
}
