//! Error types for the quoting core
//!
//! Every failure here is recoverable: callers map the variant to a message
//! for the person filling in the form.

use thiserror::Error;

/// Errors from the eligibility filter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EligibilityError {
    /// Age outside the accepted 0-100 range
    #[error("Invalid age {0}: must be between 0 and 100")]
    InvalidInput(i64),
}

/// Errors from the premium calculator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// The plan carries no rate table
    #[error("Calculation is not available for this plan")]
    MissingCalculator,

    /// A request field is missing or not a usable number
    #[error("Invalid value for field: {field}")]
    InvalidField {
        field: &'static str,
    },

    /// Premium paying term longer than the policy term
    #[error("Premium Paying Term ({ppt}) cannot be greater than the Policy Term ({term})")]
    PptExceedsTerm {
        ppt: u32,
        term: u32,
    },

    /// Basic sum assured below the plan minimum
    #[error("The minimum Sum Assured for this policy is {minimum}")]
    SumAssuredTooLow {
        minimum: u64,
    },
}

impl QuoteError {
    /// Creates an invalid field error
    pub fn invalid_field(field: &'static str) -> Self {
        QuoteError::InvalidField { field }
    }

    /// Whether the failure comes from plan configuration rather than user input
    pub fn is_configuration_gap(&self) -> bool {
        matches!(self, QuoteError::MissingCalculator)
    }
}

/// Errors raised at the catalog boundary
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Policy record breaks a data model invariant
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    /// Rate table key or rate could not be accepted
    #[error("Invalid rate table: {0}")]
    InvalidRateTable(String),

    /// No policy with this id
    #[error("Policy not found: {0}")]
    NotFound(u32),

    /// Caller lacks the admin role
    #[error("Unauthorized: Admins only")]
    Forbidden,

    /// Every id up to `u32::MAX` is taken
    #[error("No catalog ids left to assign")]
    IdsExhausted,

    /// Admin account details could not be accepted
    #[error("Invalid admin account: {0}")]
    InvalidAccount(String),

    /// CSV read or decode failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decode failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Underlying file access failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Creates an invalid policy error
    pub fn invalid_policy(message: impl Into<String>) -> Self {
        CatalogError::InvalidPolicy(message.into())
    }

    /// Creates an invalid admin account error
    pub fn invalid_account(message: impl Into<String>) -> Self {
        CatalogError::InvalidAccount(message.into())
    }

    /// Creates an invalid rate table error
    pub fn invalid_rate_table(message: impl Into<String>) -> Self {
        CatalogError::InvalidRateTable(message.into())
    }
}

/// Errors building a messaging hand-off
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadError {
    /// Destination is not a plain international phone number
    #[error("Invalid destination number: {0:?}")]
    InvalidDestination(String),
}
