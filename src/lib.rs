//! Policy Quote - catalog, eligibility and premium quoting for term insurance plans
//!
//! This library provides:
//! - Policy catalog records with validated rate tables
//! - Admin-gated catalog edits and an admin directory
//! - Age-based eligibility filtering
//! - Premium calculation with nearest-term approximation
//! - Lead messages and click-to-chat hand-off links
//! - Plain-text quote presentation with Indian digit grouping

pub mod error;
pub mod policy;
pub mod catalog;
pub mod eligibility;
pub mod quote;
pub mod lead;
pub mod display;

// Re-export commonly used types
pub use error::{CatalogError, EligibilityError, LeadError, QuoteError};
pub use policy::{Policy, RateTable};
pub use catalog::{AdminAccount, AdminDirectory, InMemoryCatalog, PolicyCatalog, Role};
pub use eligibility::filter_eligible;
pub use quote::{calculate_premium, PricingBasis, QuoteForm, QuoteRequest, QuoteResult, FeeSchedule};
pub use lead::{format_inquiry, whatsapp_link, Inquiry};
pub use display::{format_indian, QuoteSummary};
