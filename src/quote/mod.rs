//! Premium quoting for plans that carry a rate table

mod engine;
mod request;
mod schedule;

pub use engine::{calculate_premium, calculate_premium_with, PricingBasis};
pub use request::{QuoteForm, QuoteRequest};
pub use schedule::{FeeSchedule, QuoteResult};
