//! Messaging hand-off links
//!
//! Only the link is built here; opening it is up to the caller.

use crate::error::LeadError;
use url::form_urlencoded;

/// Base URL of the click-to-chat endpoint
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Build a click-to-chat link that pre-fills `text` for `destination`
///
/// `destination` is an international number written as digits only; a
/// leading `+` is accepted and dropped.
pub fn whatsapp_link(destination: &str, text: &str) -> Result<String, LeadError> {
    let number = destination.trim().trim_start_matches('+');
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(LeadError::InvalidDestination(destination.to_string()));
    }

    let encoded: String = form_urlencoded::byte_serialize(text.trim().as_bytes()).collect();
    Ok(format!("{}/{}?text={}", WHATSAPP_BASE_URL, number, encoded))
}
