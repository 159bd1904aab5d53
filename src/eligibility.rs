//! Age-based eligibility filtering over the policy catalog

use crate::error::EligibilityError;
use crate::policy::{Policy, MAX_ELIGIBLE_AGE};

/// Return the policies whose inclusive age bounds contain `age`
///
/// Catalog order is preserved. An empty result means no plan is available
/// for this age; it is not an error. Ages outside 0-100 are rejected so the
/// caller can show a validation message.
pub fn filter_eligible(policies: &[Policy], age: i64) -> Result<Vec<&Policy>, EligibilityError> {
    if !(0..=MAX_ELIGIBLE_AGE as i64).contains(&age) {
        return Err(EligibilityError::InvalidInput(age));
    }
    let age = age as u8;

    Ok(policies.iter().filter(|p| p.is_eligible(age)).collect())
}
