//! Premium calculation over a plan's rate table

use super::request::QuoteRequest;
use super::schedule::{FeeSchedule, QuoteResult};
use crate::error::QuoteError;
use crate::policy::Policy;
use log::debug;

/// Fixed pricing constants applied on top of the rate table
#[derive(Debug, Clone, PartialEq)]
pub struct PricingBasis {
    /// Death sum assured as a multiple of basic sum assured
    pub death_benefit_multiple: f64,

    /// Share of the yearly premium paid per half-yearly installment
    pub half_yearly_factor: f64,

    /// Share of the yearly premium paid per quarterly installment
    pub quarterly_factor: f64,

    /// Share of the yearly premium paid per monthly (ECS) installment
    pub monthly_factor: f64,

    /// Tax rate in the first policy year
    pub first_year_tax: f64,

    /// Tax rate from the second policy year on
    pub renewal_tax: f64,

    /// Lowest basic sum assured accepted (inclusive)
    pub min_sum_assured: f64,

    /// Days used for the average daily premium
    pub days_per_year: f64,
}

impl Default for PricingBasis {
    fn default() -> Self {
        Self {
            death_benefit_multiple: 1.25,
            half_yearly_factor: 0.51,
            quarterly_factor: 0.26,
            monthly_factor: 0.088,
            first_year_tax: 0.045,
            renewal_tax: 0.0225,
            min_sum_assured: 200_000.0,
            days_per_year: 365.0,
        }
    }
}

impl PricingBasis {
    /// Build the tax-inclusive schedule for one tax rate
    pub fn schedule(&self, base_premium: f64, tax_rate: f64) -> FeeSchedule {
        let tax_factor = 1.0 + tax_rate;
        let yearly = base_premium * tax_factor;

        FeeSchedule {
            tax_rate,
            yearly,
            half_yearly: base_premium * self.half_yearly_factor * tax_factor,
            quarterly: base_premium * self.quarterly_factor * tax_factor,
            monthly: base_premium * self.monthly_factor * tax_factor,
            daily_average: yearly / self.days_per_year,
        }
    }
}

/// Price a request against a plan using the standard pricing basis
pub fn calculate_premium(policy: &Policy, request: &QuoteRequest) -> Result<QuoteResult, QuoteError> {
    calculate_premium_with(&PricingBasis::default(), policy, request)
}

/// Price a request against a plan using an explicit pricing basis
///
/// Checks run in a fixed order: rate table present, fields usable, PPT not
/// above term, sum assured at or above the minimum. When the requested term
/// is not in the rate table the nearest priced term is used (ties go to the
/// smaller term) and the result is flagged as approximated.
pub fn calculate_premium_with(
    basis: &PricingBasis,
    policy: &Policy,
    request: &QuoteRequest,
) -> Result<QuoteResult, QuoteError> {
    let rate_table = policy.rate_table.as_ref().ok_or(QuoteError::MissingCalculator)?;

    request.check_fields()?;

    if request.ppt > request.term {
        return Err(QuoteError::PptExceedsTerm {
            ppt: request.ppt,
            term: request.term,
        });
    }

    if request.basic_sum_assured < basis.min_sum_assured {
        return Err(QuoteError::SumAssuredTooLow {
            minimum: basis.min_sum_assured as u64,
        });
    }

    let (used_term, approximated) = if rate_table.contains(request.term) {
        (request.term, false)
    } else {
        let nearest = rate_table.nearest_term(request.term);
        debug!(
            "Policy {}: term {} not priced, using nearest term {}",
            policy.id, request.term, nearest
        );
        (nearest, true)
    };

    let rate_per_1000 = rate_table
        .get(used_term)
        .ok_or(QuoteError::MissingCalculator)?;

    let death_sum_assured = request.basic_sum_assured * basis.death_benefit_multiple;
    let base_premium = (request.basic_sum_assured / 1000.0) * rate_per_1000;

    Ok(QuoteResult {
        used_term,
        approximated,
        rate_per_1000,
        death_sum_assured,
        base_premium,
        first_year: basis.schedule(base_premium, basis.first_year_tax),
        renewal: basis.schedule(base_premium, basis.renewal_tax),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RateTable;
    use approx::assert_relative_eq;

    fn test_policy() -> Policy {
        Policy::new(1, "Jeevan Labh", 18, 60)
            .with_rate_table(RateTable::new([(10, 45.0), (20, 50.0), (30, 55.0)]).unwrap())
    }

    fn request(term: u32, ppt: u32, sum_assured: f64) -> QuoteRequest {
        QuoteRequest::new("Asha Verma", 35, term, ppt, sum_assured)
    }

    #[test]
    fn test_exact_term_quote() {
        let result = calculate_premium(&test_policy(), &request(20, 15, 500_000.0)).unwrap();

        assert_eq!(result.used_term, 20);
        assert!(!result.approximated);
        assert_eq!(result.rate_per_1000, 50.0);
        assert_relative_eq!(result.base_premium, 25_000.0, max_relative = 1e-12);
        assert_relative_eq!(result.death_sum_assured, 625_000.0, max_relative = 1e-12);
        assert_relative_eq!(result.first_year.yearly, 26_125.0, max_relative = 1e-12);
        assert_eq!(result.first_year.yearly.round(), 26_125.0);
    }

    #[test]
    fn test_schedule_amounts() {
        let result = calculate_premium(&test_policy(), &request(20, 15, 500_000.0)).unwrap();

        let first = result.first_year;
        assert_relative_eq!(first.half_yearly, 25_000.0 * 0.51 * 1.045, max_relative = 1e-12);
        assert_relative_eq!(first.quarterly, 25_000.0 * 0.26 * 1.045, max_relative = 1e-12);
        assert_relative_eq!(first.monthly, 25_000.0 * 0.088 * 1.045, max_relative = 1e-12);
        assert_relative_eq!(first.daily_average, 26_125.0 / 365.0, max_relative = 1e-12);

        let renewal = result.renewal;
        assert_relative_eq!(renewal.yearly, 25_562.5, max_relative = 1e-12);
        assert_relative_eq!(renewal.monthly, 25_000.0 * 0.088 * 1.0225, max_relative = 1e-12);
        assert_relative_eq!(renewal.daily_average, 25_562.5 / 365.0, max_relative = 1e-12);
    }

    #[test]
    fn test_tax_loading() {
        for sum_assured in [200_000.0, 350_000.0, 1_234_567.0, 10_000_000.0] {
            let result = calculate_premium(&test_policy(), &request(30, 10, sum_assured)).unwrap();
            let base = result.base_premium;
            assert_relative_eq!(result.first_year.yearly - base, 0.045 * base, max_relative = 1e-9);
            assert_relative_eq!(result.renewal.yearly - base, 0.0225 * base, max_relative = 1e-9);
            assert_relative_eq!(result.death_sum_assured, 1.25 * sum_assured, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_approximated_term_tie_goes_to_smaller() {
        let result = calculate_premium(&test_policy(), &request(15, 15, 500_000.0)).unwrap();
        assert_eq!(result.used_term, 10);
        assert!(result.approximated);
        assert_relative_eq!(result.base_premium, 22_500.0, max_relative = 1e-12);
    }

    #[test]
    fn test_approximated_term_nearest() {
        let policy = test_policy();
        for (term, expected) in [(12, 10), (17, 20), (26, 30), (40, 30), (1, 10)] {
            let result = calculate_premium(&policy, &request(term, 1, 500_000.0)).unwrap();
            assert_eq!(result.used_term, expected, "term {}", term);
            assert!(result.approximated);
        }
    }

    #[test]
    fn test_missing_calculator() {
        let policy = Policy::new(2, "Jeevan Umang", 0, 55);
        assert_eq!(
            calculate_premium(&policy, &request(20, 15, 500_000.0)),
            Err(QuoteError::MissingCalculator)
        );
        // Takes precedence over any input problem
        assert_eq!(
            calculate_premium(&policy, &request(10, 20, 1.0)),
            Err(QuoteError::MissingCalculator)
        );
    }

    #[test]
    fn test_invalid_field() {
        let bad_name = QuoteRequest::new("", 35, 20, 15, 500_000.0);
        assert_eq!(
            calculate_premium(&test_policy(), &bad_name),
            Err(QuoteError::invalid_field("userName"))
        );
    }

    #[test]
    fn test_ppt_exceeds_term() {
        for sum_assured in [1.0, 199_999.0, 500_000.0] {
            assert_eq!(
                calculate_premium(&test_policy(), &request(10, 11, sum_assured)),
                Err(QuoteError::PptExceedsTerm { ppt: 11, term: 10 })
            );
        }
        // Equal terms are fine
        assert!(calculate_premium(&test_policy(), &request(20, 20, 500_000.0)).is_ok());
    }

    #[test]
    fn test_sum_assured_boundary() {
        assert_eq!(
            calculate_premium(&test_policy(), &request(20, 15, 199_999.0)),
            Err(QuoteError::SumAssuredTooLow { minimum: 200_000 })
        );
        assert!(calculate_premium(&test_policy(), &request(20, 15, 200_000.0)).is_ok());
    }

    #[test]
    fn test_non_positive_sum_assured_is_below_minimum() {
        for sum_assured in [0.0, -500_000.0] {
            assert_eq!(
                calculate_premium(&test_policy(), &request(20, 15, sum_assured)),
                Err(QuoteError::SumAssuredTooLow { minimum: 200_000 })
            );
        }
        assert_eq!(
            calculate_premium(&test_policy(), &request(20, 15, f64::INFINITY)),
            Err(QuoteError::invalid_field("basicSumAssured"))
        );
    }

    #[test]
    fn test_custom_basis() {
        let basis = PricingBasis {
            first_year_tax: 0.0,
            renewal_tax: 0.0,
            ..Default::default()
        };
        let result = calculate_premium_with(&basis, &test_policy(), &request(20, 15, 500_000.0)).unwrap();
        assert_relative_eq!(result.first_year.yearly, result.base_premium, max_relative = 1e-12);
        assert_eq!(result.first_year, result.renewal);
    }
}
