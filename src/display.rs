//! Plain-text presentation of quotes
//!
//! Amounts are kept at full precision in [`QuoteResult`]; rounding to whole
//! rupees and Indian digit grouping (`12,34,567`) only happen here.

use crate::quote::{FeeSchedule, QuoteRequest, QuoteResult};
use std::fmt;

/// Round to whole units and group digits the Indian way
pub fn format_indian(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Whole-rupee amount with currency sign
pub fn format_rupees(amount: f64) -> String {
    format!("₹{}", format_indian(amount))
}

/// Printable quote for one applicant and plan
pub struct QuoteSummary<'a> {
    pub plan_name: &'a str,
    pub request: &'a QuoteRequest,
    pub result: &'a QuoteResult,
}

impl<'a> QuoteSummary<'a> {
    pub fn new(plan_name: &'a str, request: &'a QuoteRequest, result: &'a QuoteResult) -> Self {
        Self {
            plan_name,
            request,
            result,
        }
    }
}

fn write_schedule(f: &mut fmt::Formatter<'_>, heading: &str, schedule: &FeeSchedule) -> fmt::Result {
    let percent = (schedule.tax_rate * 10_000.0).round() / 100.0;
    writeln!(f, "{} With TAX {}% :", heading, percent)?;
    for (label, amount) in schedule.rows() {
        writeln!(f, "  {:<14} {}", format!("{} :", label), format_rupees(amount))?;
    }
    Ok(())
}

impl fmt::Display for QuoteSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let request = self.request;
        let result = self.result;

        writeln!(f, "Result for: {}", self.plan_name)?;
        if result.approximated {
            writeln!(
                f,
                "Note: Premium is estimated using the closest available term ({} years).",
                result.used_term
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Name : {}", request.user_name)?;
        writeln!(f, "Age : {}", request.age)?;
        writeln!(f, "Selected Term : {} Years", request.term)?;
        writeln!(f, "P.P.T. : {} Years", request.ppt)?;
        writeln!(f, "Death Sum Assured : {}", format_rupees(result.death_sum_assured))?;
        writeln!(f, "Basic Sum Assured : {}", format_rupees(request.basic_sum_assured))?;
        writeln!(f)?;
        write_schedule(f, "1st year Premium", &result.first_year)?;
        writeln!(f)?;
        write_schedule(f, "After 1st year Premium", &result.renewal)?;
        writeln!(f)?;
        write!(f, "Premium Shown Above is Indicative and not Exact.")
    }
}
