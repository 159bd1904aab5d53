//! Message templates for lead hand-off

use crate::display::format_rupees;
use crate::quote::QuoteRequest;
use serde::{Deserialize, Serialize};

/// The five message shapes a visitor can send to an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Inquiry {
    /// Interest with no particular plan selected
    GeneralInterest,

    /// Interest in one plan, from its details view
    #[serde(rename_all = "camelCase")]
    PlanInterest {
        plan_name: String,
    },

    /// Recap of a calculated quote
    #[serde(rename_all = "camelCase")]
    QuoteDetails {
        plan_name: String,
        user_name: String,
        age: u32,
        term: u32,
        ppt: u32,
        sum_assured: f64,
    },

    /// Full application with contact details
    #[serde(rename_all = "camelCase")]
    ApplicationSubmission {
        name: String,
        age: u32,
        email: String,
        phone: String,
        plan: String,
        sum_assured: f64,
        term: u32,
    },

    /// Footer contact form
    ContactForm {
        email: String,
        message: String,
    },
}

impl Inquiry {
    /// Recap of the request a quote was calculated for
    pub fn quote_details(plan_name: impl Into<String>, request: &QuoteRequest) -> Self {
        Inquiry::QuoteDetails {
            plan_name: plan_name.into(),
            user_name: request.user_name.clone(),
            age: request.age,
            term: request.term,
            ppt: request.ppt,
            sum_assured: request.basic_sum_assured,
        }
    }
}

/// Sum assured as shown to the agent, truncated to whole rupees
fn sum_assured_text(amount: f64) -> String {
    format_rupees(amount.trunc())
}

/// Render an inquiry as the text sent to the agent
///
/// Formatting only: fields are assumed to be validated upstream.
pub fn format_inquiry(inquiry: &Inquiry) -> String {
    match inquiry {
        Inquiry::GeneralInterest => {
            "Hi, I am interested in learning more about your insurance plans. \
             Please provide me with details. Thank you."
                .to_string()
        }
        Inquiry::PlanInterest { plan_name } => format!(
            "Hi, I am interested in learning more about the *{}* plan. \
             Please provide me with details. Thank you.",
            plan_name
        ),
        Inquiry::QuoteDetails {
            plan_name,
            user_name,
            age,
            term,
            ppt,
            sum_assured,
        } => format!(
            "Hello, I am interested in the *{}* plan.\n\
             My Details:\n\
             - Name: {}\n\
             - Age: {}\n\
             - Term: {} years\n\
             - PPT: {} years\n\
             - Sum Assured: {}\n\
             \n\
             Please provide me with more information.",
            plan_name,
            user_name,
            age,
            term,
            ppt,
            sum_assured_text(*sum_assured)
        ),
        Inquiry::ApplicationSubmission {
            name,
            age,
            email,
            phone,
            plan,
            sum_assured,
            term,
        } => format!(
            "*New Insurance Application*\n\
             \n\
             *Name:* {}\n\
             *Age:* {}\n\
             *Email:* {}\n\
             *Phone:* {}\n\
             *Plan Interested In:* {}\n\
             *Sum Assured:* {}\n\
             *Policy Term:* {} years",
            name,
            age,
            email,
            phone,
            plan,
            sum_assured_text(*sum_assured),
            term
        ),
        Inquiry::ContactForm { email, message } => format!(
            "*New Contact Message*\n\
             \n\
             *Email:* {}\n\
             *Message:* {}",
            email,
            message.trim()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_and_plan_interest() {
        assert!(format_inquiry(&Inquiry::GeneralInterest).contains("your insurance plans"));

        let text = format_inquiry(&Inquiry::PlanInterest {
            plan_name: "Jeevan Labh".to_string(),
        });
        assert_eq!(
            text,
            "Hi, I am interested in learning more about the *Jeevan Labh* plan. \
             Please provide me with details. Thank you."
        );
    }

    #[test]
    fn test_quote_details() {
        let request = QuoteRequest::new("Asha Verma", 32, 20, 15, 500_000.0);
        let text = format_inquiry(&Inquiry::quote_details("Jeevan Labh", &request));
        assert_eq!(
            text,
            "Hello, I am interested in the *Jeevan Labh* plan.\n\
             My Details:\n\
             - Name: Asha Verma\n\
             - Age: 32\n\
             - Term: 20 years\n\
             - PPT: 15 years\n\
             - Sum Assured: ₹5,00,000\n\
             \n\
             Please provide me with more information."
        );
    }

    #[test]
    fn test_application_submission() {
        let text = format_inquiry(&Inquiry::ApplicationSubmission {
            name: "Rohit Sen".to_string(),
            age: 41,
            email: "rohit@example.com".to_string(),
            phone: "9876543210".to_string(),
            plan: "Tech Term".to_string(),
            sum_assured: 10_000_000.0,
            term: 25,
        });
        assert!(text.starts_with("*New Insurance Application*\n\n*Name:* Rohit Sen\n"));
        assert!(text.contains("*Sum Assured:* ₹1,00,00,000\n"));
        assert!(text.ends_with("*Policy Term:* 25 years"));
    }

    #[test]
    fn test_sum_assured_truncates_fraction() {
        let request = QuoteRequest::new("Asha Verma", 32, 20, 15, 500_000.7);
        let text = format_inquiry(&Inquiry::quote_details("Jeevan Labh", &request));
        assert!(text.contains("- Sum Assured: ₹5,00,000\n"));

        let text = format_inquiry(&Inquiry::ApplicationSubmission {
            name: "Rohit Sen".to_string(),
            age: 41,
            email: "rohit@example.com".to_string(),
            phone: "9876543210".to_string(),
            plan: "Tech Term".to_string(),
            sum_assured: 999_999.99,
            term: 25,
        });
        assert!(text.contains("*Sum Assured:* ₹9,99,999\n"));
    }

    #[test]
    fn test_contact_form() {
        let text = format_inquiry(&Inquiry::ContactForm {
            email: "meera@example.com".to_string(),
            message: "  Please call me back.\n".to_string(),
        });
        assert_eq!(
            text,
            "*New Contact Message*\n\n*Email:* meera@example.com\n*Message:* Please call me back."
        );
    }

    #[test]
    fn test_inquiry_json_tagging() {
        let inquiry: Inquiry =
            serde_json::from_str(r#"{"kind": "planInterest", "planName": "Tech Term"}"#).unwrap();
        assert_eq!(
            inquiry,
            Inquiry::PlanInterest {
                plan_name: "Tech Term".to_string()
            }
        );
    }
}
