//! Policy Quote CLI
//!
//! Command-line interface for browsing the catalog, checking eligibility,
//! pricing a plan and preparing lead messages

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use policy_quote::policy::{load_catalog, loader::DEFAULT_CATALOG_PATH};
use policy_quote::{
    calculate_premium, filter_eligible, format_inquiry, whatsapp_link, EligibilityError,
    InMemoryCatalog, Inquiry, Policy, PolicyCatalog, QuoteError, QuoteForm, QuoteSummary,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "policy-quote",
    about = "Browse insurance plans, check eligibility and calculate indicative premiums",
    version
)]
struct Cli {
    /// Catalog CSV export
    #[arg(long, global = true, default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every plan in the catalog
    Plans,
    /// List the plans available at a given age
    Eligible {
        /// Applicant age (0-100)
        #[arg(long, allow_hyphen_values = true)]
        age: i64,
    },
    /// Calculate the premium for one plan
    Quote(QuoteArgs),
    /// Print a message for the agent, optionally with its chat link
    Inquiry {
        /// Agent number for the click-to-chat link (digits, country code first)
        #[arg(long, global = true)]
        to: Option<String>,

        #[command(subcommand)]
        kind: InquiryCommand,
    },
}

#[derive(Args, Debug)]
struct QuoteArgs {
    /// Catalog id of the plan
    #[arg(long)]
    policy: u32,
    #[arg(long)]
    name: String,
    #[arg(long)]
    age: String,
    /// Policy term in years
    #[arg(long)]
    term: String,
    /// Premium paying term in years
    #[arg(long)]
    ppt: String,
    /// Basic sum assured
    #[arg(long)]
    sum_assured: String,
    /// Print the raw result as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

impl QuoteArgs {
    fn form(&self) -> QuoteForm {
        QuoteForm {
            user_name: self.name.clone(),
            age: self.age.clone(),
            term: self.term.clone(),
            ppt: self.ppt.clone(),
            sum_assured: self.sum_assured.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum InquiryCommand {
    /// General interest in the plans on offer
    General,
    /// Interest in a specific plan
    Plan {
        #[arg(long)]
        policy: u32,
    },
    /// Recap of a calculated quote
    Quote(QuoteArgs),
    /// Full application with contact details
    Application {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        policy: u32,
        #[arg(long)]
        sum_assured: f64,
        #[arg(long)]
        term: u32,
    },
    /// Contact form message
    Contact {
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let policies = load_catalog(&cli.catalog)
        .with_context(|| format!("Unable to load catalog from {}", cli.catalog.display()))?;
    let catalog = InMemoryCatalog::from_policies(policies)?;

    match cli.command {
        Command::Plans => print_plans(catalog.policies().iter()),
        Command::Eligible { age } => match filter_eligible(catalog.policies(), age) {
            Ok(eligible) if eligible.is_empty() => {
                println!("No plans available for the entered age.");
            }
            Ok(eligible) => print_plans(eligible.into_iter()),
            Err(EligibilityError::InvalidInput(_)) => {
                eprintln!("Please enter a valid age.");
            }
        },
        Command::Quote(args) => run_quote(&catalog, &args)?,
        Command::Inquiry { to, kind } => {
            let inquiry = build_inquiry(&catalog, kind)?;
            let text = format_inquiry(&inquiry);
            println!("{}", text);
            if let Some(to) = to {
                println!("\n{}", whatsapp_link(&to, &text)?);
            }
        }
    }

    Ok(())
}

fn print_plans<'a>(policies: impl Iterator<Item = &'a Policy>) {
    println!("{:>4}  {:<24} {:>9}  {}", "ID", "Plan", "Ages", "");
    println!("{}", "-".repeat(60));
    for policy in policies {
        println!(
            "{:>4}  {:<24} {:>4}-{:<4}  [{}]",
            policy.id,
            policy.name,
            policy.min_age,
            policy.max_age,
            policy.action_label()
        );
        if let Some(bonus) = &policy.bonus {
            println!("      Bonus: {}", bonus);
        }
    }
}

fn find_policy(catalog: &InMemoryCatalog, id: u32) -> Result<&Policy> {
    catalog
        .get(id)
        .with_context(|| format!("Policy {} not found in catalog", id))
}

fn run_quote(catalog: &InMemoryCatalog, args: &QuoteArgs) -> Result<()> {
    let policy = find_policy(catalog, args.policy)?;

    let outcome = args
        .form()
        .parse()
        .and_then(|request| calculate_premium(policy, &request).map(|result| (request, result)));

    match outcome {
        Ok((request, result)) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", QuoteSummary::new(&policy.name, &request, &result));
            }
        }
        Err(QuoteError::InvalidField { field }) => {
            eprintln!("Please fill all required fields correctly ({}).", field);
        }
        Err(err) if err.is_configuration_gap() => {
            eprintln!("{}. Use `inquiry plan --policy {}` to ask an agent.", err, policy.id);
        }
        Err(err) => eprintln!("{}", err),
    }
    Ok(())
}

fn build_inquiry(catalog: &InMemoryCatalog, kind: InquiryCommand) -> Result<Inquiry> {
    let inquiry = match kind {
        InquiryCommand::General => Inquiry::GeneralInterest,
        InquiryCommand::Plan { policy } => Inquiry::PlanInterest {
            plan_name: find_policy(catalog, policy)?.name.clone(),
        },
        InquiryCommand::Quote(args) => {
            let policy = find_policy(catalog, args.policy)?;
            let request = args.form().parse()?;
            Inquiry::quote_details(policy.name.clone(), &request)
        }
        InquiryCommand::Application {
            name,
            age,
            email,
            phone,
            policy,
            sum_assured,
            term,
        } => Inquiry::ApplicationSubmission {
            name,
            age,
            email,
            phone,
            plan: find_policy(catalog, policy)?.name.clone(),
            sum_assured,
            term,
        },
        InquiryCommand::Contact { email, message } => Inquiry::ContactForm { email, message },
    };
    Ok(inquiry)
}
