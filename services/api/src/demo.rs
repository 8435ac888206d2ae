use crate::infra::{parse_duration, parse_purpose, parse_stay_kind, InMemorySessionStore};
use clap::Args;
use std::sync::Arc;
use visa_navigator::config::WizardConfig;
use visa_navigator::error::AppError;
use visa_navigator::workflows::visa::{
    DurationCategory, EligibilityRules, RouteTable, StayKind, TravelPurpose, VisaPageCatalog,
    VisaWizardService, WizardOutcome, WizardStepInput, ADDITIONAL_NEEDS_OPTIONS,
};

#[derive(Args, Debug)]
pub(crate) struct RouteArgs {
    /// Destination country or region, as a traveller would type it
    #[arg(long)]
    pub(crate) destination: String,
    /// Stay length: short-single, short-multiple, long-stay, or transit
    #[arg(long, value_parser = parse_duration)]
    pub(crate) duration: DurationCategory,
    /// Traveller nationality
    #[arg(long, default_value = "")]
    pub(crate) nationality: String,
    /// Purpose of travel
    #[arg(long, value_parser = parse_purpose)]
    pub(crate) purpose: Option<TravelPurpose>,
}

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// Passport nationality
    #[arg(long)]
    pub(crate) nationality: String,
    /// Country the application will be lodged from (defaults to the nationality)
    #[arg(long)]
    pub(crate) applying_from: Option<String>,
    /// Current US visa status, if applying from the United States
    #[arg(long)]
    pub(crate) usa_visa_status: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PagesArgs {
    /// Only list short-stay or long-stay pages
    #[arg(long, value_parser = parse_stay_kind)]
    pub(crate) stay: Option<StayKind>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Destination entered on the first wizard step
    #[arg(long, default_value = "Germany")]
    pub(crate) destination: String,
    /// Nationality entered on the second wizard step
    #[arg(long, default_value = "Brazil")]
    pub(crate) nationality: String,
    /// Country the application will be lodged from
    #[arg(long)]
    pub(crate) applying_from: Option<String>,
    /// US visa status for applicants lodging from the United States
    #[arg(long)]
    pub(crate) usa_visa_status: Option<String>,
    /// Purpose of travel
    #[arg(long, value_parser = parse_purpose, default_value = "tourism")]
    pub(crate) purpose: TravelPurpose,
    /// Stay length
    #[arg(long, value_parser = parse_duration, default_value = "short-single")]
    pub(crate) duration: DurationCategory,
    /// Mount the wizard from a short-stay or long-stay landing page
    #[arg(long, value_parser = parse_stay_kind)]
    pub(crate) flow: Option<StayKind>,
}

pub(crate) fn run_route(args: RouteArgs) -> Result<(), AppError> {
    let RouteArgs {
        destination,
        duration,
        nationality,
        purpose,
    } = args;

    let resolution = RouteTable::shared().explain(&destination, duration);
    println!("Destination: {destination} ({})", duration.label());
    if !nationality.is_empty() {
        println!("Nationality: {nationality}");
    }
    if let Some(purpose) = purpose {
        println!("Purpose: {}", purpose.label());
    }
    println!("Route: {} [{:?}]", resolution.path, resolution.kind);
    Ok(())
}

pub(crate) fn run_eligibility(args: EligibilityArgs) -> Result<(), AppError> {
    let EligibilityArgs {
        nationality,
        applying_from,
        usa_visa_status,
    } = args;

    let applying_from = applying_from.unwrap_or_else(|| nationality.clone());
    let assessment =
        EligibilityRules.evaluate(&nationality, &applying_from, usa_visa_status.as_deref());

    println!("Nationality: {nationality}, applying from {applying_from}");
    println!(
        "Eligible: {}",
        if assessment.verdict.eligible { "yes" } else { "no" }
    );
    println!("{}", assessment.verdict.message);
    println!("Recommendation: {}", assessment.verdict.recommendation);
    Ok(())
}

pub(crate) fn run_pages(args: PagesArgs) -> Result<(), AppError> {
    let catalog = VisaPageCatalog::standard();
    let pages: Vec<_> = match args.stay {
        Some(stay) => catalog.pages_for(stay),
        None => catalog.pages().iter().collect(),
    };

    for page in pages {
        println!("{:<40} {}", page.path, page.title);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        destination,
        nationality,
        applying_from,
        usa_visa_status,
        purpose,
        duration,
        flow,
    } = args;

    let store = Arc::new(InMemorySessionStore::default());
    let service = VisaWizardService::new(store.clone(), WizardConfig::default().session_ttl());
    let session = service.start(flow)?;

    println!("Visa wizard demo (session {})", session.id.0);

    let inputs = vec![
        WizardStepInput::Destination { destination },
        WizardStepInput::Nationality {
            nationality,
            applying_from,
            usa_visa_status,
        },
        WizardStepInput::Purpose { purpose },
        WizardStepInput::Duration { duration },
        WizardStepInput::PersonalInfo {
            name: "Demo Traveller".to_string(),
            additional_needs: ADDITIONAL_NEEDS_OPTIONS
                .iter()
                .take(2)
                .map(|need| need.to_string())
                .collect(),
        },
        WizardStepInput::Contact {
            email: "traveller@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
        },
    ];

    for input in inputs {
        let step = input.step();
        let advanced = service.advance(&session.id, input)?;
        println!("- {} recorded", step.label());
        for notice in advanced.wizard.notices() {
            println!("  note: {}: {}", notice.title, notice.detail);
        }
    }

    let outcome = service.complete(&session.id)?;
    render_outcome(&outcome);
    println!("\nOpen sessions after completion: {}", store.len());
    Ok(())
}

fn render_outcome(outcome: &WizardOutcome) {
    let form = &outcome.form;
    println!("\nOutcome");
    println!("Destination: {}", form.destination);
    println!("Nationality: {}", form.nationality);
    if let Some(purpose) = form.purpose {
        println!("Purpose: {}", purpose.label());
    }
    if let Some(duration) = form.duration {
        println!("Stay: {}", duration.label());
    }
    if !form.personal_info.additional_needs.is_empty() {
        let needs: Vec<&str> = form
            .personal_info
            .additional_needs
            .iter()
            .map(String::as_str)
            .collect();
        println!("Additional needs: {}", needs.join(", "));
    }
    println!("Route: {} [{:?}]", outcome.route.path, outcome.route.kind);
    println!(
        "Eligibility: {} ({:?})",
        if outcome.eligibility.eligible {
            "eligible"
        } else {
            "not eligible"
        },
        outcome.eligibility_rule
    );
    println!("{}", outcome.eligibility.message);
    println!("Recommendation: {}", outcome.eligibility.recommendation);
}
