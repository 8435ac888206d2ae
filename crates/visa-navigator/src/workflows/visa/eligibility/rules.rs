//! Advisory rule data. Matching is case-insensitive on trimmed input.

pub(crate) const USA_B1_B2_MESSAGE: &str =
    "Holders of a US B1/B2 visitor visa cannot lodge this application from within the United States.";
pub(crate) const USA_B1_B2_RECOMMENDATION: &str =
    "Apply from your home country or your country of legal residence instead.";

pub(crate) const VISA_EXEMPT_MESSAGE: &str =
    "No visa required: your passport qualifies for visa-free entry for short visits.";
pub(crate) const VISA_EXEMPT_RECOMMENDATION: &str =
    "Confirm passport validity and any travel authorisation before you book.";

pub(crate) const DEFAULT_MESSAGE: &str = "You can apply for this visa.";
pub(crate) const DEFAULT_RECOMMENDATION: &str =
    "Start your application and prepare the required supporting documents.";

const VISA_EXEMPT_NATIONALITIES: &[&str] = &[
    "united states",
    "canada",
    "united kingdom",
    "australia",
    "new zealand",
    "japan",
    "singapore",
    "south korea",
];

const USA_ALIASES: &[&str] = &["usa", "us", "united states", "united states of america"];

const B1_B2_ALIASES: &[&str] = &["b1/b2", "b1-b2", "b1 b2", "b1b2"];

fn canonical(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub(crate) fn is_usa(country: &str) -> bool {
    USA_ALIASES.contains(&canonical(country).as_str())
}

pub(crate) fn is_b1_b2(status: &str) -> bool {
    B1_B2_ALIASES.contains(&canonical(status).as_str())
}

pub(crate) fn is_visa_exempt(nationality: &str) -> bool {
    VISA_EXEMPT_NATIONALITIES.contains(&canonical(nationality).as_str())
}
