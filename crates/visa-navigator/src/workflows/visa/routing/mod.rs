mod tables;

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::domain::{normalize_destination, DurationCategory, StayKind, TravelPurpose};

pub(crate) use tables::{
    country_page_path, LONG_STAY_LISTING, LONG_STAY_PAGES, SCHENGEN_LANDING, SHORT_STAY_LISTING,
    SHORT_STAY_PAGES,
};

/// Which rule produced a resolved path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    CountryPage,
    SchengenLanding,
    ShortStayListing,
    LongStayListing,
}

/// Resolved navigation target plus the rule that selected it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResolution {
    pub path: String,
    pub kind: RouteKind,
}

/// Immutable destination lookup tables, built once per process.
#[derive(Debug)]
pub struct RouteTable {
    long_stay: HashMap<&'static str, String>,
    short_stay: HashMap<&'static str, String>,
    schengen: HashSet<&'static str>,
}

impl RouteTable {
    pub fn standard() -> Self {
        let long_stay = LONG_STAY_PAGES
            .iter()
            .map(|(slug, _)| (*slug, country_page_path(slug, StayKind::LongStay.slug())))
            .collect();

        let short_stay = SHORT_STAY_PAGES
            .iter()
            .map(|(slug, _)| {
                let path = if *slug == "schengen-area" {
                    SCHENGEN_LANDING.to_string()
                } else {
                    country_page_path(slug, StayKind::ShortStay.slug())
                };
                (*slug, path)
            })
            .collect();

        let schengen = tables::SCHENGEN_MEMBERS.iter().copied().collect();

        Self {
            long_stay,
            short_stay,
            schengen,
        }
    }

    /// Process-wide table shared by every resolver call.
    pub fn shared() -> &'static RouteTable {
        static TABLE: OnceLock<RouteTable> = OnceLock::new();
        TABLE.get_or_init(RouteTable::standard)
    }

    pub fn is_schengen_member(&self, destination: &str) -> bool {
        self.schengen
            .contains(normalize_destination(destination).as_str())
    }

    pub fn resolve(&self, destination: &str, duration: DurationCategory) -> String {
        self.explain(destination, duration).path
    }

    /// Resolve a destination, reporting which fallback was taken.
    pub fn explain(&self, destination: &str, duration: DurationCategory) -> RouteResolution {
        let slug = normalize_destination(destination);

        if duration.stay_kind() == StayKind::LongStay {
            return match self.long_stay.get(slug.as_str()) {
                Some(path) => RouteResolution {
                    path: path.clone(),
                    kind: RouteKind::CountryPage,
                },
                None => RouteResolution {
                    path: long_stay_listing(destination),
                    kind: RouteKind::LongStayListing,
                },
            };
        }

        let country_page = self.short_stay.get(slug.as_str());

        if self.schengen.contains(slug.as_str()) {
            return match country_page {
                Some(path) => RouteResolution {
                    path: path.clone(),
                    kind: RouteKind::CountryPage,
                },
                None => RouteResolution {
                    path: SCHENGEN_LANDING.to_string(),
                    kind: RouteKind::SchengenLanding,
                },
            };
        }

        match country_page {
            Some(path) if path == SCHENGEN_LANDING => RouteResolution {
                path: path.clone(),
                kind: RouteKind::SchengenLanding,
            },
            Some(path) => RouteResolution {
                path: path.clone(),
                kind: RouteKind::CountryPage,
            },
            None => RouteResolution {
                path: SHORT_STAY_LISTING.to_string(),
                kind: RouteKind::ShortStayListing,
            },
        }
    }
}

fn long_stay_listing(destination: &str) -> String {
    let destination = destination.trim();
    if destination.is_empty() {
        return LONG_STAY_LISTING.to_string();
    }
    format!(
        "{LONG_STAY_LISTING}?country={}",
        urlencoding::encode(destination)
    )
}

/// Map a traveller's destination and stay length to the page that should handle it.
///
/// Nationality and purpose are accepted for parity with the wizard tuple; the current
/// tables are keyed on destination and duration only.
pub fn resolve_route(
    _nationality: &str,
    destination: &str,
    _purpose: Option<TravelPurpose>,
    duration: DurationCategory,
) -> String {
    RouteTable::shared().resolve(destination, duration)
}
