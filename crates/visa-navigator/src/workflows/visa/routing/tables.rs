//! Static destination tables backing the route resolver and page catalog.
//!
//! Slugs are the normalized destination names (lowercase, words joined with hyphens).

pub(crate) const SHORT_STAY_LISTING: &str = "/visas/short-stay";
pub(crate) const LONG_STAY_LISTING: &str = "/visas/long-stay";
pub(crate) const SCHENGEN_LANDING: &str = "/visas/schengen-short-stay";

/// Destinations with a dedicated short-stay page, as `(slug, country label)`.
pub(crate) const SHORT_STAY_PAGES: &[(&str, &str)] = &[
    ("schengen-area", "Schengen Area"),
    ("france", "France"),
    ("germany", "Germany"),
    ("italy", "Italy"),
    ("spain", "Spain"),
    ("netherlands", "Netherlands"),
    ("greece", "Greece"),
    ("switzerland", "Switzerland"),
    ("united-kingdom", "United Kingdom"),
    ("united-states", "United States"),
    ("canada", "Canada"),
    ("japan", "Japan"),
    ("australia", "Australia"),
    ("united-arab-emirates", "United Arab Emirates"),
];

/// Destinations with a dedicated long-stay page, as `(slug, country label)`.
pub(crate) const LONG_STAY_PAGES: &[(&str, &str)] = &[
    ("france", "France"),
    ("germany", "Germany"),
    ("italy", "Italy"),
    ("spain", "Spain"),
    ("portugal", "Portugal"),
    ("netherlands", "Netherlands"),
    ("united-kingdom", "United Kingdom"),
    ("canada", "Canada"),
    ("australia", "Australia"),
];

/// The 27 members of the Schengen Area.
pub(crate) const SCHENGEN_MEMBERS: &[&str] = &[
    "austria",
    "belgium",
    "croatia",
    "czech-republic",
    "denmark",
    "estonia",
    "finland",
    "france",
    "germany",
    "greece",
    "hungary",
    "iceland",
    "italy",
    "latvia",
    "liechtenstein",
    "lithuania",
    "luxembourg",
    "malta",
    "netherlands",
    "norway",
    "poland",
    "portugal",
    "slovakia",
    "slovenia",
    "spain",
    "sweden",
    "switzerland",
];

/// Country page path, e.g. `/visas/france-long-stay`.
pub(crate) fn country_page_path(slug: &str, stay_slug: &str) -> String {
    format!("/visas/{slug}-{stay_slug}")
}
