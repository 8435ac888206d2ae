use serde::{Deserialize, Serialize};

use super::domain::StayKind;
use super::routing::{
    country_page_path, LONG_STAY_LISTING, LONG_STAY_PAGES, SCHENGEN_LANDING, SHORT_STAY_LISTING,
    SHORT_STAY_PAGES,
};

/// A visa landing page the resolver can send travellers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaPage {
    pub path: String,
    pub title: String,
    pub stay_kind: StayKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug)]
pub struct VisaPageCatalog {
    pages: Vec<VisaPage>,
}

impl VisaPageCatalog {
    pub fn standard() -> Self {
        let mut pages = vec![
            VisaPage {
                path: SHORT_STAY_LISTING.to_string(),
                title: "Short-Stay Visas".to_string(),
                stay_kind: StayKind::ShortStay,
                country: None,
            },
            VisaPage {
                path: LONG_STAY_LISTING.to_string(),
                title: "Long-Stay Visas".to_string(),
                stay_kind: StayKind::LongStay,
                country: None,
            },
        ];

        for (slug, country) in SHORT_STAY_PAGES {
            let path = if *slug == "schengen-area" {
                SCHENGEN_LANDING.to_string()
            } else {
                country_page_path(slug, StayKind::ShortStay.slug())
            };
            pages.push(country_page(path, country, StayKind::ShortStay));
        }

        for (slug, country) in LONG_STAY_PAGES {
            let path = country_page_path(slug, StayKind::LongStay.slug());
            pages.push(country_page(path, country, StayKind::LongStay));
        }

        Self { pages }
    }

    pub fn pages(&self) -> &[VisaPage] {
        &self.pages
    }

    pub fn pages_for(&self, stay_kind: StayKind) -> Vec<&VisaPage> {
        self.pages
            .iter()
            .filter(|page| page.stay_kind == stay_kind)
            .collect()
    }

    /// Look up a page by path, ignoring any query string.
    pub fn find(&self, path: &str) -> Option<&VisaPage> {
        let path = path.split('?').next().unwrap_or(path);
        self.pages.iter().find(|page| page.path == path)
    }
}

fn country_page(path: String, country: &str, stay_kind: StayKind) -> VisaPage {
    VisaPage {
        path,
        title: format!("{country} {}", stay_kind.label()),
        stay_kind,
        country: Some(country.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::visa::domain::DurationCategory;
    use crate::workflows::visa::routing::RouteTable;

    #[test]
    fn every_resolved_route_is_in_catalog() {
        let catalog = VisaPageCatalog::standard();
        let table = RouteTable::standard();
        let destinations = ["France", "Austria", "Atlantis", "Portugal", "Schengen Area", "Japan"];

        for destination in destinations {
            for duration in DurationCategory::ordered() {
                let path = table.resolve(destination, duration);
                assert!(
                    catalog.find(&path).is_some(),
                    "{path} missing from catalog"
                );
            }
        }
    }

    #[test]
    fn titles_name_the_country() {
        let catalog = VisaPageCatalog::standard();
        let page = catalog
            .find("/visas/france-long-stay")
            .expect("france long-stay page");
        assert_eq!(page.title, "France Long-Stay Visa");
        assert_eq!(page.country.as_deref(), Some("France"));
    }

    #[test]
    fn pages_split_by_stay_kind() {
        let catalog = VisaPageCatalog::standard();
        let long = catalog.pages_for(StayKind::LongStay);
        assert!(long.iter().all(|page| page.stay_kind == StayKind::LongStay));
        assert_eq!(long.len(), LONG_STAY_PAGES.len() + 1);
    }
}
