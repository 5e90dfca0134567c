//! Response shapes as the CMS sends them, and their conversion into
//! [`ProjectRecord`]s. Shape quirks end here.

use aquasite_protocol::lenient::{lenient_number, non_blank_string, one_or_many};
use aquasite_protocol::{
    Amount, HeroImage, ProjectFigures, ProjectRecord, ProjectStatus, Quantity, SystemType,
};
use serde::Deserialize;

use crate::error::{CmsError, Result};

#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlError {
    pub message: String,
}

impl<T> GraphqlResponse<T> {
    /// Any reported error fails the whole request; there are no partial results.
    pub fn into_data(self) -> Result<T> {
        if !self.errors.is_empty() {
            let messages: Vec<String> = self.errors.into_iter().map(|e| e.message).collect();
            log::warn!("CMS returned {} GraphQL error(s)", messages.len());
            return Err(CmsError::Query(messages));
        }
        self.data.ok_or(CmsError::MissingData)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectsData {
    pub projects: Option<ProjectConnection>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProjectConnection {
    #[serde(default)]
    pub nodes: Vec<ProjectNode>,
}

impl ProjectsData {
    pub fn into_records(self) -> Vec<ProjectRecord> {
        self.projects
            .unwrap_or_default()
            .nodes
            .into_iter()
            .filter_map(ProjectNode::into_record)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectNode {
    #[serde(default, deserialize_with = "non_blank_string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "non_blank_string")]
    slug: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    excerpt: Option<String>,
    #[serde(default)]
    featured_image: Option<FeaturedImage>,
    #[serde(default)]
    project_details: Option<ProjectDetails>,
}

#[derive(Debug, Deserialize)]
struct FeaturedImage {
    node: Option<MediaItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MediaItem {
    #[serde(default, deserialize_with = "non_blank_string")]
    source_url: Option<String>,
    #[serde(default)]
    alt_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDetails {
    #[serde(default, deserialize_with = "one_or_many")]
    status: Vec<ProjectStatus>,
    #[serde(default, deserialize_with = "one_or_many")]
    system_type: Vec<SystemType>,
    #[serde(default, deserialize_with = "non_blank_string")]
    species: Option<String>,
    #[serde(default, deserialize_with = "non_blank_string")]
    location: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    capex: Option<f64>,
    #[serde(default, deserialize_with = "non_blank_string")]
    capex_currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    revenue: Option<f64>,
    #[serde(default, deserialize_with = "non_blank_string")]
    revenue_currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    roi: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    annual_production: Option<f64>,
    #[serde(default, deserialize_with = "non_blank_string")]
    production_unit: Option<String>,
}

impl ProjectNode {
    /// Nodes without an id or slug cannot be linked to and are skipped.
    pub fn into_record(self) -> Option<ProjectRecord> {
        let (Some(id), Some(slug)) = (self.id, self.slug) else {
            log::warn!("Skipping CMS project without id or slug");
            return None;
        };

        let details = self.project_details.unwrap_or_default();
        let hero_image = self
            .featured_image
            .and_then(|image| image.node)
            .and_then(|media| {
                media.source_url.map(|url| HeroImage {
                    url,
                    alt: media.alt_text.unwrap_or_default(),
                })
            });

        Some(ProjectRecord {
            id,
            slug,
            title: self.title.unwrap_or_default(),
            excerpt: self.excerpt.unwrap_or_default(),
            hero_image,
            status: details.status,
            system_type: details.system_type,
            species_text: details.species,
            location: details.location,
            figures: ProjectFigures {
                capex: details.capex.map(|value| Amount {
                    value,
                    currency: details.capex_currency,
                }),
                revenue: details.revenue.map(|value| Amount {
                    value,
                    currency: details.revenue_currency,
                }),
                roi_percent: details.roi,
                annual_production: details.annual_production.map(|value| Quantity {
                    value,
                    unit: details.production_unit,
                }),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn decode(body: serde_json::Value) -> Result<Vec<ProjectRecord>> {
        let response: GraphqlResponse<ProjectsData> = serde_json::from_value(body)?;
        Ok(response.into_data()?.into_records())
    }

    #[test]
    fn maps_full_node() {
        let records = decode(json!({
            "data": { "projects": { "nodes": [{
                "id": "cG9zdDoxMg==",
                "slug": "lagos-ras",
                "title": "Lagos RAS Farm",
                "excerpt": "<p>Tilapia hatchery</p>",
                "featuredImage": { "node": { "sourceUrl": "https://cms.example/lagos.jpg", "altText": "Tanks" } },
                "projectDetails": {
                    "status": ["Operational"],
                    "systemType": "RAS",
                    "species": "Tilapia, Shrimp",
                    "location": "Lagos, Nigeria",
                    "capex": "1,200,000",
                    "capexCurrency": "USD",
                    "revenue": 850000,
                    "revenueCurrency": "",
                    "roi": 18.5,
                    "annualProduction": "500",
                    "productionUnit": "t/year"
                }
            }]}}
        }))
        .unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.slug, "lagos-ras");
        assert_eq!(record.status, vec![ProjectStatus::Operational]);
        assert_eq!(record.system_type, vec![SystemType::Ras]);
        assert_eq!(record.country(), Some("Nigeria"));
        assert_eq!(
            record.hero_image,
            Some(HeroImage {
                url: "https://cms.example/lagos.jpg".into(),
                alt: "Tanks".into()
            })
        );
        assert_eq!(
            record.figures.capex,
            Some(Amount {
                value: 1_200_000.0,
                currency: Some("USD".into())
            })
        );
        assert_eq!(
            record.figures.revenue,
            Some(Amount {
                value: 850_000.0,
                currency: None
            })
        );
        assert_eq!(record.figures.roi_percent, Some(18.5));
        assert_eq!(
            record.figures.annual_production,
            Some(Quantity {
                value: 500.0,
                unit: Some("t/year".into())
            })
        );
    }

    #[test]
    fn tolerates_missing_details_and_skips_nodes_without_identity() {
        let records = decode(json!({
            "data": { "projects": { "nodes": [
                { "id": "1", "slug": "bare", "title": "Bare", "projectDetails": null },
                { "id": "2", "slug": "", "title": "No slug" },
                { "slug": "no-id", "title": "No id" }
            ]}}
        }))
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].slug, "bare");
        assert!(records[0].status.is_empty());
        assert!(records[0].figures.is_empty());
        assert_eq!(records[0].hero_image, None);
    }

    #[test]
    fn null_connection_is_an_empty_listing() {
        let records = decode(json!({ "data": { "projects": null } })).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn graphql_errors_fail_the_request() {
        let err = decode(json!({
            "data": null,
            "errors": [{ "message": "Cannot query field \"projectDetails\"" }, { "message": "second" }]
        }))
        .unwrap_err();
        match err {
            CmsError::Query(messages) => assert_eq!(messages.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_data_is_distinct_from_empty() {
        let err = decode(json!({})).unwrap_err();
        assert!(matches!(err, CmsError::MissingData));
    }
}
