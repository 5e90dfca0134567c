//! GraphQL documents sent to the CMS.

use aquasite_protocol::Language;
use serde::Serialize;
use serde_json::{json, Value};

/// Upper bound on projects requested in one listing query.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

const PROJECT_FIELDS: &str = r#"
fragment ProjectFields on Project {
  id
  slug
  title
  excerpt
  featuredImage {
    node {
      sourceUrl
      altText
    }
  }
  projectDetails {
    status
    systemType
    species
    location
    capex
    capexCurrency
    revenue
    revenueCurrency
    roi
    annualProduction
    productionUnit
  }
}
"#;

const PROJECTS_QUERY: &str = r#"
query Projects($language: LanguageCodeFilterEnum!, $first: Int!) {
  projects(first: $first, where: { language: $language }) {
    nodes {
      ...ProjectFields
    }
  }
}
"#;

const PROJECT_BY_SLUG_QUERY: &str = r#"
query ProjectBySlug($language: LanguageCodeFilterEnum!, $slug: String!) {
  projects(first: 1, where: { language: $language, name: $slug }) {
    nodes {
      ...ProjectFields
    }
  }
}
"#;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub query: String,
    pub operation_name: &'static str,
    pub variables: Value,
}

impl GraphqlRequest {
    pub fn projects(lang: Language, first: u32) -> Self {
        Self {
            query: format!("{PROJECTS_QUERY}{PROJECT_FIELDS}"),
            operation_name: "Projects",
            variables: json!({ "language": lang.cms_code(), "first": first }),
        }
    }

    pub fn project_by_slug(lang: Language, slug: &str) -> Self {
        Self {
            query: format!("{PROJECT_BY_SLUG_QUERY}{PROJECT_FIELDS}"),
            operation_name: "ProjectBySlug",
            variables: json!({ "language": lang.cms_code(), "slug": slug }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_request_carries_language_and_page_size() {
        let request = GraphqlRequest::projects(Language::Uk, 25);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["operationName"], "Projects");
        assert_eq!(body["variables"]["language"], "UK");
        assert_eq!(body["variables"]["first"], 25);
        assert!(body["query"].as_str().unwrap().contains("fragment ProjectFields"));
    }

    #[test]
    fn slug_request_filters_by_name() {
        let request = GraphqlRequest::project_by_slug(Language::En, "lagos-ras");
        assert_eq!(request.variables["slug"], "lagos-ras");
        assert!(request.query.contains("name: $slug"));
    }
}
