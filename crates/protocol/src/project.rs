use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::lenient::{non_blank_string, one_or_many};

/// Delimiters that separate species inside the free-text species field.
pub const SPECIES_DELIMITERS: [char; 4] = [',', ';', '&', '/'];

/// Lifecycle stage of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectStatus {
    Planning,
    Design,
    Construction,
    Operational,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 5] = [
        Self::Planning,
        Self::Design,
        Self::Construction,
        Self::Operational,
        Self::Completed,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Design => "Design",
            Self::Construction => "Construction",
            Self::Operational => "Operational",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownStatus(s.to_string()))
    }
}

/// Aquaculture production system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SystemType {
    #[serde(rename = "RAS")]
    Ras,
    Biofloc,
    Hybrid,
    #[serde(rename = "Flow-through")]
    FlowThrough,
    #[serde(rename = "IMTA")]
    Imta,
    Other,
}

impl SystemType {
    pub const ALL: [SystemType; 6] = [
        Self::Ras,
        Self::Biofloc,
        Self::Hybrid,
        Self::FlowThrough,
        Self::Imta,
        Self::Other,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ras => "RAS",
            Self::Biofloc => "Biofloc",
            Self::Hybrid => "Hybrid",
            Self::FlowThrough => "Flow-through",
            Self::Imta => "IMTA",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemType {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|system| system.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownSystemType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

/// Monetary value with an optional ISO currency tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Physical quantity with an optional unit tag ("t/year").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Financial and technical figures. Display only; never used for filtering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFigures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capex: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_production: Option<Quantity>,
}

impl ProjectFigures {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.capex.is_none()
            && self.revenue.is_none()
            && self.roi_percent.is_none()
            && self.annual_production.is_none()
    }
}

/// A single case-study entry as published by the CMS.
///
/// Records are read-only snapshots: nothing in the workspace mutates one
/// after it has been fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<HeroImage>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub status: Vec<ProjectStatus>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub system_type: Vec<SystemType>,
    #[serde(
        default,
        deserialize_with = "non_blank_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub species_text: Option<String>,
    #[serde(
        default,
        deserialize_with = "non_blank_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "ProjectFigures::is_empty")]
    pub figures: ProjectFigures,
}

impl ProjectRecord {
    /// Minimal record with only identity and title; classification empty.
    pub fn new(id: impl Into<String>, slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
            excerpt: String::new(),
            hero_image: None,
            status: Vec::new(),
            system_type: Vec::new(),
            species_text: None,
            location: None,
            figures: ProjectFigures::default(),
        }
    }

    #[must_use]
    pub fn has_status(&self, status: ProjectStatus) -> bool {
        self.status.contains(&status)
    }

    #[must_use]
    pub fn has_system_type(&self, system: SystemType) -> bool {
        self.system_type.contains(&system)
    }

    /// Individual species named in the free-text species field, trimmed, in
    /// the order written. Case is preserved.
    pub fn species(&self) -> impl Iterator<Item = &str> {
        self.species_text
            .as_deref()
            .unwrap_or_default()
            .split(SPECIES_DELIMITERS)
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Country part of "City, Region, Country": the last non-empty
    /// comma-separated segment.
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.location
            .as_deref()?
            .split(',')
            .map(str::trim)
            .rev()
            .find(|segment| !segment.is_empty())
    }

    /// Excerpt with markup removed, entities decoded and whitespace collapsed.
    #[must_use]
    pub fn plain_excerpt(&self) -> String {
        strip_html(&self.excerpt)
    }
}

fn strip_html(input: &str) -> String {
    let mut text = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&#8217;", "\u{2019}")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn labels_round_trip_through_from_str() {
        for status in ProjectStatus::ALL {
            assert_eq!(status.as_str().parse::<ProjectStatus>().unwrap(), status);
        }
        for system in SystemType::ALL {
            assert_eq!(system.as_str().parse::<SystemType>().unwrap(), system);
        }
        assert!("operational".parse::<ProjectStatus>().is_err());
        assert!("Flow through".parse::<SystemType>().is_err());
    }

    #[test]
    fn record_accepts_both_select_shapes() {
        let bare: ProjectRecord = serde_json::from_value(json!({
            "id": "1", "slug": "a", "title": "A",
            "status": "Operational", "systemType": "RAS"
        }))
        .unwrap();
        let wrapped: ProjectRecord = serde_json::from_value(json!({
            "id": "1", "slug": "a", "title": "A",
            "status": ["Operational"], "systemType": ["RAS"]
        }))
        .unwrap();
        assert_eq!(bare, wrapped);
        assert!(bare.has_status(ProjectStatus::Operational));
        assert!(bare.has_system_type(SystemType::Ras));
    }

    #[test]
    fn missing_optional_fields_default_to_absent() {
        let record: ProjectRecord = serde_json::from_value(json!({
            "id": "1", "slug": "a", "title": "A",
            "location": "   ", "speciesText": null
        }))
        .unwrap();
        assert!(record.status.is_empty());
        assert_eq!(record.location, None);
        assert_eq!(record.species_text, None);
        assert_eq!(record.country(), None);
        assert_eq!(record.species().count(), 0);
    }

    #[test]
    fn species_split_on_every_delimiter() {
        let mut record = ProjectRecord::new("1", "a", "A");
        record.species_text = Some("Tilapia, Shrimp; Trout & Sturgeon / Carp,,".into());
        let species: Vec<&str> = record.species().collect();
        assert_eq!(species, vec!["Tilapia", "Shrimp", "Trout", "Sturgeon", "Carp"]);
    }

    #[test]
    fn country_is_last_non_empty_segment() {
        let mut record = ProjectRecord::new("1", "a", "A");
        record.location = Some("Odesa, Odesa Oblast, Ukraine".into());
        assert_eq!(record.country(), Some("Ukraine"));

        record.location = Some("Lagos, Nigeria, ".into());
        assert_eq!(record.country(), Some("Nigeria"));

        record.location = Some("Vietnam".into());
        assert_eq!(record.country(), Some("Vietnam"));
    }

    #[test]
    fn plain_excerpt_strips_markup() {
        let mut record = ProjectRecord::new("1", "a", "A");
        record.excerpt = "<p>RAS farm for&nbsp;tilapia &amp; shrimp</p>\n<p>Phase&#39;2</p>".into();
        assert_eq!(record.plain_excerpt(), "RAS farm for tilapia & shrimp Phase'2");
    }

    #[test]
    fn empty_figures_are_not_serialized() {
        let record = ProjectRecord::new("1", "a", "A");
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("figures").is_none());
        assert_eq!(value["systemType"], json!([]));
    }
}
