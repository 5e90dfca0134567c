use std::collections::BTreeSet;

use aquasite_protocol::{ProjectRecord, ProjectStatus, SystemType};
use serde::Serialize;

/// Selectable values for every facet control.
///
/// Species and regions come from the data; statuses and system types are the
/// fixed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub statuses: Vec<ProjectStatus>,
    pub system_types: Vec<SystemType>,
    pub species: Vec<String>,
    pub regions: Vec<String>,
}

impl Facets {
    pub fn derive(projects: &[ProjectRecord]) -> Self {
        Self {
            statuses: ProjectStatus::ALL.to_vec(),
            system_types: SystemType::ALL.to_vec(),
            species: species_facet(projects),
            regions: region_facet(projects),
        }
    }
}

/// Distinct species tokens across all records, sorted ascending.
/// Case-sensitive: "Shrimp" and "shrimp" are two entries.
pub fn species_facet(projects: &[ProjectRecord]) -> Vec<String> {
    projects
        .iter()
        .flat_map(ProjectRecord::species)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct countries (last segment of each location), sorted ascending.
pub fn region_facet(projects: &[ProjectRecord]) -> Vec<String> {
    projects
        .iter()
        .filter_map(ProjectRecord::country)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
