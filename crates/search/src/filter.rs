use std::sync::Arc;

use aquasite_protocol::ProjectRecord;
use once_cell::sync::OnceCell;

use crate::facets::Facets;
use crate::selection::{FilterSelection, Selection};

/// Compound-AND predicate: a record passes only if it satisfies every active
/// facet. A record missing the field an active facet inspects fails it.
pub fn matches(record: &ProjectRecord, selection: &FilterSelection) -> bool {
    if let Selection::Only(status) = selection.status {
        if !record.has_status(status) {
            return false;
        }
    }

    if let Selection::Only(system_type) = selection.system_type {
        if !record.has_system_type(system_type) {
            return false;
        }
    }

    if let Selection::Only(species) = &selection.species {
        if !contains_ignore_case(record.species_text.as_deref(), species) {
            return false;
        }
    }

    if let Selection::Only(region) = &selection.region {
        if !contains_ignore_case(record.location.as_deref(), region) {
            return false;
        }
    }

    true
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase()))
}

/// Filter engine over one immutable snapshot of the project collection.
///
/// The snapshot is never mutated; every [`apply`](Self::apply) recomputes
/// from the full collection, so results depend only on the snapshot and the
/// selection passed in.
#[derive(Debug, Clone)]
pub struct ProjectFilter {
    projects: Arc<[ProjectRecord]>,
    facets: OnceCell<Facets>,
}

impl ProjectFilter {
    pub fn new(projects: impl Into<Arc<[ProjectRecord]>>) -> Self {
        let projects = projects.into();
        log::debug!("Project filter over {} records", projects.len());
        Self {
            projects,
            facets: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Facet values, derived on first use.
    pub fn facets(&self) -> &Facets {
        self.facets.get_or_init(|| Facets::derive(&self.projects))
    }

    pub fn apply(&self, selection: &FilterSelection) -> FilterOutcome<'_> {
        let matches: Vec<&ProjectRecord> = self
            .projects
            .iter()
            .filter(|record| matches(record, selection))
            .collect();
        log::debug!(
            "Filter [{selection}] matched {}/{}",
            matches.len(),
            self.projects.len()
        );
        FilterOutcome {
            matches,
            total: self.projects.len(),
            filtered: !selection.is_reset(),
        }
    }

    /// Result with every control on its sentinel: the full collection.
    pub fn reset(&self) -> FilterOutcome<'_> {
        self.apply(&FilterSelection::default())
    }
}

/// Records that passed the active filters, in collection order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome<'a> {
    matches: Vec<&'a ProjectRecord>,
    total: usize,
    filtered: bool,
}

impl<'a> FilterOutcome<'a> {
    #[must_use]
    pub fn matches(&self) -> &[&'a ProjectRecord] {
        &self.matches
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Zero matches. Not an error: the caller shows the empty state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Size of the unfiltered collection.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// The empty state should offer a reset: nothing matched, yet clearing the
    /// filters would bring records back.
    #[must_use]
    pub fn reset_offered(&self) -> bool {
        self.is_empty() && self.filtered && self.total > 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ProjectRecord> + '_ {
        self.matches.iter().copied()
    }
}
