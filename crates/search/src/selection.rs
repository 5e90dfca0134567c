use std::fmt;

use aquasite_protocol::{ProjectStatus, ProtocolError, SystemType};
use serde::{Serialize, Serializer};

/// Sentinel shown in the status and system-type controls.
pub const ALL: &str = "All";
pub const ALL_SPECIES: &str = "All Species";
pub const ALL_REGIONS: &str = "All Regions";

/// One facet control: either unrestricted or pinned to a single value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> Selection<T> {
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    #[must_use]
    pub fn as_only(&self) -> Option<&T> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

/// Each control accepts only its own sentinel word, plus blank input.
fn is_sentinel(raw: &str, sentinel: &str) -> bool {
    raw.is_empty() || raw == sentinel
}

impl Selection<ProjectStatus> {
    /// "All" (or blank) selects everything; anything else must be an exact
    /// status label.
    pub fn parse_status(raw: &str) -> Result<Self, ProtocolError> {
        let raw = raw.trim();
        if is_sentinel(raw, ALL) {
            return Ok(Self::All);
        }
        raw.parse().map(Self::Only)
    }
}

impl Selection<SystemType> {
    pub fn parse_system_type(raw: &str) -> Result<Self, ProtocolError> {
        let raw = raw.trim();
        if is_sentinel(raw, ALL) {
            return Ok(Self::All);
        }
        raw.parse().map(Self::Only)
    }
}

impl Selection<String> {
    #[must_use]
    pub fn parse_species(raw: &str) -> Self {
        Self::free_text(raw, ALL_SPECIES)
    }

    #[must_use]
    pub fn parse_region(raw: &str) -> Self {
        Self::free_text(raw, ALL_REGIONS)
    }

    fn free_text(raw: &str, sentinel: &str) -> Self {
        let raw = raw.trim();
        if is_sentinel(raw, sentinel) {
            Self::All
        } else {
            Self::Only(raw.to_string())
        }
    }
}

/// The four independent facet selections of the projects listing.
///
/// Immutable value: every `with_*` call returns a new selection, so callers
/// hold it as plain owned state and pass it by reference into the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSelection {
    pub status: Selection<ProjectStatus>,
    pub system_type: Selection<SystemType>,
    pub species: Selection<String>,
    pub region: Selection<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_status(self, status: impl Into<Selection<ProjectStatus>>) -> Self {
        Self {
            status: status.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_system_type(self, system_type: impl Into<Selection<SystemType>>) -> Self {
        Self {
            system_type: system_type.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_species(self, species: &str) -> Self {
        Self {
            species: Selection::parse_species(species),
            ..self
        }
    }

    #[must_use]
    pub fn with_region(self, region: &str) -> Self {
        Self {
            region: Selection::parse_region(region),
            ..self
        }
    }

    /// Put all four controls back on their "All" sentinels at once.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_reset(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of facets currently restricting the listing.
    #[must_use]
    pub fn active_count(&self) -> usize {
        [
            self.status.is_all(),
            self.system_type.is_all(),
            self.species.is_all(),
            self.region.is_all(),
        ]
        .into_iter()
        .filter(|all| !all)
        .count()
    }
}

impl From<ProjectStatus> for Selection<ProjectStatus> {
    fn from(value: ProjectStatus) -> Self {
        Self::Only(value)
    }
}

impl From<SystemType> for Selection<SystemType> {
    fn from(value: SystemType) -> Self {
        Self::Only(value)
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (status, system_type, species, region) = self.control_values();
        write!(
            f,
            "status={status}, system_type={system_type}, species={species}, region={region}"
        )
    }
}

impl FilterSelection {
    /// Current value of each control as the listing shows it, sentinels
    /// included.
    #[must_use]
    pub fn control_values(&self) -> (&str, &str, &str, &str) {
        (
            self.status.as_only().map_or(ALL, |s| s.as_str()),
            self.system_type.as_only().map_or(ALL, |s| s.as_str()),
            self.species.as_only().map_or(ALL_SPECIES, String::as_str),
            self.region.as_only().map_or(ALL_REGIONS, String::as_str),
        )
    }
}

impl Serialize for FilterSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let (status, system_type, species, region) = self.control_values();
        let mut state = serializer.serialize_struct("FilterSelection", 4)?;
        state.serialize_field("status", status)?;
        state.serialize_field("systemType", system_type)?;
        state.serialize_field("species", species)?;
        state.serialize_field("region", region)?;
        state.end()
    }
}
