//! # Aquasite Search
//!
//! Facet derivation and filtering for the projects listing.
//!
//! ```text
//! Arc<[ProjectRecord]>  (immutable snapshot, fetched once per page)
//!     │
//!     ├──> Facets (derived once, cached)
//!     │      ├─ species: split speciesText on , ; & /
//!     │      └─ regions: last comma segment of location
//!     │
//!     └──> apply(&FilterSelection) -> FilterOutcome
//!            ├─ status / system type: exact, any element
//!            ├─ species / region: case-insensitive substring
//!            └─ AND across active facets, original order kept
//! ```
//!
//! Nothing here fails: missing optional fields are handled by exclusion and an
//! empty outcome is an ordinary state.

mod facets;
mod filter;
mod selection;

pub use facets::{region_facet, species_facet, Facets};
pub use filter::{matches, FilterOutcome, ProjectFilter};
pub use selection::{FilterSelection, Selection, ALL, ALL_REGIONS, ALL_SPECIES};
