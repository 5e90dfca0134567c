//! # Aquasite Protocol
//!
//! Shared vocabulary of the Aquasite content layer: project records as the
//! CMS publishes them, the two site languages, and the bilingual labels the
//! listing shows next to them.

mod error;
mod language;
mod project;

pub mod labels;
pub mod lenient;

pub use error::{ProtocolError, Result};
pub use language::Language;
pub use project::{
    Amount, HeroImage, ProjectFigures, ProjectRecord, ProjectStatus, Quantity, SystemType,
    SPECIES_DELIMITERS,
};

use serde::Serialize;

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}
