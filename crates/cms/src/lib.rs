//! # Aquasite CMS
//!
//! Project repository accessor: fetches project records for one site
//! language from the headless CMS.
//!
//! ```text
//! ProjectSource (trait)
//!     ├─ GraphqlProjectSource  POST {query, variables} -> data.projects.nodes
//!     └─ FileProjectSource     saved export on disk
//!
//! load_projects(source, lang) -> ProjectLoad::{Loaded, Failed}
//! ```
//!
//! Every failure surfaces as a [`CmsError`]; an empty `Vec` always means the
//! CMS really has no projects in that language.

mod error;
mod file;
mod graphql;
mod query;
mod source;
mod wire;

pub use error::{CmsError, Result};
pub use file::FileProjectSource;
pub use graphql::{GraphqlConfig, GraphqlProjectSource};
pub use query::{GraphqlRequest, DEFAULT_PAGE_SIZE};
pub use source::{load_projects, ProjectLoad, ProjectSource};
