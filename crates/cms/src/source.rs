use async_trait::async_trait;

use aquasite_protocol::{Language, ProjectRecord};

use crate::error::Result;

/// Where project records come from.
///
/// One call, one answer: implementations do not retry, cache or stream.
/// A failure is always an `Err`, never an empty collection.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// All projects published in `lang`, in the order the source returns them.
    ///
    /// Sources that page their results return only the first page. The GraphQL
    /// source asks for `page_size` records in a single query, so a listing of
    /// exactly `page_size` records may be truncated.
    async fn fetch_projects(&self, lang: Language) -> Result<Vec<ProjectRecord>>;

    /// A single case study by slug. `Ok(None)` when no project in `lang`
    /// carries that slug.
    async fn fetch_project(&self, lang: Language, slug: &str) -> Result<Option<ProjectRecord>> {
        let projects = self.fetch_projects(lang).await?;
        Ok(projects.into_iter().find(|project| project.slug == slug))
    }

    /// Short label for log lines.
    fn describe(&self) -> String;
}

/// Outcome of loading the listing for one page view.
///
/// Keeps "the CMS could not be reached" apart from "the CMS has no projects"
/// so the page never renders a failed load as an empty listing.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectLoad {
    Loaded(Vec<ProjectRecord>),
    Failed { reason: String },
}

impl ProjectLoad {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    #[must_use]
    pub fn projects(&self) -> Option<&[ProjectRecord]> {
        match self {
            Self::Loaded(projects) => Some(projects),
            Self::Failed { .. } => None,
        }
    }
}

/// Fetch the listing and fold the result into a [`ProjectLoad`].
pub async fn load_projects(source: &dyn ProjectSource, lang: Language) -> ProjectLoad {
    match source.fetch_projects(lang).await {
        Ok(projects) => {
            log::info!(
                "Loaded {} project(s) for {lang} from {}",
                projects.len(),
                source.describe()
            );
            ProjectLoad::Loaded(projects)
        }
        Err(err) => {
            log::error!("Failed to load projects for {lang} from {}: {err}", source.describe());
            ProjectLoad::Failed {
                reason: err.to_string(),
            }
        }
    }
}
