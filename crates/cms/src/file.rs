use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use aquasite_protocol::{Language, ProjectRecord};

use crate::error::{CmsError, Result};
use crate::source::ProjectSource;
use crate::wire::{GraphqlResponse, ProjectsData};

/// [`ProjectSource`] reading a JSON export from disk.
///
/// Accepted layouts:
/// - a saved GraphQL response (`{"data": {"projects": {"nodes": [...]}}}`),
/// - a bare array of project records,
/// - an object keyed by language code (`{"en": [...], "uk": [...]}`) whose
///   values are either of the above. Keys are matched case-insensitively and
///   any key that is not a language code makes the export invalid.
///
/// The file is re-read on every fetch, matching the no-cache contract of the
/// live source.
#[derive(Debug, Clone)]
pub struct FileProjectSource {
    path: PathBuf,
}

impl FileProjectSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProjectSource for FileProjectSource {
    async fn fetch_projects(&self, lang: Language) -> Result<Vec<ProjectRecord>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CmsError::Io {
                path: self.path.clone(),
                source,
            })?;
        let value: Value = serde_json::from_str(&raw)?;
        parse_export(value, lang)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub(crate) fn parse_export(value: Value, lang: Language) -> Result<Vec<ProjectRecord>> {
    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }

    let Value::Object(map) = value else {
        return Err(invalid_export("project export must be a JSON array or object"));
    };

    if map.contains_key("data") || map.contains_key("errors") {
        let envelope: GraphqlResponse<ProjectsData> = serde_json::from_value(Value::Object(map))?;
        return Ok(envelope.into_data()?.into_records());
    }

    let mut wanted = None;
    for (key, section) in map {
        let section_lang: Language = key.parse().map_err(|_| {
            invalid_export(format!("unexpected key `{key}` in project export"))
        })?;
        if section_lang == lang && wanted.is_none() {
            wanted = Some(section);
        }
    }

    match wanted {
        Some(section) => parse_export(section, lang),
        None => {
            log::debug!("Export has no section for {lang}");
            Ok(Vec::new())
        }
    }
}

fn invalid_export(message: impl std::fmt::Display) -> CmsError {
    CmsError::Decode(serde::de::Error::custom(message))
}
