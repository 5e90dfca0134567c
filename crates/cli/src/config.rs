//! Settings resolution: command-line flag, then environment (clap reads the
//! `AQUASITE_*` variables into the same flags), then `aquasite.toml`, then
//! built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context as AnyhowContext, Result};
use aquasite_cms::{
    FileProjectSource, GraphqlConfig, GraphqlProjectSource, ProjectSource, DEFAULT_PAGE_SIZE,
};
use aquasite_protocol::Language;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "aquasite.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub cms: CmsSection,
    #[serde(default)]
    pub site: SiteSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CmsSection {
    pub endpoint: Option<String>,
    pub auth_token: Option<String>,
    pub page_size: Option<u32>,
    /// Offline JSON export used instead of the live endpoint.
    pub export: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    pub language: Option<String>,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub auth_token: Option<String>,
    pub language: Option<String>,
    pub from_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceSetting {
    Graphql {
        endpoint: String,
        auth_token: Option<String>,
        page_size: u32,
    },
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub language: Language,
    pub source: SourceSetting,
}

impl Settings {
    pub fn build_source(&self) -> Result<Box<dyn ProjectSource>> {
        let source: Box<dyn ProjectSource> = match &self.source {
            SourceSetting::Graphql {
                endpoint,
                auth_token,
                page_size,
            } => {
                let config = GraphqlConfig::new(endpoint.clone())
                    .with_auth_token(auth_token.clone())
                    .with_page_size(*page_size);
                Box::new(GraphqlProjectSource::new(config).context("Invalid CMS settings")?)
            }
            SourceSetting::File(path) => Box::new(FileProjectSource::new(path.clone())),
        };
        log::debug!("Project source: {}", source.describe());
        Ok(source)
    }
}

/// Read the config file named by `--config`, or `aquasite.toml` in `cwd` when
/// present. An explicitly named file that is missing is an error.
pub fn load_file_config(explicit: Option<&Path>, cwd: &Path) -> Result<(FileConfig, PathBuf)> {
    let (path, required) = match explicit {
        Some(path) => (cwd.join(path), true),
        None => (cwd.join(DEFAULT_CONFIG_FILE), false),
    };

    if !path.exists() {
        if required {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok((FileConfig::default(), cwd.to_path_buf()));
    }

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: FileConfig =
        toml::from_str(&raw).with_context(|| format!("Invalid {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());

    let base = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf());
    Ok((config, base))
}

pub fn resolve(overrides: Overrides, cwd: &Path) -> Result<Settings> {
    let (file, base) = load_file_config(overrides.config.as_deref(), cwd)?;

    let language = overrides
        .language
        .or(file.site.language)
        .map(|raw| raw.parse::<Language>())
        .transpose()?
        .unwrap_or_default();

    let source = if let Some(path) = overrides.from_file {
        SourceSetting::File(cwd.join(path))
    } else if let Some(endpoint) = overrides.endpoint {
        SourceSetting::Graphql {
            endpoint,
            auth_token: overrides.auth_token.or(file.cms.auth_token),
            page_size: file.cms.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    } else if let Some(endpoint) = file.cms.endpoint {
        SourceSetting::Graphql {
            endpoint,
            auth_token: overrides.auth_token.or(file.cms.auth_token),
            page_size: file.cms.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    } else if let Some(export) = file.cms.export {
        SourceSetting::File(base.join(export))
    } else {
        anyhow::bail!(
            "No project source configured: pass --endpoint or --from-file, set AQUASITE_CMS_URL, \
             or add cms.endpoint to {DEFAULT_CONFIG_FILE}"
        );
    };

    Ok(Settings { language, source })
}
