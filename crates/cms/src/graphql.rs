use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use aquasite_protocol::{Language, ProjectRecord};

use crate::error::{CmsError, Result};
use crate::query::{GraphqlRequest, DEFAULT_PAGE_SIZE};
use crate::source::ProjectSource;
use crate::wire::{GraphqlResponse, ProjectsData};

/// Connection settings for the CMS GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlConfig {
    pub endpoint: String,
    pub auth_token: Option<String>,
    pub page_size: u32,
}

impl GraphqlConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth_token: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

/// [`ProjectSource`] backed by the CMS GraphQL API.
pub struct GraphqlProjectSource {
    client: Client,
    endpoint: Url,
    page_size: u32,
}

impl GraphqlProjectSource {
    pub fn new(config: GraphqlConfig) -> Result<Self> {
        let endpoint = Url::parse(config.endpoint.trim())
            .map_err(|err| CmsError::InvalidEndpoint(format!("{}: {err}", config.endpoint)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(CmsError::InvalidEndpoint(format!(
                "{}: expected http or https",
                config.endpoint
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.auth_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| CmsError::InvalidEndpoint("auth token is not a valid header".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(concat!("aquasite/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            page_size: config.page_size,
        })
    }

    async fn execute<T: DeserializeOwned>(&self, request: &GraphqlRequest) -> Result<T> {
        log::debug!(
            "POST {} operation={} variables={}",
            self.endpoint,
            request.operation_name,
            request.variables
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CmsError::Status {
                status: status.as_u16(),
                body: truncate(&body, 512),
            });
        }

        let envelope: GraphqlResponse<T> = serde_json::from_str(&body)?;
        envelope.into_data()
    }
}

#[async_trait]
impl ProjectSource for GraphqlProjectSource {
    async fn fetch_projects(&self, lang: Language) -> Result<Vec<ProjectRecord>> {
        let request = GraphqlRequest::projects(lang, self.page_size);
        let data: ProjectsData = self.execute(&request).await?;
        let records = data.into_records();
        if records.len() as u32 >= self.page_size {
            log::warn!(
                "CMS returned {} projects, the configured page size; later entries may be missing",
                records.len()
            );
        }
        Ok(records)
    }

    async fn fetch_project(&self, lang: Language, slug: &str) -> Result<Option<ProjectRecord>> {
        let request = GraphqlRequest::project_by_slug(lang, slug);
        let data: ProjectsData = self.execute(&request).await?;
        Ok(data
            .into_records()
            .into_iter()
            .find(|project| project.slug == slug))
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push('…');
    }
    out
}
