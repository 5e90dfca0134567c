use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CmsError>;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("CMS request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("CMS responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("CMS query failed: {}", .0.join("; "))]
    Query(Vec<String>),

    #[error("CMS response carried no data")]
    MissingData,

    #[error("Invalid CMS response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid CMS endpoint: {0}")]
    InvalidEndpoint(String),
}
