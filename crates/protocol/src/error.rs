use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProtocolError>;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Unknown language code: {0} (expected en or uk)")]
    UnknownLanguage(String),

    #[error("Unknown project status: {0}")]
    UnknownStatus(String),

    #[error("Unknown system type: {0}")]
    UnknownSystemType(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
