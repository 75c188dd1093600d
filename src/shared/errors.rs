use thiserror::Error;

use crate::domain::models::{CompanyId, MenuAudience};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Unknown module key for {audience:?}: {key}")]
    UnknownModuleKey { audience: MenuAudience, key: String },

    #[error("Company mismatch: query {query}, body {body}")]
    CompanyMismatch { query: CompanyId, body: CompanyId },

    #[error("Missing company_id")]
    MissingCompany,

    #[error("No tenant loaded")]
    NoTenant,

    #[error("Role {0} is not allowed to change module settings")]
    Forbidden(String),

    #[error("Role {0} has no module settings")]
    NoAudience(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
