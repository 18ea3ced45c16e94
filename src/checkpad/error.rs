use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckpadError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Source error: {0}")]
    Source(String),

    #[error("{0}")]
    Validation(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, CheckpadError>;
