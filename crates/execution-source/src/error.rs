use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to reach the execution source: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The execution source returned an error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to deserialize the execution source response: {0}")]
    Deserialization(String),
}
