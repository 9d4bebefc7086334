use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Invalid sector mapping: {0}")]
    InvalidMapping(String),
}
