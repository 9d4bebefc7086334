use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Risk limit policy from configuration is invalid: {0}")]
    InvalidPolicy(String),
}
