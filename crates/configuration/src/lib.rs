use rust_decimal::Decimal;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{ApiKeys, Config, ExecutionSourceConfig, RiskLimits};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, layers any `MERIDIAN_`-prefixed environment variables
/// on top (so API keys can live in a `.env` file instead of the repo), and
/// deserializes the result into our strongly-typed `Config` struct.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        // Environment overrides, e.g. MERIDIAN_EXECUTION_SOURCE__PAPER__KEY.
        .add_source(config::Environment::with_prefix("MERIDIAN").separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    validate(&config)?;

    Ok(config)
}

/// Rejects limit values the gate could never enforce sensibly.
fn validate(config: &Config) -> Result<(), ConfigError> {
    let limits = &config.risk_limits;
    if limits.max_position_size <= Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "risk_limits.max_position_size must be positive".to_string(),
        ));
    }
    if limits.max_portfolio_risk <= Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "risk_limits.max_portfolio_risk must be positive".to_string(),
        ));
    }
    if config.execution_source.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "execution_source.timeout_secs must be at least 1".to_string(),
        ));
    }
    Ok(())
}
