use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::HashMap;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub execution_source: ExecutionSourceConfig,
    pub risk_limits: RiskLimits,
    /// Optional symbol -> sector overrides merged over the built-in table.
    #[serde(default)]
    pub sectors: HashMap<String, String>,
}

/// A key/secret pair for one execution-source environment.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeys {
    pub key: String,
    pub secret: String,
}

/// Connection parameters for the execution source.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionSourceConfig {
    /// When true, target the live brokerage endpoint; otherwise paper trading.
    pub live_mode: bool,
    /// Upper bound on any single request to the source, in seconds.
    /// On timeout the engine substitutes the fallback snapshot.
    pub timeout_secs: u64,
    pub paper: ApiKeys,
    pub production: ApiKeys,
}

/// The risk-limit policy enforced by the pre-trade gate.
///
/// This is external, read-only configuration: the engine consults it on
/// every `check_risk_limits` call and never mutates it.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskLimits {
    /// Largest allowed notional value of a single order, in account currency.
    pub max_position_size: Decimal,
    /// Ceiling on (positions value + order value) / portfolio value.
    pub max_portfolio_risk: Decimal,
    /// Ceiling on the fraction of portfolio value a single position may risk.
    /// Reserved by the policy; not evaluated by the current gate.
    pub max_position_risk: Decimal,
    /// Largest tolerated one-day loss, in account currency.
    /// Reserved by the policy; not evaluated by the current gate.
    pub max_daily_loss: Decimal,
    /// Maximum tolerated drawdown fraction.
    /// Reserved by the policy; not evaluated by the current gate.
    pub max_drawdown: Decimal,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_position_size: dec!(10000),
            max_portfolio_risk: dec!(0.02),
            max_position_risk: dec!(0.01),
            max_daily_loss: dec!(1000),
            max_drawdown: dec!(0.15),
        }
    }
}
