use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The aggregate account/position view derived on every call.
///
/// `day_pl` is currently identical to `total_pl`: the engine receives no
/// day-boundary information, so intraday and total P/L coincide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub account_value: Decimal,
    pub buying_power: Decimal,
    pub cash: Decimal,
    pub positions_value: Decimal,
    pub total_pl: Decimal,
    /// Total P/L as a percentage of the previous close's equity; zero when
    /// that base is zero or negative.
    pub total_pl_percent: Decimal,
    pub day_pl: Decimal,
    pub positions_count: usize,
    pub margin_used: Decimal,
    pub margin_available: Decimal,
}

/// Market value held per instrument class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AssetTypeExposure {
    pub stocks: Decimal,
    pub options: Decimal,
    pub futures: Decimal,
    pub crypto: Decimal,
}

/// Exposure and concentration analytics.
///
/// `beta`, `sharpe_ratio` and `sortino_ratio` are placeholder constants:
/// real estimates need a historical return series this engine does not
/// receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAnalytics {
    pub exposure_by_sector: HashMap<String, Decimal>,
    pub exposure_by_asset_type: AssetTypeExposure,
    /// Percentage of total position value held in the single largest
    /// position; zero for an empty book.
    pub concentration_risk: Decimal,
    pub beta: Decimal,
    pub sharpe_ratio: Decimal,
    pub sortino_ratio: Decimal,
}

/// Portfolio risk metrics.
///
/// `var_95`/`var_99` come from the cross-sectional percentile proxy (see
/// `metrics::value_at_risk`), and `expected_shortfall` is a fixed multiple
/// of `var_99`. `max_drawdown` and `volatility` are placeholder constants
/// pending historical data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub portfolio_value: Decimal,
    /// Cash as a percentage of portfolio value; 100 when the portfolio value
    /// is zero or negative.
    pub cash_percent: Decimal,
    /// (portfolio value - cash) / portfolio value; zero when the portfolio
    /// value is zero or negative.
    pub leverage: Decimal,
    pub var_95: Decimal,
    pub var_99: Decimal,
    pub expected_shortfall: Decimal,
    pub max_drawdown: Decimal,
    pub volatility: Decimal,
    pub beta: Decimal,
}

/// Aggregated option sensitivities across the book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GreeksReport {
    pub delta: Decimal,
    pub gamma: Decimal,
    pub theta: Decimal,
    pub vega: Decimal,
    pub rho: Decimal,
}

/// The outcome of the pre-trade risk gate.
///
/// `violations` lists every breached limit (the checks are not
/// short-circuited), each naming the computed value and the threshold.
/// `risk_score` is the computed portfolio-risk fraction, reported whether or
/// not the order was approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDecision {
    pub approved: bool,
    pub violations: Vec<String>,
    pub risk_score: Decimal,
}
