use chrono::Utc;
use core_types::{AccountSnapshot, AccountStatus, AssetType, PositionRecord, SnapshotSource};
use rust_decimal::Decimal;
use serde::Deserialize;

// The brokerage API returns every numeric amount as a JSON string. A single
// malformed or missing field must not sink the whole record, so each numeric
// is coerced individually, defaulting to zero.

/// The raw account payload from `GET /v2/account`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAccountResponse {
    pub account_number: String,
    pub status: String,
    pub currency: String,
    pub buying_power: Option<String>,
    pub cash: Option<String>,
    pub portfolio_value: Option<String>,
    pub equity: Option<String>,
    pub last_equity: Option<String>,
    pub initial_margin: Option<String>,
    pub maintenance_margin: Option<String>,
    pub daytrading_buying_power: Option<String>,
    pub regt_buying_power: Option<String>,
    pub multiplier: Option<String>,
    pub daytrade_count: Option<u32>,
}

impl RawAccountResponse {
    /// Maps the wire record into a live `AccountSnapshot`, coercing every
    /// string-typed numeric explicitly.
    pub fn into_snapshot(self) -> AccountSnapshot {
        AccountSnapshot {
            status: AccountStatus::from_upstream(&self.status),
            currency: self.currency,
            buying_power: coerce_decimal("buying_power", self.buying_power.as_deref()),
            cash: coerce_decimal("cash", self.cash.as_deref()),
            portfolio_value: coerce_decimal("portfolio_value", self.portfolio_value.as_deref()),
            equity: coerce_decimal("equity", self.equity.as_deref()),
            last_equity: coerce_decimal("last_equity", self.last_equity.as_deref()),
            initial_margin: opt_decimal(self.initial_margin.as_deref()),
            maintenance_margin: opt_decimal(self.maintenance_margin.as_deref()),
            daytrading_buying_power: opt_decimal(self.daytrading_buying_power.as_deref()),
            regt_buying_power: opt_decimal(self.regt_buying_power.as_deref()),
            multiplier: self.multiplier.and_then(|m| m.parse().ok()),
            daytrade_count: self.daytrade_count,
            account_number: self.account_number,
            source: SnapshotSource::Live,
            as_of: Utc::now(),
        }
    }
}

/// A single raw position from `GET /v2/positions`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPositionResponse {
    pub symbol: String,
    pub qty: Option<String>,
    pub market_value: Option<String>,
    pub unrealized_pl: Option<String>,
    /// Unrealized P/L as a fraction of cost basis (e.g. "0.05" for +5%).
    pub unrealized_plpc: Option<String>,
    /// Explicit asset class when the source provides one (e.g. "us_equity").
    pub asset_class: Option<String>,
}

impl RawPositionResponse {
    /// Maps the wire record into a `PositionRecord`.
    ///
    /// An explicit upstream asset class wins; otherwise the class is inferred
    /// from the symbol pattern.
    pub fn into_record(self) -> PositionRecord {
        let asset_type = self
            .asset_class
            .as_deref()
            .and_then(asset_type_from_class)
            .unwrap_or_else(|| AssetType::infer(&self.symbol));

        PositionRecord {
            quantity: coerce_decimal("qty", self.qty.as_deref()),
            market_value: coerce_decimal("market_value", self.market_value.as_deref()),
            unrealized_pl: coerce_decimal("unrealized_pl", self.unrealized_pl.as_deref()),
            unrealized_pl_pct: coerce_decimal("unrealized_plpc", self.unrealized_plpc.as_deref()),
            symbol: self.symbol,
            asset_type,
        }
    }
}

/// Represents an error response body from the brokerage API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub code: Option<i64>,
    pub message: String,
}

fn asset_type_from_class(class: &str) -> Option<AssetType> {
    match class {
        "us_equity" => Some(AssetType::Stock),
        "us_option" => Some(AssetType::Option),
        "us_future" => Some(AssetType::Future),
        "crypto" => Some(AssetType::Crypto),
        _ => None,
    }
}

/// Parses a string-typed numeric field, defaulting to zero when the field is
/// absent or unparsable. The coercion is logged so dropped data stays
/// observable.
fn coerce_decimal(field: &str, raw: Option<&str>) -> Decimal {
    match raw {
        Some(text) => text.parse().unwrap_or_else(|_| {
            tracing::debug!(field, value = text, "coerced malformed numeric field to 0");
            Decimal::ZERO
        }),
        None => {
            tracing::debug!(field, "missing numeric field, defaulting to 0");
            Decimal::ZERO
        }
    }
}

fn opt_decimal(raw: Option<&str>) -> Option<Decimal> {
    raw.and_then(|text| text.parse().ok())
}
