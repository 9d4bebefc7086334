//! # Meridian Risk Engine
//!
//! This crate computes portfolio risk and performance analytics over a
//! brokerage account snapshot: portfolio summaries, sector and asset-class
//! exposure, concentration, Value-at-Risk and Expected Shortfall, aggregated
//! option Greeks, and the pre-trade risk-limit gate.
//!
//! ## Architectural Principles
//!
//! - **Stateless per call:** every entry point fetches a fresh snapshot
//!   through the injected `ExecutionSource` and derives its metrics from
//!   that alone. Nothing is cached or mutated between calls.
//! - **Degrade, never fail:** read-only analytics substitute documented
//!   defaults (paper snapshot, empty book, guarded ratios) when the source
//!   is unavailable. The only user-visible rejection is the risk gate's,
//!   and it carries an itemized reason list.
//!
//! ## Public API
//!
//! - `RiskEngine`: the engine itself, constructed around an injected source,
//!   a `RiskLimits` policy and a `SectorMap`.
//! - `report`: the output value objects (`PortfolioSummary`,
//!   `PortfolioAnalytics`, `RiskMetrics`, `GreeksReport`, `RiskDecision`).
//! - `EngineError`: the specific error types that can be returned from this
//!   crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod gate;
pub mod greeks;
pub mod metrics;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::RiskEngine;
pub use error::EngineError;
pub use report::{
    AssetTypeExposure, GreeksReport, PortfolioAnalytics, PortfolioSummary, RiskDecision,
    RiskMetrics,
};
