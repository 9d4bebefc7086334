//! # Meridian Reference Data
//!
//! Static market reference data: the symbol -> sector classification table
//! consumed by exposure aggregation.
//!
//! As a Layer 0 crate it depends on nothing else in the workspace. The table
//! is built once at startup (defaults plus configuration overrides) and is
//! read-only thereafter, so it can be shared freely across concurrent calls.

// Declare the modules that make up this crate.
pub mod error;
pub mod sectors;

// Re-export the core types to provide a clean public API.
pub use error::ReferenceError;
pub use sectors::{SectorMap, UNKNOWN_SECTOR};
