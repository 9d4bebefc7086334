pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{is_option_symbol, AccountStatus, AssetType, OrderSide, SnapshotSource};
pub use error::CoreError;
pub use structs::{AccountSnapshot, OrderRequest, PositionRecord};
