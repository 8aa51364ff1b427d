//! Flock Tracker Core
//!
//! Batch lifecycle tracking for pastured poultry: derived lifecycle
//! dates, feed scheduling, mortality and growth stats, and the in-memory
//! batch store. All date math is pure calendar-day arithmetic.

pub mod breeds;
pub mod feed;
pub mod lifecycle;
pub mod stats;
pub mod store;
pub mod types;

pub use store::{FlockStore, StoreError};
pub use types::*;
