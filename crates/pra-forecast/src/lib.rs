//! Trend forecast engine
//!
//! Extrapolates a bounded score series with a least-squares linear fit:
//! - Primary strategy: regression over the score's position index,
//!   predictions clipped to `[0, 1]`
//! - Fallback strategy: a flat line at the input mean whenever fewer than
//!   three points are available or the fit degenerates
//!
//! Also hosts the general-purpose z-score anomaly detector used outside
//! the tabular path.

#![warn(unreachable_pub)]

pub mod anomaly;
pub mod engine;
pub mod error;
pub mod model;

pub use anomaly::detect_anomalies;
pub use engine::{TrendForecastEngine, TrendLabel};
pub use error::ForecastError;
pub use model::LinearModel;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
