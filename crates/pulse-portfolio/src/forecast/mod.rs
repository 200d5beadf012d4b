//! Forecasting and anomaly detection.
//!
//! - [`CompletionForecast`]: earned-value projection of finish date and cost
//! - [`PerformanceForecast`]: recency-weighted index trend projection
//! - [`detect_anomalies`]: z-score outlier flags across the portfolio

mod anomaly;
mod completion;
mod trend;

pub use anomaly::{detect_anomalies, AnomalyFlag};
pub use completion::CompletionForecast;
pub use trend::PerformanceForecast;
