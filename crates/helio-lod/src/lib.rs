//! Level-of-detail management: distance-based tier selection, a throttled
//! per-body classifier with change events, and aggregate metrics.

mod classifier;
mod error;
mod metrics;
mod selector;

pub use classifier::{LodClassifier, LodEvent, LodState};
pub use error::LodError;
pub use metrics::LodMetrics;
pub use selector::{LodSelector, LodThresholds, LodTier};
