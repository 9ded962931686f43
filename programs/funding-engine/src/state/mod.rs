pub mod market_snapshot;
pub mod utilization_curve;

pub use market_snapshot::*;
pub use utilization_curve::*;
