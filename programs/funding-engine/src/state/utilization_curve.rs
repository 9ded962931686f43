use serde::{Deserialize, Serialize};

use crate::math::Fixed6;

/// Jump-rate curve: linear from `min_rate` to `target_rate` up to the
/// target utilization, then linear to `max_rate` at full utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilizationCurve {
    pub min_rate: Fixed6,
    pub max_rate: Fixed6,
    pub target_rate: Fixed6,
    pub target_utilization: Fixed6,
}
