//! Market state consumed by the funding engine.
//!
//! Field names follow the upstream indexer's camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::math::Fixed6;
use crate::state::UtilizationCurve;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub global: GlobalState,
    pub parameter: MarketParameter,
    pub risk_parameter: RiskParameter,
    pub next_position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalState {
    pub p_accumulator: PAccumulator,
}

/// Running funding rate of the p-controller and the skew it last saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PAccumulator {
    #[serde(alias = "_value")]
    pub value: Fixed6,
    #[serde(alias = "_skew")]
    pub skew: Fixed6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketParameter {
    pub funding_fee: Fixed6,
    pub interest_fee: Fixed6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskParameter {
    pub p_controller: PController,
    pub utilization_curve: UtilizationCurve,
    pub efficiency_limit: Fixed6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PController {
    pub k: Fixed6,
    pub min: Fixed6,
    pub max: Fixed6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub maker: Fixed6,
    pub long: Fixed6,
    pub short: Fixed6,
    /// Unix seconds.
    pub timestamp: i64,
}
