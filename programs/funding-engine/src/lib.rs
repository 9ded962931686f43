//! Off-chain funding and interest accounting for perennial-style markets.
//!
//! Reproduces the integer-truncating fixed-point math of the on-chain
//! engine so computed rates match chain state exactly.

pub mod config;
pub mod curve;
pub mod error;
pub mod funding;
pub mod math;
pub mod payoff;
pub mod state;

pub use config::{MarketConfig, MarketEntry};
pub use curve::{compute_interest_rate, linear_interpolation};
pub use error::{ConfigError, MathError};
pub use funding::{
    calculate_funding_and_interest_for_sides, compute_funding_and_interest, FundingAndInterest,
    SideRates,
};
pub use math::{Fixed18, Fixed6, FixedPoint, SignedU256};
pub use payoff::PayoffTransform;
pub use state::{
    GlobalState, MarketParameter, MarketSnapshot, PAccumulator, PController, Position,
    RiskParameter, UtilizationCurve,
};
