//! Funding and interest rates per position side.
//!
//! Sign convention: positive means the side pays, negative means it receives.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::curve::compute_interest_rate;
use crate::error::MathError;
use crate::math::Fixed6;
use crate::state::MarketSnapshot;

/// Utilization is capped at 100x.
const MAX_UTILIZATION: i128 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideRates {
    pub long: Fixed6,
    pub short: Fixed6,
    pub maker: Fixed6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingAndInterest {
    pub long: Fixed6,
    pub short: Fixed6,
    pub maker: Fixed6,
    pub funding_rates: SideRates,
    pub interest_rates: SideRates,
}

impl FundingAndInterest {
    /// Funding plus interest per side.
    pub fn totals(&self) -> SideRates {
        SideRates {
            long: self.long,
            short: self.short,
            maker: self.maker,
        }
    }
}

pub fn now_seconds() -> i64 {
    Utc::now().timestamp()
}

/// Rates for every side as of the current wall clock.
pub fn calculate_funding_and_interest_for_sides(
    snapshot: &MarketSnapshot,
) -> Result<FundingAndInterest, MathError> {
    compute_funding_and_interest(snapshot, now_seconds())
}

/// Rates for every side as of `now` (unix seconds).
///
/// Zero denominators are business cases here and resolve to zero; only
/// overflow can fail.
pub fn compute_funding_and_interest(
    snapshot: &MarketSnapshot,
    now: i64,
) -> Result<FundingAndInterest, MathError> {
    let p_accumulator = snapshot.global.p_accumulator;
    let parameter = snapshot.parameter;
    let risk = snapshot.risk_parameter;
    let position = snapshot.next_position;
    let (maker, long, short) = (position.maker, position.long, position.short);
    let controller = risk.p_controller;

    // Funding. The elapsed seconds enter as a raw scaled integer, as the
    // reference accounting does.
    let elapsed = now as i128 - position.timestamp as i128;
    let time_delta = Fixed6::from_scaled(elapsed);
    let market_funding = if controller.k.is_zero() {
        p_accumulator.value
    } else {
        p_accumulator.value + time_delta.mul(p_accumulator.skew.div(controller.k)?)?
    };
    let funding = market_funding.min(controller.max).max(controller.min);
    let major = long.max(short);
    let minor = long.min(short);

    // Interest
    let max_utilization = Fixed6::from_integer(MAX_UTILIZATION);
    let net_utilization = if maker + minor > Fixed6::ZERO {
        major.div(maker + minor)?
    } else {
        Fixed6::ZERO
    };
    let efficiency_utilization = if maker > Fixed6::ZERO {
        major.mul(risk.efficiency_limit.div(maker)?)?
    } else {
        max_utilization
    };
    let utilization = max_utilization.min(net_utilization.max(efficiency_utilization));
    let interest_rate = compute_interest_rate(&risk.utilization_curve, utilization)?;
    let applicable_notional = maker.min(long + short);
    let interest = if long + short > Fixed6::ZERO {
        interest_rate.mul(applicable_notional)?.div(long + short)?
    } else {
        Fixed6::ZERO
    };
    let total_interest_fee = interest.mul(parameter.interest_fee)?;

    let total_funding_fee = funding.abs().mul(parameter.funding_fee)?.div_int(2)?;
    let long_funding = funding + total_funding_fee;
    let short_funding = -funding + total_funding_fee;

    let maker_util = if maker > Fixed6::ZERO {
        (long - short).div(maker)?.min(Fixed6::ONE).max(-Fixed6::ONE)
    } else {
        Fixed6::ZERO
    };
    let maker_funding = maker_util.mul(funding)?;
    let maker_funding_fee = maker_util.abs().mul(total_funding_fee)?;
    let maker_rate = -(maker_funding - maker_funding_fee + (interest - total_interest_fee));

    debug!(
        %funding,
        %utilization,
        %interest_rate,
        %interest,
        %total_funding_fee,
        %total_interest_fee,
        elapsed,
        "computed funding and interest"
    );

    Ok(FundingAndInterest {
        long: long_funding + interest,
        short: short_funding + interest,
        maker: maker_rate,
        funding_rates: SideRates {
            long: long_funding,
            short: short_funding,
            maker: -(maker_funding - maker_funding_fee),
        },
        interest_rates: SideRates {
            long: interest,
            short: interest,
            maker: -(interest - total_interest_fee),
        },
    })
}
