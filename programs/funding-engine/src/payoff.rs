//! Payoff transforms
//!
//! A transform projects an 18-decimal oracle index price onto a market's
//! 6-decimal payoff value. The untransform goes the other way; it is computed
//! at 6 decimals and then widened, so it is exact for `Linear` and
//! `DecimalShift` when no digits were truncated, and approximate for the
//! power curves (the square root drops the remainder and only accepts
//! non-negative payoffs).

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::MathError;
use crate::math::{Fixed18, Fixed6, FixedPoint, SignedU256};

/// Largest supported `|decimals|` for a decimal shift.
pub const MAX_DECIMAL_SHIFT: u32 = 18;

const MICRO: i128 = 1_000_000;
const CENTIMILLI: i128 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PayoffTransform {
    Linear,
    /// `x² / 10⁶`
    MicroPowerTwo,
    /// `x² / 10⁵`
    CentimilliPowerTwo,
    /// `x · 10^decimals`
    DecimalShift { decimals: i32 },
}

impl PayoffTransform {
    pub fn transform(&self, index: Fixed18) -> Result<Fixed6, MathError> {
        let payoff = match *self {
            PayoffTransform::Linear => index.to_fixed6(),
            PayoffTransform::MicroPowerTwo => power_two_transform(index, MICRO)?,
            PayoffTransform::CentimilliPowerTwo => power_two_transform(index, CENTIMILLI)?,
            PayoffTransform::DecimalShift { decimals } => {
                let base = shift_base::<18>(decimals)?;
                let shifted = if decimals < 0 {
                    index.div(base)?
                } else {
                    index.mul(base)?
                };
                shifted.to_fixed6()
            }
        };
        trace!(transform = ?self, %index, %payoff, "payoff transform");
        Ok(payoff)
    }

    pub fn untransform(&self, payoff: Fixed6) -> Result<Fixed18, MathError> {
        let index = match *self {
            PayoffTransform::Linear => payoff,
            PayoffTransform::MicroPowerTwo => power_two_untransform(payoff, MICRO)?,
            PayoffTransform::CentimilliPowerTwo => power_two_untransform(payoff, CENTIMILLI)?,
            PayoffTransform::DecimalShift { decimals } => {
                let base = shift_base::<6>(decimals)?;
                if decimals < 0 {
                    payoff.mul(base)?
                } else {
                    payoff.div(base)?
                }
            }
        };
        trace!(transform = ?self, %payoff, %index, "payoff untransform");
        index.to_fixed18()
    }
}

fn power_two_transform(index: Fixed18, divisor: i128) -> Result<Fixed6, MathError> {
    Ok(index
        .mul(index)?
        .div(Fixed18::from_integer(divisor))?
        .to_fixed6())
}

fn power_two_untransform(payoff: Fixed6, multiplier: i128) -> Result<Fixed6, MathError> {
    payoff.mul(Fixed6::from_integer(multiplier))?.sqrt()
}

/// `10^|decimals|` as a whole number at the requested precision.
fn shift_base<const DECIMALS: u32>(decimals: i32) -> Result<FixedPoint<DECIMALS>, MathError> {
    if decimals.unsigned_abs() > MAX_DECIMAL_SHIFT {
        return Err(MathError::Overflow);
    }
    let units = SignedU256::from_u64(10u64.pow(decimals.unsigned_abs()));
    FixedPoint::from_decimals(units, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f18(s: &str) -> Fixed18 {
        s.parse().unwrap()
    }

    fn f6(s: &str) -> Fixed6 {
        s.parse().unwrap()
    }

    #[test]
    fn test_linear() {
        let price = f18("3150.123456789");
        let payoff = PayoffTransform::Linear.transform(price).unwrap();
        assert_eq!(payoff, f6("3150.123456"));
        assert_eq!(
            PayoffTransform::Linear.untransform(payoff).unwrap(),
            f18("3150.123456")
        );
    }

    #[test]
    fn test_micro_power_two() {
        let transform = PayoffTransform::MicroPowerTwo;
        // 2000² / 1e6 = 4
        assert_eq!(transform.transform(f18("2000")).unwrap(), f6("4"));
        assert_eq!(transform.untransform(f6("4")).unwrap(), f18("2000"));
        // the sign is lost on the way in
        assert_eq!(transform.transform(f18("-2000")).unwrap(), f6("4"));
        assert_eq!(transform.untransform(f6("-4")), Err(MathError::DomainError));
    }

    #[test]
    fn test_centimilli_power_two() {
        let transform = PayoffTransform::CentimilliPowerTwo;
        // 3000² / 1e5 = 90
        assert_eq!(transform.transform(f18("3000")).unwrap(), f6("90"));
        assert_eq!(transform.untransform(f6("90")).unwrap(), f18("3000"));
    }

    #[test]
    fn test_power_two_untransform_is_approximate() {
        let transform = PayoffTransform::MicroPowerTwo;
        let payoff = transform.transform(f18("1234.5678")).unwrap();
        let back = transform.untransform(payoff).unwrap();
        let error = (back - f18("1234.5678")).abs();
        assert!(error < f18("0.001"), "round trip drifted by {}", error);
    }

    #[test]
    fn test_decimal_shift() {
        let down = PayoffTransform::DecimalShift { decimals: -3 };
        assert_eq!(down.transform(f18("1.5")).unwrap(), f6("0.0015"));
        assert_eq!(down.untransform(f6("0.0015")).unwrap(), f18("1.5"));

        let up = PayoffTransform::DecimalShift { decimals: 2 };
        assert_eq!(up.transform(f18("0.123")).unwrap(), f6("12.3"));
        assert_eq!(up.untransform(f6("12.3")).unwrap(), f18("0.123"));

        let none = PayoffTransform::DecimalShift { decimals: 0 };
        assert_eq!(none.transform(f18("7.25")).unwrap(), f6("7.25"));
    }

    #[test]
    fn test_decimal_shift_bounds() {
        let wild = PayoffTransform::DecimalShift { decimals: 40 };
        assert_eq!(wild.transform(f18("1")), Err(MathError::Overflow));
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&PayoffTransform::DecimalShift { decimals: -3 }).unwrap();
        assert_eq!(json, r#"{"kind":"decimal_shift","decimals":-3}"#);
        let parsed: PayoffTransform = serde_json::from_str(r#"{"kind":"micro_power_two"}"#).unwrap();
        assert_eq!(parsed, PayoffTransform::MicroPowerTwo);
    }
}
