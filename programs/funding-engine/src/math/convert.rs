//! Conversions between precisions and external integer amounts.
//!
//! Narrowing truncates toward zero; widening is exact.

use crate::error::MathError;
use crate::math::fixed_point::{Fixed18, Fixed6, FixedPoint};
use crate::math::signed::SignedU256;

/// Digits separating the two precisions.
pub const PRECISION_GAP: u32 = Fixed18::PRECISION - Fixed6::PRECISION;

impl Fixed18 {
    /// Drops the last 12 digits.
    pub fn to_fixed6(self) -> Fixed6 {
        Fixed6::from_raw(self.raw().scale_down(PRECISION_GAP))
    }
}

impl Fixed6 {
    pub fn to_fixed18(self) -> Result<Fixed18, MathError> {
        Ok(Fixed18::from_raw(self.raw().scale_up(PRECISION_GAP)?))
    }
}

impl<const DECIMALS: u32> FixedPoint<DECIMALS> {
    /// Reads an integer carrying `decimals` implied places, e.g. a token
    /// amount with 6 decimals or a plain integer with 0.
    pub fn from_decimals(amount: SignedU256, decimals: u32) -> Result<Self, MathError> {
        let raw = if decimals <= DECIMALS {
            amount.scale_up(DECIMALS - decimals)?
        } else {
            amount.scale_down(decimals - DECIMALS)
        };
        Ok(Self::from_raw(raw))
    }

    /// Inverse of [`FixedPoint::from_decimals`].
    pub fn to_decimals(self, decimals: u32) -> Result<SignedU256, MathError> {
        if decimals >= DECIMALS {
            self.raw().scale_up(decimals - DECIMALS)
        } else {
            Ok(self.raw().scale_down(DECIMALS - decimals))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowing_truncates_toward_zero() {
        let price: Fixed18 = "1234.567890123456789".parse().unwrap();
        assert_eq!(price.to_fixed6(), "1234.56789".parse::<Fixed6>().unwrap());

        let negative: Fixed18 = "-0.0000009".parse().unwrap();
        assert_eq!(negative.to_fixed6(), Fixed6::ZERO);
        assert!(!negative.to_fixed6().is_negative());
    }

    #[test]
    fn test_widening_is_exact() {
        let rate: Fixed6 = "-0.008972".parse().unwrap();
        let wide = rate.to_fixed18().unwrap();
        assert_eq!(wide, "-0.008972".parse::<Fixed18>().unwrap());
        assert_eq!(wide.to_fixed6(), rate);
    }

    #[test]
    fn test_from_and_to_decimals() {
        // 2.5 USDC with 6 token decimals into 18-decimal precision
        let amount = SignedU256::from_i128(2_500_000);
        let value = Fixed18::from_decimals(amount, 6).unwrap();
        assert_eq!(value, "2.5".parse::<Fixed18>().unwrap());
        assert_eq!(value.to_decimals(6).unwrap(), amount);

        // 24 implied decimals narrow into 18
        let fine = SignedU256::from_i128(1_999_999);
        assert_eq!(Fixed18::from_decimals(fine, 24).unwrap(), Fixed18::from_scaled(1));

        assert_eq!(
            Fixed6::from_decimals(SignedU256::from_i128(1000), 0).unwrap(),
            Fixed6::from_integer(1000)
        );
        assert_eq!(
            Fixed6::from_integer(-3).to_decimals(0).unwrap(),
            SignedU256::from_i128(-3)
        );
    }

    #[test]
    fn test_decimals_beyond_256_bits() {
        let one = SignedU256::from_i128(1);
        assert_eq!(Fixed6::from_decimals(one, 90).unwrap(), Fixed6::ZERO);
        assert_eq!(Fixed6::ONE.to_decimals(100), Err(MathError::Overflow));
        assert_eq!(Fixed18::from_decimals(one, u32::MAX).unwrap(), Fixed18::ZERO);
        assert_eq!(Fixed6::ONE.to_decimals(0).unwrap(), one);
        assert_eq!(Fixed6::ZERO.to_decimals(100).unwrap(), SignedU256::ZERO);
    }
}
