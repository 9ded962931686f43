//! Decimal fixed-point numbers
//!
//! A `FixedPoint<D>` stores `value * 10^D` as a signed 256-bit integer.
//! Multiply and divide truncate toward zero, matching the on-chain
//! `Fixed6`/`Fixed18` libraries bit for bit.

use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use primitive_types::U256;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MathError;
use crate::math::signed::SignedU256;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedPoint<const DECIMALS: u32>(SignedU256);

/// 6 decimal places: positions, rates, fees.
pub type Fixed6 = FixedPoint<6>;

/// 18 decimal places: oracle index prices.
pub type Fixed18 = FixedPoint<18>;

impl<const DECIMALS: u32> FixedPoint<DECIMALS> {
    pub const PRECISION: u32 = DECIMALS;
    pub const ZERO: Self = Self(SignedU256::ZERO);
    pub const ONE: Self = Self(SignedU256::from_u64(10u64.pow(DECIMALS)));

    fn base() -> SignedU256 {
        Self::ONE.0
    }

    pub fn from_raw(raw: SignedU256) -> Self {
        Self(raw)
    }

    /// Wraps an already scaled integer, e.g. `from_scaled(10_000)` is 0.01 at 6 decimals.
    pub fn from_scaled(scaled: i128) -> Self {
        Self(SignedU256::from_i128(scaled))
    }

    /// Whole units, e.g. `from_integer(100)` is 100.0.
    pub fn from_integer(value: i128) -> Self {
        let mag = U256::from(value.unsigned_abs()) * Self::base().magnitude();
        if value < 0 {
            Self(SignedU256::neg(mag))
        } else {
            Self(SignedU256::pos(mag))
        }
    }

    pub fn raw(&self) -> SignedU256 {
        self.0
    }

    pub fn to_scaled_i128(&self) -> Option<i128> {
        self.0.to_i128()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// `self * other / ONE`, truncated toward zero.
    pub fn mul(self, other: Self) -> Result<Self, MathError> {
        self.0.mul_div(other.0, Self::base()).map(Self)
    }

    /// `self * ONE / other`, truncated toward zero.
    pub fn div(self, other: Self) -> Result<Self, MathError> {
        self.0.mul_div(Self::base(), other.0).map(Self)
    }

    /// Divides by a plain integer, truncated toward zero.
    pub fn div_int(self, divisor: u64) -> Result<Self, MathError> {
        self.0
            .mul_div(SignedU256::pos(U256::one()), SignedU256::pos(U256::from(divisor)))
            .map(Self)
    }

    /// Fixed-point square root: `isqrt(raw * 10^D)`.
    pub fn sqrt(self) -> Result<Self, MathError> {
        if self.is_negative() {
            return Err(MathError::DomainError);
        }
        self.0.scale_up(DECIMALS)?.integer_sqrt().map(Self)
    }
}

impl<const DECIMALS: u32> Add for FixedPoint<DECIMALS> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<const DECIMALS: u32> Sub for FixedPoint<DECIMALS> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl<const DECIMALS: u32> Neg for FixedPoint<DECIMALS> {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl<const DECIMALS: u32> num_traits::Zero for FixedPoint<DECIMALS> {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl<const DECIMALS: u32> fmt::Display for FixedPoint<DECIMALS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = DECIMALS as usize + 1;
        let digits = format!("{:0>width$}", self.0.magnitude().to_string(), width = width);
        let (int_part, frac_part) = digits.split_at(digits.len() - DECIMALS as usize);
        let frac_part = frac_part.trim_end_matches('0');

        if self.is_negative() {
            f.write_str("-")?;
        }
        if frac_part.is_empty() {
            f.write_str(int_part)
        } else {
            write!(f, "{}.{}", int_part, frac_part)
        }
    }
}

/// Parses a human decimal such as `"0.01"` or `"-1250.5"`.
/// Fractional digits beyond the precision are truncated.
impl<const DECIMALS: u32> FromStr for FixedPoint<DECIMALS> {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(MathError::InvalidDecimalString);
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(MathError::InvalidDecimalString);
        }

        let places = DECIMALS as usize;
        let frac: String = frac_part.chars().take(places).collect();
        let scaled = format!("{}{:0<places$}", int_part, frac, places = places);
        let mag = U256::from_dec_str(&scaled).map_err(|_| MathError::InvalidDecimalString)?;

        Ok(if negative {
            Self(SignedU256::neg(mag))
        } else {
            Self(SignedU256::pos(mag))
        })
    }
}

impl<const DECIMALS: u32> Serialize for FixedPoint<DECIMALS> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

struct ScaledVisitor<const DECIMALS: u32>;

impl<'de, const DECIMALS: u32> Visitor<'de> for ScaledVisitor<DECIMALS> {
    type Value = FixedPoint<DECIMALS>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a scaled integer with {} implied decimals", DECIMALS)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<SignedU256>()
            .map(FixedPoint)
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(FixedPoint::from_scaled(v as i128))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(FixedPoint::from_scaled(v as i128))
    }
}

impl<'de, const DECIMALS: u32> Deserialize<'de> for FixedPoint<DECIMALS> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScaledVisitor::<DECIMALS>)
    }
}
