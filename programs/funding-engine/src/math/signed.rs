//! Signed 256-bit integer for fixed-point intermediates
//!
//! Sign-magnitude over `U256`. Products are taken at 512 bits before the
//! compensating divide, so `a * b / d` never overflows mid-computation.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use primitive_types::{U256, U512};

use crate::error::MathError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct SignedU256 {
    is_negative: bool,
    mag: U256,
}

impl SignedU256 {
    pub const ZERO: Self = Self {
        is_negative: false,
        mag: U256([0; 4]),
    };

    pub const fn from_u64(value: u64) -> Self {
        Self {
            is_negative: false,
            mag: U256([value, 0, 0, 0]),
        }
    }

    pub fn pos(mag: U256) -> Self {
        Self {
            is_negative: false,
            mag,
        }
    }

    pub fn neg(mag: U256) -> Self {
        // -0 is never stored
        Self {
            is_negative: !mag.is_zero(),
            mag,
        }
    }

    pub fn from_i128(value: i128) -> Self {
        let mag = U256::from(value.unsigned_abs());
        if value < 0 {
            Self::neg(mag)
        } else {
            Self::pos(mag)
        }
    }

    /// `None` when the value does not fit an `i128`.
    pub fn to_i128(self) -> Option<i128> {
        if self.mag.bits() > 128 {
            return None;
        }
        let mag = self.mag.low_u128();
        if self.is_negative {
            if mag == 1u128 << 127 {
                Some(i128::MIN)
            } else {
                i128::try_from(mag).ok().map(|v| -v)
            }
        } else {
            i128::try_from(mag).ok()
        }
    }

    pub fn is_zero(&self) -> bool {
        self.mag.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.is_negative
    }

    pub fn magnitude(&self) -> U256 {
        self.mag
    }

    pub fn negated(self) -> Self {
        if self.is_negative {
            Self::pos(self.mag)
        } else {
            Self::neg(self.mag)
        }
    }

    pub fn abs(self) -> Self {
        Self::pos(self.mag)
    }

    /// `self * mul / div`, truncated toward zero.
    pub fn mul_div(self, mul: Self, div: Self) -> Result<Self, MathError> {
        if div.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        let product: U512 = self.mag.full_mul(mul.mag);
        let quotient = product / U512::from(div.mag);
        let mag = U256::try_from(quotient).map_err(|_| MathError::Overflow)?;

        if self.is_negative ^ mul.is_negative ^ div.is_negative {
            Ok(Self::neg(mag))
        } else {
            Ok(Self::pos(mag))
        }
    }

    /// Multiplies the magnitude by `10^exp`.
    pub fn scale_up(self, exp: u32) -> Result<Self, MathError> {
        if self.mag.is_zero() {
            return Ok(self);
        }
        let mag = pow10(exp)
            .and_then(|base| self.mag.checked_mul(base))
            .ok_or(MathError::Overflow)?;
        Ok(Self {
            is_negative: self.is_negative,
            mag,
        })
    }

    /// Divides the magnitude by `10^exp`, truncating toward zero.
    pub fn scale_down(self, exp: u32) -> Self {
        // 10^78 and above exceed every 256-bit magnitude
        let mag = match pow10(exp) {
            Some(base) => self.mag / base,
            None => U256::zero(),
        };
        if self.is_negative {
            Self::neg(mag)
        } else {
            Self::pos(mag)
        }
    }

    pub fn integer_sqrt(self) -> Result<Self, MathError> {
        if self.is_negative {
            return Err(MathError::DomainError);
        }
        Ok(Self::pos(self.mag.integer_sqrt()))
    }
}

/// `None` once `10^exp` no longer fits in 256 bits.
fn pow10(exp: u32) -> Option<U256> {
    U256::from(10u8).checked_pow(U256::from(exp))
}

impl Add for SignedU256 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self.is_negative, rhs.is_negative) {
            (false, false) => Self::pos(self.mag + rhs.mag),
            (true, true) => Self::neg(self.mag + rhs.mag),
            // |a| - |b| with the sign of the larger magnitude
            (a_neg, _) => {
                if self.mag >= rhs.mag {
                    let mag = self.mag - rhs.mag;
                    if a_neg { Self::neg(mag) } else { Self::pos(mag) }
                } else {
                    let mag = rhs.mag - self.mag;
                    if a_neg { Self::pos(mag) } else { Self::neg(mag) }
                }
            }
        }
    }
}

impl Sub for SignedU256 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + rhs.negated()
    }
}

impl Neg for SignedU256 {
    type Output = Self;

    fn neg(self) -> Self {
        self.negated()
    }
}

impl Ord for SignedU256 {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative, other.is_negative) {
            (false, false) => self.mag.cmp(&other.mag),
            (true, true) => other.mag.cmp(&self.mag),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl PartialOrd for SignedU256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i128> for SignedU256 {
    fn from(value: i128) -> Self {
        Self::from_i128(value)
    }
}

impl From<i64> for SignedU256 {
    fn from(value: i64) -> Self {
        Self::from_i128(value as i128)
    }
}

impl fmt::Display for SignedU256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative {
            write!(f, "-{}", self.mag)
        } else {
            write!(f, "{}", self.mag)
        }
    }
}

impl FromStr for SignedU256 {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MathError::InvalidDecimalString);
        }
        let mag = U256::from_dec_str(digits).map_err(|_| MathError::InvalidDecimalString)?;
        Ok(if negative { Self::neg(mag) } else { Self::pos(mag) })
    }
}
