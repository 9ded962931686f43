use num_derive::FromPrimitive;
use thiserror::Error;

/// Arithmetic failures. The discriminants are stable error codes.
#[derive(Error, Debug, Copy, Clone, FromPrimitive, PartialEq, Eq)]
pub enum MathError {
    #[error("Division by zero")]
    DivisionByZero = 0,

    #[error("Square root of a negative value")]
    DomainError = 1,

    #[error("Interpolation target out of bounds")]
    OutOfBounds = 2,

    #[error("Arithmetic overflow")]
    Overflow = 3,

    #[error("Invalid decimal string")]
    InvalidDecimalString = 4,
}

impl MathError {
    pub fn code(self) -> u32 {
        self as u32
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read market config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse market config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("market asset name is empty")]
    EmptyAsset,

    #[error("market asset `{0}` is declared more than once")]
    DuplicateAsset(String),

    #[error("market `{asset}` has decimal shift {decimals} outside [-18, 18]")]
    InvalidDecimalShift { asset: String, decimals: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn test_error_codes_round_trip() {
        for err in [
            MathError::DivisionByZero,
            MathError::DomainError,
            MathError::OutOfBounds,
            MathError::Overflow,
            MathError::InvalidDecimalString,
        ] {
            assert_eq!(MathError::from_u32(err.code()), Some(err));
        }
        assert_eq!(MathError::from_u32(99), None);
    }
}
