//! Utilization curve evaluation

use tracing::trace;

use crate::error::MathError;
use crate::math::Fixed6;
use crate::state::UtilizationCurve;

impl UtilizationCurve {
    /// See [`compute_interest_rate`].
    pub fn rate(&self, utilization: Fixed6) -> Result<Fixed6, MathError> {
        compute_interest_rate(self, utilization)
    }
}

/// Maps a utilization ratio to an interest rate.
///
/// Utilization is not clamped here: anything below zero yields `min_rate`
/// and anything at or above `ONE` yields `max_rate`.
pub fn compute_interest_rate(
    curve: &UtilizationCurve,
    utilization: Fixed6,
) -> Result<Fixed6, MathError> {
    let rate = if utilization < Fixed6::ZERO {
        curve.min_rate
    } else if utilization < curve.target_utilization {
        linear_interpolation(
            Fixed6::ZERO,
            curve.min_rate,
            curve.target_utilization,
            curve.target_rate,
            utilization,
        )?
    } else if utilization < Fixed6::ONE {
        linear_interpolation(
            curve.target_utilization,
            curve.target_rate,
            Fixed6::ONE,
            curve.max_rate,
            utilization,
        )?
    } else {
        curve.max_rate
    };

    trace!(%utilization, %rate, "utilization curve evaluated");
    Ok(rate)
}

/// Point on the segment (start_x, start_y)-(end_x, end_y) at `target_x`.
///
/// The x ratio is divided once and then applied to the y range, in that
/// order, so truncation matches the on-chain curve math.
pub fn linear_interpolation(
    start_x: Fixed6,
    start_y: Fixed6,
    end_x: Fixed6,
    end_y: Fixed6,
    target_x: Fixed6,
) -> Result<Fixed6, MathError> {
    if target_x < start_x || target_x > end_x {
        return Err(MathError::OutOfBounds);
    }

    let x_range = end_x - start_x;
    let y_range = end_y - start_y;
    let x_ratio = (target_x - start_x).div(x_range)?;
    Ok(y_range.mul(x_ratio)? + start_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f6(s: &str) -> Fixed6 {
        s.parse().unwrap()
    }

    fn curve() -> UtilizationCurve {
        UtilizationCurve {
            min_rate: f6("0.01"),
            max_rate: f6("1.0"),
            target_rate: f6("0.05"),
            target_utilization: f6("0.8"),
        }
    }

    #[test]
    fn test_midpoint_of_first_segment() {
        assert_eq!(curve().rate(f6("0.4")).unwrap(), f6("0.03"));
    }

    #[test]
    fn test_boundaries_are_exact() {
        let curve = curve();
        assert_eq!(curve.rate(Fixed6::ZERO).unwrap(), curve.min_rate);
        assert_eq!(curve.rate(curve.target_utilization).unwrap(), curve.target_rate);
        assert_eq!(curve.rate(Fixed6::ONE).unwrap(), curve.max_rate);
    }

    #[test]
    fn test_out_of_range_utilization_saturates() {
        let curve = curve();
        assert_eq!(curve.rate(f6("-0.5")).unwrap(), curve.min_rate);
        assert_eq!(curve.rate(Fixed6::from_integer(100)).unwrap(), curve.max_rate);
    }

    #[test]
    fn test_second_segment() {
        // 0.9 is halfway between 0.8 and 1.0: 0.05 + 0.95 / 2
        assert_eq!(curve().rate(f6("0.9")).unwrap(), f6("0.525"));
    }

    #[test]
    fn test_ratio_is_truncated_before_scaling() {
        // ratio 599 / 800000 = 0.000748(75) -> 0.000748, times 0.04 -> 0.000029(92) -> 0.000029
        assert_eq!(
            curve().rate(Fixed6::from_scaled(599)).unwrap(),
            Fixed6::from_scaled(10_029)
        );
    }

    #[test]
    fn test_interpolation_rejects_targets_outside_segment() {
        let result = linear_interpolation(
            Fixed6::ZERO,
            f6("0.01"),
            f6("0.8"),
            f6("0.05"),
            f6("0.81"),
        );
        assert_eq!(result, Err(MathError::OutOfBounds));

        let result = linear_interpolation(
            Fixed6::ZERO,
            f6("0.01"),
            f6("0.8"),
            f6("0.05"),
            f6("-0.01"),
        );
        assert_eq!(result, Err(MathError::OutOfBounds));
    }

    #[test]
    fn test_decreasing_segment_interpolates_downward() {
        let y = linear_interpolation(Fixed6::ZERO, f6("1"), f6("1"), f6("0"), f6("0.25")).unwrap();
        assert_eq!(y, f6("0.75"));
    }
}
