//! Sensor accuracy configuration.

use std::fmt::{self, Display};

use crate::Color;

/// Errors returned when validating a sensor accuracy.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum AccuracyError {
    /// The value is not a probability (outside `[0, 1]` or NaN).
    #[display("sensor accuracy must be within [0, 1], got {value}")]
    OutOfRange {
        /// The rejected value.
        value: f64,
    },
}

/// Probability that the color sensor reports the true color of the robot's cell.
///
/// The remaining `1 - accuracy` mass is split uniformly across the other
/// colors the sensor can report.
///
/// # Examples
///
/// ```
/// use mazeloc_core::SensorAccuracy;
///
/// let accuracy = SensorAccuracy::new(0.9)?;
/// assert_eq!(accuracy.get(), 0.9);
/// assert!((accuracy.miss_probability() - 0.1 / 3.0).abs() < 1e-12);
///
/// assert!(SensorAccuracy::new(1.5).is_err());
/// assert!(SensorAccuracy::new(f64::NAN).is_err());
/// # Ok::<(), mazeloc_core::AccuracyError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SensorAccuracy(f64);

impl SensorAccuracy {
    /// The accuracy used when none is configured.
    pub const DEFAULT: Self = Self(0.88);

    /// A sensor that never misreports.
    pub const PERFECT: Self = Self(1.0);

    /// Validates and wraps an accuracy value.
    ///
    /// # Errors
    ///
    /// Returns [`AccuracyError::OutOfRange`] if `value` is NaN or outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self, AccuracyError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AccuracyError::OutOfRange { value })
        }
    }

    /// Returns the probability of a correct reading.
    #[must_use]
    #[inline]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Returns the probability of reading one specific wrong color out of the four.
    #[must_use]
    #[inline]
    pub fn miss_probability(self) -> f64 {
        self.miss_probability_among(Color::COUNT)
    }

    /// Returns the probability of reading one specific wrong color when the
    /// sensor can report `colors` distinct colors.
    ///
    /// With fewer than two colors there is nothing to misreport, so this is zero.
    #[must_use]
    pub fn miss_probability_among(self, colors: usize) -> f64 {
        let others = colors.saturating_sub(1);
        if others == 0 {
            return 0.0;
        }
        // A palette never holds more than four colors.
        #[expect(clippy::cast_precision_loss)]
        let others = others as f64;
        (1.0 - self.0) / others
    }
}

impl Default for SensorAccuracy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for SensorAccuracy {
    type Error = AccuracyError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Display for SensorAccuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(SensorAccuracy::new(0.0).map(SensorAccuracy::get), Ok(0.0));
        assert_eq!(SensorAccuracy::new(1.0).map(SensorAccuracy::get), Ok(1.0));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            SensorAccuracy::new(-0.1),
            Err(AccuracyError::OutOfRange { value: -0.1 })
        );
        assert!(SensorAccuracy::try_from(1.000_001).is_err());
        assert!(SensorAccuracy::new(f64::INFINITY).is_err());
        assert!(SensorAccuracy::new(f64::NAN).is_err());
    }

    #[test]
    fn test_perfect_sensor_never_misses() {
        assert_eq!(SensorAccuracy::PERFECT.miss_probability(), 0.0);
    }

    #[test]
    fn test_miss_probability_among_palette() {
        let accuracy = SensorAccuracy::new(0.4).unwrap();
        assert_eq!(accuracy.miss_probability_among(2), 0.6);
        assert_eq!(accuracy.miss_probability_among(4), accuracy.miss_probability());
        assert_eq!(accuracy.miss_probability_among(1), 0.0);
        assert_eq!(accuracy.miss_probability_among(0), 0.0);
    }

    #[test]
    fn test_default() {
        assert_eq!(SensorAccuracy::default().get(), 0.88);
        assert_eq!(
            AccuracyError::OutOfRange { value: 2.0 }.to_string(),
            "sensor accuracy must be within [0, 1], got 2"
        );
    }
}
