//! # Angle Representation Module
//!
//! An [`Angle`] is a [`Sexagesimal`] value tagged with the unit it is
//! measured in. Historical tables tabulate both arcs (degrees) and time
//! intervals (days) in the same base-60 notation, so the unit travels with
//! the value instead of being implied by context.
//!
//! ## Normalization
//!
//! [`Angle::normalized`] reduces an angle modulo 360 into `[0, 360)` while
//! keeping its unit. Normalizing twice is the same as normalizing once.
//!
//! ## Examples
//!
//! ```rust
//! use alphonsine::sexagesimal::{Angle, Unit};
//!
//! let angle = Angle::from_degrees("6,10;30".parse().unwrap());
//! assert_eq!(angle.normalized().value().to_string(), "10;30");
//! assert_eq!(angle.unit(), Unit::Degree);
//! ```

use super::Sexagesimal;
use lazy_static::lazy_static;
use std::fmt;

lazy_static! {
    /// One full turn, 6,0 degrees
    pub static ref FULL_CIRCLE: Sexagesimal = Sexagesimal::from_int(360);
}

/// Reduce a value modulo 360 into `[0, 360)`
pub fn mod360(value: &Sexagesimal) -> Sexagesimal {
    value.rem_euclid(&FULL_CIRCLE)
}

/// Unit carried by an [`Angle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Arc degrees
    Degree,
    /// Days of time
    Day,
}

impl Unit {
    /// Short symbol used when displaying values
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Degree => "°",
            Unit::Day => "d",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Unit::Degree => "degree",
            Unit::Day => "day",
        }
    }
}

/// A sexagesimal quantity with a unit
///
/// The value is stored exactly as provided; normalization only happens when
/// explicitly requested via [`Angle::normalized`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Angle {
    value: Sexagesimal,
    unit: Unit,
}

impl Angle {
    pub fn new(value: Sexagesimal, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Creates an angle measured in degrees
    pub fn from_degrees(value: Sexagesimal) -> Self {
        Self::new(value, Unit::Degree)
    }

    /// Creates an angle measured in days
    pub fn from_days(value: Sexagesimal) -> Self {
        Self::new(value, Unit::Day)
    }

    pub fn value(&self) -> &Sexagesimal {
        &self.value
    }

    pub fn into_value(self) -> Sexagesimal {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The same angle reduced into `[0, 360)` in the same unit
    pub fn normalized(&self) -> Self {
        Self {
            value: mod360(&self.value),
            unit: self.unit,
        }
    }

    /// The angle rounded to `places` fractional digits
    pub fn rounded(&self, places: usize) -> Self {
        Self {
            value: self.value.round(places),
            unit: self.unit,
        }
    }

    /// Nearest float in the angle's own unit
    pub fn to_f64(&self) -> f64 {
        self.value.to_f64()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{:#}{}", self.value, self.unit.symbol())
        } else {
            write!(f, "{}{}", self.value, self.unit.symbol())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sx(text: &str) -> Sexagesimal {
        text.parse().unwrap()
    }

    #[rstest]
    #[case("0")]
    #[case("5,59;59,59")]
    #[case("6,0")]
    #[case("-0;0,1")]
    #[case("-12,0;30")]
    #[case("1,0,0;1")]
    fn test_normalization_range_and_idempotence(#[case] text: &str) {
        let angle = Angle::from_degrees(sx(text));
        let once = angle.normalized();
        assert!(*once.value() >= Sexagesimal::zero());
        assert!(*once.value() < *FULL_CIRCLE);
        assert_eq!(once.normalized(), once);
    }

    #[test]
    fn test_normalization_keeps_unit() {
        let days = Angle::from_days(sx("7,0"));
        let normalized = days.normalized();
        assert_eq!(normalized.unit(), Unit::Day);
        assert_eq!(*normalized.value(), sx("1,0"));
    }

    #[test]
    fn test_negative_angles_wrap_upwards() {
        let angle = Angle::from_degrees(sx("-0;30"));
        assert_eq!(*angle.normalized().value(), sx("5,59;30"));
    }

    #[test]
    fn test_display() {
        let angle = Angle::from_degrees(sx("3,16;11,46"));
        assert_eq!(angle.to_string(), "3,16;11,46°");
        assert_eq!(format!("{:#}", angle), "03,16 ; 11,46°");
    }
}
