//! Exact base-60 numbers
//!
//! This module provides the [`Sexagesimal`] value type used throughout the
//! crate. Historical astronomical tables express every quantity in base 60:
//! `1,47;18,48` reads as `1×60 + 47` degrees plus `18/60 + 48/3600`.
//!
//! ## Internal storage
//!
//! A value is kept as a signed big integer scaled by `60^places`, where
//! `places` is the number of fractional base-60 digits. Addition, subtraction,
//! multiplication and shifts are exact. Division only terminates for some
//! divisors, so it takes an explicit precision and hands back the exact
//! leftover as a [`Truncated`] result.
//!
//! ## Examples
//!
//! ```rust
//! use alphonsine::sexagesimal::Sexagesimal;
//!
//! let a: Sexagesimal = "1;30".parse().unwrap();
//! let b: Sexagesimal = "0;45".parse().unwrap();
//! assert_eq!((&a + &b).to_string(), "2;15");
//! assert_eq!(format!("{:#}", a * b), "01 ; 07,30");
//! ```

pub mod angle;

pub use angle::{mod360, Angle, Unit};

use num::bigint::{BigInt, Sign};
use num::rational::BigRational;
use num::{Integer, One, Signed, ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Shl, Shr, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Numeric base of the notation
pub const BASE: u32 = 60;

/// Errors raised while reading sexagesimal text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text does not follow the `digits,digits;digits` grammar
    #[error("Invalid sexagesimal literal: {0:?}")]
    InvalidLiteral(String),

    /// A digit group is not below 60
    #[error("Digit group {group} out of range in {text:?} (must be below 60)")]
    DigitOutOfRange {
        /// The offending literal
        text: String,
        /// The group that was too large
        group: u64,
    },

    /// An arithmetic expression could not be parsed
    #[error("Invalid syntax : {0}")]
    InvalidSyntax(String),

    /// An arithmetic expression divides by zero
    #[error("Division by zero in: {0}")]
    DivisionByZero(String),
}

/// Errors raised by inexact arithmetic
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArithmeticError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Cannot represent non-finite value {0} in base 60")]
    NonFinite(f64),
}

fn scale(places: usize) -> BigInt {
    num::pow(BigInt::from(BASE), places)
}

/// An exact base-60 number
///
/// Equality and ordering compare numeric values, so `1;30` equals `1;30,0`
/// even though the second carries one more fractional place.
#[derive(Debug, Clone)]
pub struct Sexagesimal {
    /// Value multiplied by `60^places`
    scaled: BigInt,
    /// Number of fractional base-60 digits
    places: usize,
}

/// Result of truncating a value to a fixed number of fractional places
///
/// `remainder` is the exact part that did not fit, measured in units of the
/// last retained place, so the untruncated magnitude is
/// `|value| + remainder × 60^-places`. It always lies in `[0, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Truncated {
    pub value: Sexagesimal,
    pub remainder: BigRational,
}

impl Truncated {
    /// Whether nothing was lost
    pub fn is_exact(&self) -> bool {
        self.remainder.is_zero()
    }

    /// Remainder as a float, for display
    pub fn remainder_f64(&self) -> f64 {
        self.remainder.to_f64().unwrap_or(0.0)
    }

    /// Drop the remainder explicitly
    pub fn into_value(self) -> Sexagesimal {
        self.value
    }
}

impl Sexagesimal {
    /// The value zero
    pub fn zero() -> Self {
        Self {
            scaled: BigInt::zero(),
            places: 0,
        }
    }

    /// An integer value with no fractional places
    pub fn from_int(value: i64) -> Self {
        Self {
            scaled: BigInt::from(value),
            places: 0,
        }
    }

    /// Build a value from explicit digits
    ///
    /// Every digit must be below 60.
    ///
    /// ```rust
    /// use alphonsine::sexagesimal::Sexagesimal;
    ///
    /// let v = Sexagesimal::from_digits(false, &[1, 47], &[18, 48]).unwrap();
    /// assert_eq!(v.to_string(), "1,47;18,48");
    /// ```
    pub fn from_digits(
        negative: bool,
        integer: &[u8],
        fractional: &[u8],
    ) -> Result<Self, ParseError> {
        let digits: Vec<u8> = integer.iter().chain(fractional).copied().collect();
        if let Some(&bad) = digits.iter().find(|&&d| u32::from(d) >= BASE) {
            return Err(ParseError::DigitOutOfRange {
                text: format!("{:?};{:?}", integer, fractional),
                group: u64::from(bad),
            });
        }
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        let scaled = BigInt::from_radix_be(sign, &digits, BASE).ok_or_else(|| {
            ParseError::InvalidLiteral(format!("{:?};{:?}", integer, fractional))
        })?;
        Ok(Self {
            scaled,
            places: fractional.len(),
        })
    }

    /// Exact conversion of a rational, truncated toward zero
    pub fn from_rational(value: &BigRational, places: usize) -> Truncated {
        let shifted = value * BigRational::from_integer(scale(places));
        let kept = shifted.trunc();
        let remainder = (&shifted - &kept).abs();
        Truncated {
            value: Self {
                scaled: kept.to_integer(),
                places,
            },
            remainder,
        }
    }

    /// Convert a float to base 60, truncated to `places` fractional digits
    ///
    /// The binary float is converted exactly before truncation, so the
    /// remainder accounts for every bit of the input.
    pub fn from_f64(value: f64, places: usize) -> Result<Truncated, ArithmeticError> {
        let exact = BigRational::from_float(value).ok_or(ArithmeticError::NonFinite(value))?;
        Ok(Self::from_rational(&exact, places))
    }

    /// Exact value as a rational number
    pub fn to_rational(&self) -> BigRational {
        BigRational::new(self.scaled.clone(), scale(self.places))
    }

    /// Nearest float
    pub fn to_f64(&self) -> f64 {
        self.to_rational().to_f64().unwrap_or(f64::NAN)
    }

    /// Number of fractional places carried by this value
    pub fn places(&self) -> usize {
        self.places
    }

    pub fn is_zero(&self) -> bool {
        self.scaled.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.scaled.is_negative()
    }

    /// -1, 0 or 1
    pub fn signum(&self) -> i32 {
        match self.scaled.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            scaled: self.scaled.abs(),
            places: self.places,
        }
    }

    /// Base-60 digits of the integer part, most significant first
    pub fn integer_digits(&self) -> Vec<u8> {
        let integer = self.scaled.abs() / scale(self.places);
        integer.to_radix_be(BASE).1
    }

    /// Base-60 digits of the fractional part, exactly `places` of them
    pub fn fractional_digits(&self) -> Vec<u8> {
        if self.places == 0 {
            return Vec::new();
        }
        let fraction = self.scaled.abs() % scale(self.places);
        let digits = fraction.to_radix_be(BASE).1;
        let mut padded = vec![0; self.places.saturating_sub(digits.len())];
        padded.extend(digits);
        padded
    }

    /// Scaled integer at a finer (or equal) number of places
    fn scaled_at(&self, places: usize) -> BigInt {
        debug_assert!(places >= self.places);
        &self.scaled * scale(places - self.places)
    }

    fn aligned(&self, other: &Self) -> (BigInt, BigInt, usize) {
        let places = self.places.max(other.places);
        (self.scaled_at(places), other.scaled_at(places), places)
    }

    /// Same value expressed with at least `places` fractional digits
    pub fn with_places(&self, places: usize) -> Self {
        if places <= self.places {
            return self.clone();
        }
        Self {
            scaled: self.scaled_at(places),
            places,
        }
    }

    /// Same value without trailing zero places
    pub fn trimmed(&self) -> Self {
        let base = BigInt::from(BASE);
        let mut scaled = self.scaled.clone();
        let mut places = self.places;
        while places > 0 && (&scaled % &base).is_zero() {
            scaled /= &base;
            places -= 1;
        }
        Self { scaled, places }
    }

    /// Cut the value to `places` fractional digits, keeping the leftover
    pub fn truncate(&self, places: usize) -> Truncated {
        if places >= self.places {
            return Truncated {
                value: self.with_places(places),
                remainder: BigRational::zero(),
            };
        }
        Self::from_rational(&self.to_rational(), places)
    }

    /// Round to `places` fractional digits, halves away from zero
    pub fn round(&self, places: usize) -> Self {
        let Truncated { value, remainder } = self.truncate(places);
        let half = BigRational::new(BigInt::one(), BigInt::from(2));
        if remainder < half {
            return value;
        }
        let step = if self.is_negative() { -1 } else { 1 };
        Self {
            scaled: value.scaled + BigInt::from(step),
            places,
        }
    }

    /// Largest integer not above the value
    pub fn floor(&self) -> Self {
        Self {
            scaled: self.scaled.div_floor(&scale(self.places)),
            places: 0,
        }
    }

    /// `self - floor(self)`, always in `[0, 1)`
    pub fn fract(&self) -> Self {
        self - &self.floor()
    }

    /// Divide, truncating the quotient to `places` fractional digits
    pub fn div(&self, rhs: &Self, places: usize) -> Result<Truncated, ArithmeticError> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(Self::from_rational(&(self.to_rational() / rhs.to_rational()), places))
    }

    /// Divide by a small integer, truncating to `places` fractional digits
    pub fn div_int(&self, divisor: i64, places: usize) -> Result<Truncated, ArithmeticError> {
        self.div(&Self::from_int(divisor), places)
    }

    /// Euclidean remainder, always in `[0, |divisor|)`
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    pub fn rem_euclid(&self, divisor: &Self) -> Self {
        let (value, modulus, places) = self.aligned(divisor);
        Self {
            scaled: value.mod_floor(&modulus.abs()),
            places,
        }
    }

    fn add_impl(&self, rhs: &Self) -> Self {
        let (a, b, places) = self.aligned(rhs);
        Self {
            scaled: a + b,
            places,
        }
    }

    fn sub_impl(&self, rhs: &Self) -> Self {
        let (a, b, places) = self.aligned(rhs);
        Self {
            scaled: a - b,
            places,
        }
    }

    fn mul_impl(&self, rhs: &Self) -> Self {
        Self {
            scaled: &self.scaled * &rhs.scaled,
            places: self.places + rhs.places,
        }
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $body:ident) => {
        impl<'a> $imp<&'a Sexagesimal> for &'a Sexagesimal {
            type Output = Sexagesimal;
            fn $method(self, rhs: &'a Sexagesimal) -> Sexagesimal {
                Sexagesimal::$body(self, rhs)
            }
        }

        impl $imp<Sexagesimal> for Sexagesimal {
            type Output = Sexagesimal;
            fn $method(self, rhs: Sexagesimal) -> Sexagesimal {
                Sexagesimal::$body(&self, &rhs)
            }
        }

        impl<'a> $imp<&'a Sexagesimal> for Sexagesimal {
            type Output = Sexagesimal;
            fn $method(self, rhs: &'a Sexagesimal) -> Sexagesimal {
                Sexagesimal::$body(&self, rhs)
            }
        }

        impl<'a> $imp<Sexagesimal> for &'a Sexagesimal {
            type Output = Sexagesimal;
            fn $method(self, rhs: Sexagesimal) -> Sexagesimal {
                Sexagesimal::$body(self, &rhs)
            }
        }
    };
}

forward_binop!(Add, add, add_impl);
forward_binop!(Sub, sub, sub_impl);
forward_binop!(Mul, mul, mul_impl);

impl Neg for Sexagesimal {
    type Output = Sexagesimal;
    fn neg(self) -> Sexagesimal {
        Sexagesimal {
            scaled: -self.scaled,
            places: self.places,
        }
    }
}

impl Neg for &Sexagesimal {
    type Output = Sexagesimal;
    fn neg(self) -> Sexagesimal {
        -self.clone()
    }
}

/// Divide by `60^n` (moves every digit `n` places to the right)
impl Shr<u32> for Sexagesimal {
    type Output = Sexagesimal;
    fn shr(self, n: u32) -> Sexagesimal {
        Sexagesimal {
            scaled: self.scaled,
            places: self.places + n as usize,
        }
    }
}

impl Shr<u32> for &Sexagesimal {
    type Output = Sexagesimal;
    fn shr(self, n: u32) -> Sexagesimal {
        self.clone() >> n
    }
}

/// Multiply by `60^n` (moves every digit `n` places to the left)
impl Shl<u32> for Sexagesimal {
    type Output = Sexagesimal;
    fn shl(self, n: u32) -> Sexagesimal {
        let n = n as usize;
        if n <= self.places {
            Sexagesimal {
                scaled: self.scaled,
                places: self.places - n,
            }
        } else {
            Sexagesimal {
                scaled: self.scaled * scale(n - self.places),
                places: 0,
            }
        }
    }
}

impl Shl<u32> for &Sexagesimal {
    type Output = Sexagesimal;
    fn shl(self, n: u32) -> Sexagesimal {
        self.clone() << n
    }
}

impl PartialEq for Sexagesimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Sexagesimal {}

impl PartialOrd for Sexagesimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sexagesimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b, _) = self.aligned(other);
        a.cmp(&b)
    }
}

impl Default for Sexagesimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Sexagesimal {
    fn from(value: i64) -> Self {
        Self::from_int(value)
    }
}

impl From<i32> for Sexagesimal {
    fn from(value: i32) -> Self {
        Self::from_int(i64::from(value))
    }
}

impl From<u32> for Sexagesimal {
    fn from(value: u32) -> Self {
        Self::from_int(i64::from(value))
    }
}

fn parse_groups(part: &str, text: &str) -> Result<Vec<u8>, ParseError> {
    part.split(',')
        .map(|group| {
            let group = group.trim();
            if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseError::InvalidLiteral(text.to_string()));
            }
            let value: u64 = group
                .parse()
                .map_err(|_| ParseError::InvalidLiteral(text.to_string()))?;
            if value >= u64::from(BASE) {
                return Err(ParseError::DigitOutOfRange {
                    text: text.to_string(),
                    group: value,
                });
            }
            Ok(value as u8)
        })
        .collect()
}

impl FromStr for Sexagesimal {
    type Err = ParseError;

    /// Parse `sign? groups (';' groups)?`, e.g. `-1,47;18,48` or `05,22 ; 56,25`
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let (negative, body) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (integer, fractional) = match body.split_once(';') {
            Some((int_part, frac_part)) => {
                if frac_part.contains(';') {
                    return Err(ParseError::InvalidLiteral(text.to_string()));
                }
                (
                    parse_groups(int_part, text)?,
                    parse_groups(frac_part, text)?,
                )
            }
            None => (parse_groups(body, text)?, Vec::new()),
        };

        Self::from_digits(negative, &integer, &fractional)
    }
}

impl fmt::Display for Sexagesimal {
    /// Compact form `1,47;18,48`; the alternate form `{:#}` pads every
    /// group to two digits and spaces the separator: `01,47 ; 18,48`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let padded = f.alternate();
        let join = |digits: &[u8]| -> String {
            digits
                .iter()
                .map(|d| {
                    if padded {
                        format!("{:02}", d)
                    } else {
                        d.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(",")
        };

        if self.is_negative() {
            write!(f, "-")?;
        }
        write!(f, "{}", join(&self.integer_digits()))?;
        if self.places > 0 {
            let separator = if padded { " ; " } else { ";" };
            write!(f, "{}{}", separator, join(&self.fractional_digits()))?;
        }
        Ok(())
    }
}

/// Values travel through JSON as their compact text form
impl Serialize for Sexagesimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Sexagesimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn sx(text: &str) -> Sexagesimal {
        text.parse().unwrap()
    }

    #[rstest]
    #[case("1;2", "1;2")]
    #[case("1,47;18,48", "1,47;18,48")]
    #[case("05,22 ; 56,25", "5,22;56,25")]
    #[case("-0;30", "-0;30")]
    #[case("+4;2", "4;2")]
    #[case("0", "0")]
    #[case("3,0,0", "3,0,0")]
    fn test_parse_and_display(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(sx(text).to_string(), expected);
    }

    #[rstest]
    #[case("1;60")]
    #[case("61")]
    #[case("1;;2")]
    #[case("1;2;3")]
    #[case("1,;2")]
    #[case("1;a")]
    #[case("")]
    #[case("--1")]
    fn test_parse_rejects_malformed(#[case] text: &str) {
        assert!(text.parse::<Sexagesimal>().is_err(), "{text} should fail");
    }

    #[test]
    fn test_out_of_range_group_is_reported() {
        match "1;75".parse::<Sexagesimal>() {
            Err(ParseError::DigitOutOfRange { group, .. }) => assert_eq!(group, 75),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[rstest]
    #[case("1,47;18,48")]
    #[case("-0;0,0,1")]
    #[case("59;59,59,59")]
    #[case("2,3,4;5")]
    fn test_literal_round_trip(#[case] text: &str) {
        let parsed = sx(text);
        assert_eq!(sx(&parsed.to_string()), parsed);
        assert_eq!(sx(&format!("{:#}", parsed)), parsed);
    }

    #[test]
    fn test_alternate_display() {
        assert_eq!(format!("{:#}", sx("3,16;11,46")), "03,16 ; 11,46");
        assert_eq!(format!("{:#}", sx("25;15,0")), "25 ; 15,00");
    }

    #[test]
    fn test_digits() {
        let v = sx("-1,47;18,48,0");
        assert_eq!(v.integer_digits(), vec![1, 47]);
        assert_eq!(v.fractional_digits(), vec![18, 48, 0]);
        assert_eq!(v.places(), 3);
        assert!(v.is_negative());
        assert_eq!(sx("0;0,5").fractional_digits(), vec![0, 5]);
    }

    #[test]
    fn test_exact_arithmetic() {
        assert_eq!(sx("1;2") + sx("3"), sx("4;2"));
        assert_eq!(sx("0;10") - sx("3"), sx("-2;50"));
        assert_eq!(sx("1;2") * sx("2"), sx("2;4"));
        assert_eq!(sx("50;30,1") * sx("0;30"), sx("25;15,0,30"));
        assert_eq!(-sx("1;1"), sx("-1;1"));
    }

    #[test]
    fn test_equality_ignores_trailing_places() {
        assert_eq!(sx("1;30"), sx("1;30,0,0"));
        assert!(sx("1;30") < sx("1;30,0,1"));
        assert_eq!(sx("1;30,0,0").trimmed().places(), 1);
    }

    #[test]
    fn test_division_truncates_with_remainder() {
        let result = sx("1").div(&sx("7"), 2).unwrap();
        // 1/7 = 0;8,34,17,...
        assert_eq!(result.value, sx("0;8,34"));
        assert!(!result.is_exact());
        assert!(result.remainder < BigRational::one());

        let exact = sx("2;2").div(&sx("2"), 1).unwrap();
        assert_eq!(exact.value, sx("1;1"));
        assert!(exact.is_exact());

        assert_eq!(
            sx("1").div(&Sexagesimal::zero(), 2),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn test_truncate_keeps_remainder() {
        let t = sx("25;15,0,30").truncate(2);
        assert_eq!(t.value, sx("25;15,0"));
        assert_relative_eq!(t.remainder_f64(), 0.5);
    }

    #[test]
    fn test_round() {
        assert_eq!(sx("1;2,30").round(1), sx("1;3"));
        assert_eq!(sx("1;2,29").round(1), sx("1;2"));
        assert_eq!(sx("-1;2,30").round(1), sx("-1;3"));
    }

    #[test]
    fn test_shifts() {
        assert_eq!(sx("30") >> 1, sx("0;30"));
        assert_eq!(sx("1;2,3") << 1, sx("1,2;3"));
        assert_eq!(sx("1") << 2, sx("1,0,0"));
        assert_eq!((sx("0;30") >> 1) << 1, sx("0;30"));
    }

    #[test]
    fn test_rem_euclid_is_non_negative() {
        let full = Sexagesimal::from_int(360);
        assert_eq!(sx("-10").rem_euclid(&full), sx("5,50"));
        assert_eq!(sx("6,10;30").rem_euclid(&full), sx("10;30"));
        assert_eq!(sx("6,0").rem_euclid(&full), Sexagesimal::zero());
    }

    #[test]
    fn test_floor_and_fract() {
        assert_eq!(sx("2;30").floor(), sx("2"));
        assert_eq!(sx("-2;30").floor(), sx("-3"));
        assert_eq!(sx("-2;30").fract(), sx("0;30"));
    }

    #[test]
    fn test_float_conversions() {
        let t = Sexagesimal::from_f64(4.5, 1).unwrap();
        assert_eq!(t.value, sx("4;30"));
        assert!(t.is_exact());
        assert_relative_eq!(sx("-1;1").to_f64(), -1.0166666666666666);
        assert!(Sexagesimal::from_f64(f64::NAN, 2).is_err());

        let third = Sexagesimal::from_f64(1.0 / 3.0, 1).unwrap();
        assert_eq!(third.value, sx("0;19"));
        assert!(!third.is_exact());
    }

    #[test]
    fn test_serde_uses_text_form() {
        let json = serde_json::to_string(&sx("1,11;25,23")).unwrap();
        assert_eq!(json, "\"1,11;25,23\"");
        let back: Sexagesimal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sx("1,11;25,23"));
        assert!(serde_json::from_str::<Sexagesimal>("\"1;75\"").is_err());
    }
}
