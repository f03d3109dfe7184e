//! Sexagesimal expression evaluator
//!
//! Expressions use the four binary operators and sexagesimal literals, with
//! no parentheses. Whitespace is ignored and every run of signs collapses to
//! one (`--` is `+`, `--+` is `+`, `-+-` is `+`, `-` alone stays `-`).
//!
//! Evaluation does not follow the usual precedence rules: the expression is
//! split at its first `+`, or failing that at its first `-`, and both sides
//! are evaluated recursively. Multiplications and divisions are only split
//! once no sign remains, at the first `*`, or failing that at the first `/`.
//! So `2;2 / 2 + 1` is `(2;2 / 2) + 1`, `-1 + 2` is `(-1) + 2` and
//! `5 - 1 + 1` is `(5 - 1) + 1`, but `5 - 1 - 1` is `5 - (1 - 1)`.
//!
//! Values are combined exactly as rationals and truncated once, at the end.

use crate::sexagesimal::{ParseError, Sexagesimal, Truncated};
use lazy_static::lazy_static;
use num::rational::BigRational;
use num::Zero;
use regex::{Captures, Regex};

lazy_static! {
    /// Maximal runs of signs
    static ref SIGN_RUN: Regex = Regex::new(r"[+-]{2,}").expect("valid sign regex");

    /// `digitgroups(;digitgroups)?`
    static ref LITERAL: Regex =
        Regex::new(r"^(\d+,)*\d+(;(\d+,)*\d+)?$").expect("valid literal regex");
}

/// Remove whitespace and collapse sign runs
fn normalize(expression: &str) -> String {
    let compact: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    SIGN_RUN
        .replace_all(&compact, |caps: &Captures| {
            let minus = caps[0].chars().filter(|&c| c == '-').count();
            if minus % 2 == 1 {
                "-"
            } else {
                "+"
            }
        })
        .into_owned()
}

/// Recursive evaluation, tracking the finest literal precision seen
fn eval(expression: &str, places: &mut usize) -> Result<BigRational, ParseError> {
    let additive = expression
        .find('+')
        .map(|i| (i, false))
        .or_else(|| expression.find('-').map(|i| (i, true)));
    if let Some((index, negate)) = additive {
        let (left, right) = (&expression[..index], &expression[index + 1..]);
        if right.is_empty() {
            return Err(ParseError::InvalidSyntax(expression.to_string()));
        }
        let rhs = eval(right, places)?;
        if left.is_empty() {
            return Ok(if negate { -rhs } else { rhs });
        }
        let lhs = eval(left, places)?;
        return Ok(if negate { lhs - rhs } else { lhs + rhs });
    }

    let split = expression
        .find('*')
        .map(|i| (i, '*'))
        .or_else(|| expression.find('/').map(|i| (i, '/')));
    if let Some((index, op)) = split {
        let (left, right) = (&expression[..index], &expression[index + 1..]);
        if left.is_empty() || right.is_empty() {
            return Err(ParseError::InvalidSyntax(expression.to_string()));
        }
        let lhs = eval(left, places)?;
        let rhs = eval(right, places)?;
        return match op {
            '*' => Ok(lhs * rhs),
            _ if rhs.is_zero() => Err(ParseError::DivisionByZero(expression.to_string())),
            _ => Ok(lhs / rhs),
        };
    }

    literal(expression, places)
}

fn literal(text: &str, places: &mut usize) -> Result<BigRational, ParseError> {
    if !LITERAL.is_match(text) {
        return Err(ParseError::InvalidSyntax(text.to_string()));
    }
    let value: Sexagesimal = text.parse()?;
    *places = (*places).max(value.places());
    Ok(value.to_rational())
}

/// Evaluate an expression, truncating to the finest literal precision
///
/// ```rust
/// use alphonsine::calculations::evaluate;
///
/// let result = evaluate("1;1 + 3 * 1;1").unwrap();
/// assert_eq!(result.value.to_string(), "4;4");
/// ```
pub fn evaluate(expression: &str) -> Result<Truncated, ParseError> {
    evaluate_inner(expression, None)
}

/// Evaluate an expression, truncating to `places` fractional digits
pub fn evaluate_with_precision(expression: &str, places: usize) -> Result<Truncated, ParseError> {
    evaluate_inner(expression, Some(places))
}

fn evaluate_inner(expression: &str, precision: Option<usize>) -> Result<Truncated, ParseError> {
    let normalized = normalize(expression);
    if normalized.is_empty() {
        return Err(ParseError::InvalidSyntax(expression.to_string()));
    }
    let mut places = 0;
    let exact = eval(&normalized, &mut places)?;
    Ok(Sexagesimal::from_rational(&exact, precision.unwrap_or(places)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::BigInt;
    use rstest::rstest;

    fn sx(text: &str) -> Sexagesimal {
        text.parse().unwrap()
    }

    #[rstest]
    #[case("1;2", "1;2")]
    #[case("1;2 + 3", "4;2")]
    #[case("+4;2 - 3", "1;2")]
    #[case("0;10 - 3", "-2;50")]
    #[case("1;2 -- 3;1", "4;3")]
    #[case("1;2 --+ 3;1", "4;3")]
    #[case("1;2,10 + 3;1", "4;3,10")]
    #[case("1;2 * 2", "2;4")]
    #[case("2;2 / 2", "1;1")]
    #[case("2;2 / 2 + 1", "2;1")]
    #[case("1;1 + 3 * 1;1", "4;4")]
    #[case("-1;1", "-1;1")]
    #[case("1,0;0 / 3,0", "0;20")]
    fn test_evaluate(#[case] expression: &str, #[case] expected: &str) {
        assert_eq!(evaluate(expression).unwrap().value, sx(expected));
    }

    #[rstest]
    #[case("1;1a + 3 * 1;1")]
    #[case("1;1 + *3 * 1;1")]
    #[case("1;1 + 3 */ 1;1")]
    #[case("1;2 +")]
    #[case("")]
    #[case("1;;2")]
    fn test_invalid_syntax(#[case] expression: &str) {
        let err = evaluate(expression).unwrap_err();
        assert!(err.to_string().contains("Invalid syntax"), "{err}");
    }

    #[test]
    fn test_error_carries_offending_text() {
        assert_eq!(
            evaluate("1;1a + 3").unwrap_err(),
            ParseError::InvalidSyntax("1;1a".to_string())
        );
    }

    #[test]
    fn test_sign_runs() {
        assert_eq!(normalize("1 - - 2"), "1+2");
        assert_eq!(normalize("1 -+- 2"), "1+2");
        assert_eq!(normalize("1 --- 2"), "1-2");
        assert_eq!(normalize(" - 2"), "-2");
    }

    #[rstest]
    #[case("-1 + 2", "1")]
    #[case("5 - 1 + 1", "5")]
    #[case("5 - 1 - 1", "5")]
    #[case("-0;30 + 1 - 0;10", "0;20")]
    #[case("1 - 2 * 3", "-5")]
    fn test_plus_splits_before_minus(#[case] expression: &str, #[case] expected: &str) {
        assert_eq!(evaluate(expression).unwrap().value, sx(expected));
    }

    #[test]
    fn test_remainder_is_kept() {
        let result = evaluate("50;30,1 * 0;30").unwrap();
        assert_eq!(result.value, sx("25;15,0"));
        assert_eq!(result.remainder, BigRational::new(BigInt::from(1), BigInt::from(2)));

        let third = evaluate("1 / 3").unwrap();
        assert_eq!(third.value, sx("0"));
        assert!(!third.is_exact());
        assert_eq!(evaluate_with_precision("1 / 3", 1).unwrap().value, sx("0;20"));
    }

    #[test]
    fn test_out_of_range_digit_group() {
        assert!(matches!(
            evaluate("1;75 + 1"),
            Err(ParseError::DigitOutOfRange { .. })
        ));
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(
            evaluate("1 / 0;0"),
            Err(ParseError::DivisionByZero(_))
        ));
    }
}
