//! Calculations on sexagesimal literals
//!
//! - [`evaluate`]: free-form expressions such as `1;2 -- 3;1`
//! - [`Operation`]: one binary operation on two literals
//! - [`to_float`] / [`from_float`]: conversions to and from decimal floats

pub mod parser;

pub use parser::{evaluate, evaluate_with_precision};

use crate::sexagesimal::{ArithmeticError, ParseError, Sexagesimal, Truncated};
use std::fmt;
use std::str::FromStr;

/// A binary operation between two literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operation {
    pub const ALL: [Operation; 4] = [Operation::Add, Operation::Sub, Operation::Mul, Operation::Div];

    pub fn symbol(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Sub => '-',
            Operation::Mul => '*',
            Operation::Div => '/',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Sub => "sub",
            Operation::Mul => "mul",
            Operation::Div => "div",
        }
    }

    /// Apply the operation to two literals
    ///
    /// The right operand is negated through the expression grammar when it
    /// carries a sign, so `1;0 sub -0;30` is `1;30`.
    pub fn apply(&self, a: &str, b: &str) -> Result<Truncated, ParseError> {
        evaluate(&format!("{}{}{}", a.trim(), self.symbol(), b.trim()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == key || op.symbol().to_string() == key)
            .ok_or_else(|| ParseError::InvalidSyntax(s.to_string()))
    }
}

/// Decimal value of a literal
pub fn to_float(literal: &str) -> Result<f64, ParseError> {
    Ok(literal.parse::<Sexagesimal>()?.to_f64())
}

/// Sexagesimal value of a float, truncated to `places` with its remainder
pub fn from_float(value: f64, places: usize) -> Result<Truncated, ArithmeticError> {
    Sexagesimal::from_f64(value, places)
}
