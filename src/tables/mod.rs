//! Symmetry-compressed lookup tables
//!
//! Historical tables only print part of a function's domain and state, in
//! the margin, how the rest follows from it: "the second half is the first
//! read backwards", "the second half has the opposite sign", "the table
//! repeats every so many degrees". A [`SymmetricTable`] stores the printed
//! samples plus those rules and answers lookups over the whole domain.
//!
//! # Main Components
//!
//! - [`SymmetricTable`]: samples, symmetries, forward and reverse lookup
//! - [`Symmetry`]: mirror, anti-mirror and periodic rules
//! - `ascension`: latitude-interpolated oblique ascension and right ascension
//! - `source`: providers of raw table data

pub mod ascension;
pub mod source;

pub use ascension::{ObliqueAscension, RightAscension};
pub use source::{DirectoryTableSource, MemoryTableSource, RawTable, TableId, TableSource};

use crate::sexagesimal::Sexagesimal;
use num::rational::BigRational;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Upper bound on rule passes while resolving one argument
const MAX_RESOLUTION_PASSES: usize = 16;

/// Error type for table construction and lookup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// No symmetry brings the argument into the stored samples
    #[error("Argument {argument} cannot be resolved into the table domain [{first}, {last}]")]
    Domain {
        argument: String,
        first: String,
        last: String,
    },

    #[error("Table has no samples")]
    Empty,

    #[error("Table arguments must be strictly increasing (sample {0})")]
    UnsortedArguments(usize),

    #[error("Value column is not strictly monotonic (sample {0}), cannot reverse")]
    NotMonotonic(usize),

    #[error("Tables sampled at different arguments cannot be blended")]
    IncompatibleTables,

    #[error("Periodic symmetry needs a positive period, got {0}")]
    InvalidPeriod(String),

    #[error("Latitude {0} is not a finite number")]
    InvalidLatitude(f64),
}

/// Result type for table operations
pub type Result<T> = std::result::Result<T, TableError>;

/// A rule extending a table beyond its stored samples
///
/// Mirror axes default to the last stored argument when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Symmetry {
    /// `f(2a - x) = f(x)`
    Mirror {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        axis: Option<Sexagesimal>,
    },
    /// `f(2a - x) = -f(x)`
    AntiMirror {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        axis: Option<Sexagesimal>,
    },
    /// `f(x + p) = f(x)`
    Periodic { period: Sexagesimal },
}

impl Symmetry {
    pub fn mirror() -> Self {
        Symmetry::Mirror { axis: None }
    }

    pub fn anti_mirror() -> Self {
        Symmetry::AntiMirror { axis: None }
    }

    pub fn periodic(period: Sexagesimal) -> Self {
        Symmetry::Periodic { period }
    }
}

/// A sampled function with symmetry rules and linear interpolation
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricTable {
    arguments: Vec<Sexagesimal>,
    values: Vec<Sexagesimal>,
    symmetries: Vec<Symmetry>,
}

impl SymmetricTable {
    /// Create a table from `(argument, value)` samples
    ///
    /// Arguments must be strictly increasing and periodic rules must have a
    /// positive period.
    pub fn new(samples: Vec<(Sexagesimal, Sexagesimal)>, symmetries: Vec<Symmetry>) -> Result<Self> {
        if samples.is_empty() {
            return Err(TableError::Empty);
        }
        if let Some(index) = samples.windows(2).position(|w| w[0].0 >= w[1].0) {
            return Err(TableError::UnsortedArguments(index + 1));
        }
        for rule in &symmetries {
            if let Symmetry::Periodic { period } = rule {
                if *period <= Sexagesimal::zero() {
                    return Err(TableError::InvalidPeriod(period.to_string()));
                }
            }
        }

        let (arguments, values) = samples.into_iter().unzip();
        Ok(Self {
            arguments,
            values,
            symmetries,
        })
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub fn symmetries(&self) -> &[Symmetry] {
        &self.symmetries
    }

    pub fn arguments(&self) -> &[Sexagesimal] {
        &self.arguments
    }

    pub fn values(&self) -> &[Sexagesimal] {
        &self.values
    }

    /// Iterate over the stored `(argument, value)` pairs
    pub fn samples(&self) -> impl Iterator<Item = (&Sexagesimal, &Sexagesimal)> {
        self.arguments.iter().zip(self.values.iter())
    }

    /// First and last stored arguments
    pub fn domain(&self) -> (&Sexagesimal, &Sexagesimal) {
        (&self.arguments[0], &self.arguments[self.arguments.len() - 1])
    }

    /// Whether an argument lies inside the stored samples
    pub fn contains(&self, argument: &Sexagesimal) -> bool {
        let (first, last) = self.domain();
        argument >= first && argument <= last
    }

    /// The same samples with a different list of symmetries
    pub fn with_symmetries(&self, symmetries: Vec<Symmetry>) -> Self {
        Self {
            arguments: self.arguments.clone(),
            values: self.values.clone(),
            symmetries,
        }
    }

    /// Look up the tabulated function at any argument
    ///
    /// Symmetries are applied in declaration order until the argument falls
    /// inside the stored samples, then the two bracketing samples are
    /// linearly interpolated.
    pub fn get(&self, argument: &Sexagesimal) -> Result<Sexagesimal> {
        let (resolved, negated) = self.resolve(argument)?;
        let value = self.interpolate(&resolved);
        Ok(if negated { -value } else { value })
    }

    /// Bring an argument into the stored domain
    ///
    /// Returns the reduced argument and whether an odd number of anti-mirror
    /// rules were crossed.
    fn resolve(&self, argument: &Sexagesimal) -> Result<(Sexagesimal, bool)> {
        let mut current = argument.clone();
        let mut negated = false;

        for _ in 0..MAX_RESOLUTION_PASSES {
            if self.contains(&current) {
                return Ok((current, negated));
            }
            let mut moved = false;
            for rule in &self.symmetries {
                if self.contains(&current) {
                    return Ok((current, negated));
                }
                if let Some(next) = self.apply(rule, &current) {
                    if let Symmetry::AntiMirror { .. } = rule {
                        negated = !negated;
                    }
                    current = next;
                    moved = true;
                }
            }
            if !moved {
                break;
            }
        }

        if self.contains(&current) {
            return Ok((current, negated));
        }
        let (first, last) = self.domain();
        Err(TableError::Domain {
            argument: argument.to_string(),
            first: first.to_string(),
            last: last.to_string(),
        })
    }

    /// Apply one rule to an argument outside the stored domain
    ///
    /// Mirrors only reflect arguments lying beyond the axis, on the side
    /// away from the samples. Periodic rules reduce into
    /// `[first, first + period)`.
    fn apply(&self, rule: &Symmetry, argument: &Sexagesimal) -> Option<Sexagesimal> {
        let (first, last) = self.domain();
        match rule {
            Symmetry::Mirror { axis } | Symmetry::AntiMirror { axis } => {
                let axis = axis.as_ref().unwrap_or(last);
                let center = first + last;
                let doubled_axis = axis + axis;
                let beyond = match center.cmp(&doubled_axis) {
                    Ordering::Less => argument > axis,
                    Ordering::Greater => argument < axis,
                    Ordering::Equal => false,
                };
                beyond.then(|| &doubled_axis - argument)
            }
            Symmetry::Periodic { period } => {
                let reduced = first + &(argument - first).rem_euclid(period);
                (reduced != *argument).then_some(reduced)
            }
        }
    }

    /// Piecewise-linear interpolation inside the stored domain
    ///
    /// Keeps one place more than the finest of the bracketing values and
    /// the argument.
    fn interpolate(&self, argument: &Sexagesimal) -> Sexagesimal {
        let upper = match self.arguments.binary_search(argument) {
            Ok(index) => return self.values[index].clone(),
            Err(index) => index,
        };
        let lower = upper - 1;

        let (x0, x1) = (&self.arguments[lower], &self.arguments[upper]);
        let (y0, y1) = (&self.values[lower], &self.values[upper]);
        let places = y0.places().max(y1.places()).max(argument.places()) + 1;

        let slope = (y1 - y0).to_rational() / (x1 - x0).to_rational();
        let offset = (argument - x0).to_rational();
        let exact: BigRational = y0.to_rational() + slope * offset;
        Sexagesimal::from_rational(&exact, places).into_value()
    }

    /// A table indexed on the value column
    ///
    /// The values must be strictly monotonic. Decreasing tables are
    /// re-ordered so that the reversed arguments increase. The result has no
    /// symmetries.
    pub fn reverse(&self) -> Result<Self> {
        let decreasing = self.values.len() > 1 && self.values[0] > self.values[1];
        let breaks_order = |w: &[Sexagesimal]| {
            if decreasing {
                w[0] <= w[1]
            } else {
                w[0] >= w[1]
            }
        };
        if let Some(index) = self.values.windows(2).position(breaks_order) {
            return Err(TableError::NotMonotonic(index + 1));
        }

        let mut samples: Vec<(Sexagesimal, Sexagesimal)> = self
            .values
            .iter()
            .cloned()
            .zip(self.arguments.iter().cloned())
            .collect();
        if decreasing {
            samples.reverse();
        }
        Self::new(samples, Vec::new())
    }

    /// Replace every value by `f(value)`, keeping arguments and symmetries
    pub fn with_values<F>(&self, f: F) -> Self
    where
        F: Fn(&Sexagesimal) -> Sexagesimal,
    {
        Self {
            arguments: self.arguments.clone(),
            values: self.values.iter().map(f).collect(),
            symmetries: self.symmetries.clone(),
        }
    }

    /// Linear blend `self + (other - self) × ratio` of two tables sampled at
    /// the same arguments
    pub fn blend(&self, other: &Self, ratio: &Sexagesimal) -> Result<Self> {
        if self.arguments != other.arguments {
            return Err(TableError::IncompatibleTables);
        }
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(low, high)| low + &((high - low) * ratio))
            .collect();
        Ok(Self {
            arguments: self.arguments.clone(),
            values,
            symmetries: self.symmetries.clone(),
        })
    }
}

/// Build a table from `(argument, value)` literals, mainly for tests and
/// hand-written table sets
pub fn table_from_literals(
    samples: &[(&str, &str)],
    symmetries: Vec<Symmetry>,
) -> crate::Result<SymmetricTable> {
    let parsed = samples
        .iter()
        .map(|(a, v)| Ok((a.parse::<Sexagesimal>()?, v.parse::<Sexagesimal>()?)))
        .collect::<std::result::Result<Vec<_>, crate::sexagesimal::ParseError>>()?;
    Ok(SymmetricTable::new(parsed, symmetries)?)
}
