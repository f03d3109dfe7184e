//! Parallel evaluation over many day counts
//!
//! Table sets are immutable, so requests fan out over rayon's pool and the
//! results come back in input order.

use super::{Body, TableSet};
use crate::sexagesimal::Angle;
use crate::Result;
use rayon::prelude::*;

/// True positions of one body for every day count, in input order
pub fn true_positions(set: &TableSet, body: Body, days: &[f64]) -> Result<Vec<Angle>> {
    days.par_iter()
        .map(|&d| set.true_position(body, d))
        .collect()
}

/// Ascendants for every day count at one latitude, in input order
pub fn ascendants(set: &TableSet, days: &[f64], latitude: f64) -> Result<Vec<Angle>> {
    days.par_iter()
        .map(|&d| set.ascendant(d, latitude))
        .collect()
}

/// `count` true positions starting at `start`, `step` days apart
pub fn series(
    set: &TableSet,
    body: Body,
    start: f64,
    step: f64,
    count: usize,
) -> Result<Vec<(f64, Angle)>> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let days = start + step * i as f64;
            set.true_position(body, days).map(|angle| (days, angle))
        })
        .collect()
}
