//! Oblique and right ascension tables
//!
//! Oblique ascension depends on the observer's latitude. Historical sets
//! print one table per climate (a handful of sampled latitudes); latitudes in
//! between are handled by blending the two neighbouring tables.

use super::{Result, SymmetricTable, TableError};
use crate::sexagesimal::{mod360, Sexagesimal};
use log::trace;

/// Fractional places kept for the latitude blending ratio
const RATIO_PLACES: usize = 6;

#[derive(Debug, Clone)]
struct LatitudeTable {
    latitude: f64,
    table: SymmetricTable,
    reversed: SymmetricTable,
}

/// Where a latitude falls among the sampled ones
enum Bracket<'a> {
    Single(&'a LatitudeTable),
    Between(&'a LatitudeTable, &'a LatitudeTable, Sexagesimal),
}

/// Oblique ascension tables indexed by latitude
#[derive(Debug, Clone)]
pub struct ObliqueAscension {
    tables: Vec<LatitudeTable>,
}

impl ObliqueAscension {
    /// Build from `(latitude, table)` pairs, precomputing reverse tables
    pub fn new(tables: Vec<(f64, SymmetricTable)>) -> Result<Self> {
        if tables.is_empty() {
            return Err(TableError::Empty);
        }
        let mut entries = tables
            .into_iter()
            .map(|(latitude, table)| {
                if !latitude.is_finite() {
                    return Err(TableError::InvalidLatitude(latitude));
                }
                let reversed = table.reverse()?;
                Ok(LatitudeTable {
                    latitude,
                    table,
                    reversed,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        entries.sort_by(|a, b| a.latitude.total_cmp(&b.latitude));
        Ok(Self { tables: entries })
    }

    /// Sampled latitudes in increasing order
    pub fn latitudes(&self) -> Vec<f64> {
        self.tables.iter().map(|t| t.latitude).collect()
    }

    fn bracket(&self, latitude: f64) -> Result<Bracket<'_>> {
        if !latitude.is_finite() {
            return Err(TableError::InvalidLatitude(latitude));
        }
        let first = &self.tables[0];
        let last = &self.tables[self.tables.len() - 1];
        if latitude <= first.latitude {
            return Ok(Bracket::Single(first));
        }
        if latitude >= last.latitude {
            return Ok(Bracket::Single(last));
        }

        let upper = self
            .tables
            .iter()
            .position(|t| t.latitude >= latitude)
            .unwrap_or(self.tables.len() - 1);
        let high = &self.tables[upper];
        if high.latitude == latitude {
            return Ok(Bracket::Single(high));
        }
        let low = &self.tables[upper - 1];
        let ratio = (latitude - low.latitude) / (high.latitude - low.latitude);
        let ratio = Sexagesimal::from_f64(ratio, RATIO_PLACES)
            .map_err(|_| TableError::InvalidLatitude(latitude))?
            .into_value();
        trace!(
            "Blending oblique ascension tables {} and {} with ratio {}",
            low.latitude,
            high.latitude,
            ratio
        );
        Ok(Bracket::Between(low, high, ratio))
    }

    /// Oblique ascension of an ecliptic longitude at a latitude
    pub fn get(&self, longitude: &Sexagesimal, latitude: f64) -> Result<Sexagesimal> {
        let longitude = mod360(longitude);
        match self.bracket(latitude)? {
            Bracket::Single(entry) => entry.table.get(&longitude),
            Bracket::Between(low, high, ratio) => {
                let a = low.table.get(&longitude)?;
                let b = high.table.get(&longitude)?;
                Ok(&a + &((&b - &a) * &ratio))
            }
        }
    }

    /// Ecliptic longitude whose oblique ascension is `value`
    pub fn reverse_get(&self, value: &Sexagesimal, latitude: f64) -> Result<Sexagesimal> {
        let value = mod360(value);
        match self.bracket(latitude)? {
            Bracket::Single(entry) => entry.reversed.get(&value),
            Bracket::Between(low, high, ratio) => {
                low.table.blend(&high.table, &ratio)?.reverse()?.get(&value)
            }
        }
    }
}

/// Right ascension table, stored shifted by a quarter turn
///
/// The printed table starts at the winter solstice, hence the 90° offsets
/// on the way in and out.
#[derive(Debug, Clone)]
pub struct RightAscension {
    table: SymmetricTable,
    reversed: SymmetricTable,
}

impl RightAscension {
    pub fn new(table: SymmetricTable) -> Result<Self> {
        let reversed = table.reverse()?;
        Ok(Self { table, reversed })
    }

    /// Right ascension of an ecliptic longitude, in `[0, 360)`
    pub fn get(&self, longitude: &Sexagesimal) -> Result<Sexagesimal> {
        let quarter = Sexagesimal::from_int(90);
        let shifted = mod360(&(longitude + &quarter));
        Ok(mod360(&(self.table.get(&shifted)? - quarter)))
    }

    /// Ecliptic longitude of a right ascension, in `[0, 360)`
    pub fn reverse_get(&self, ascension: &Sexagesimal) -> Result<Sexagesimal> {
        let quarter = Sexagesimal::from_int(90);
        let shifted = mod360(&(ascension - &quarter));
        Ok(mod360(&(self.reversed.get(&shifted)? + quarter)))
    }
}
