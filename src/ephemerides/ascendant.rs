//! Ascendant from the Sun's position and the time of day
//!
//! The oblique ascensions of the Sun and of the opposite point give the
//! diurnal arc. Half of it added to the Sun's rising ascension is the
//! ascension culminating at noon; the hours elapsed since noon move it on by
//! 15° per hour. Reversing the oblique ascension table turns the result back
//! into an ecliptic longitude.

use super::{Body, TableSet};
use crate::sexagesimal::{mod360, Angle, Sexagesimal};
use crate::Result;
use log::debug;

/// Degrees of rotation per day
const DEGREES_PER_DAY: i64 = 360;

/// Arc turned since local noon, negative in the morning
///
/// `(fract(days) - 1/2) × 24 h × 15°/h`
pub fn hour_arc(days: &Sexagesimal) -> Sexagesimal {
    let noon = Sexagesimal::from_int(30) >> 1;
    let since_noon = days.fract() - noon;
    since_noon * Sexagesimal::from_int(DEGREES_PER_DAY)
}

/// Ecliptic longitude on the eastern horizon at `days` for `latitude`
pub fn ascendant(set: &TableSet, days: f64, latitude: f64) -> Result<Angle> {
    let days = set.days(days)?;
    let sun = set.model(Body::Sun)?.true_position(&days)?;
    let oblique = set.oblique_ascension();

    let rising = oblique.get(&sun, latitude)?;
    let setting = oblique.get(&mod360(&(&sun + Sexagesimal::from_int(180))), latitude)?;
    let diurnal_arc = mod360(&(&setting - &rising));
    let half_arc = diurnal_arc.div_int(2, diurnal_arc.places() + 1)?.into_value();

    let hours = hour_arc(&days);
    let ascension = mod360(&(&rising + &hours + half_arc));
    let ascendant = oblique.reverse_get(&ascension, latitude)?;

    debug!(
        "Ascendant: sun {}, rising {}, setting {}, hour arc {}, ascension {}, ascendant {}",
        sun, rising, setting, hours, ascension, ascendant
    );

    Ok(Angle::from_degrees(mod360(&ascendant)))
}
