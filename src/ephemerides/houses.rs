//! House division
//!
//! Every method starts from the ascendant's oblique ascension `a0` and right
//! ascension `a1` and yields twelve cusps, the first being the ascendant
//! itself. Cusps are normalized into `[0, 360)`.

use super::{ConfigurationError, TableSet};
use crate::sexagesimal::{mod360, Angle, Sexagesimal};
use crate::tables::RightAscension;
use crate::Result;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// House division methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HouseMethod {
    /// Equal division of the diurnal and nocturnal semi-arcs
    M1,
    /// Equal division of each quadrant of the ecliptic
    #[default]
    M2,
    /// Equal division of the equator from the ascendant's right ascension
    M5,
    /// Equal 30° houses from the ascendant
    M6,
}

impl HouseMethod {
    pub const ALL: [HouseMethod; 4] = [
        HouseMethod::M1,
        HouseMethod::M2,
        HouseMethod::M5,
        HouseMethod::M6,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HouseMethod::M1 => "M1",
            HouseMethod::M2 => "M2",
            HouseMethod::M5 => "M5",
            HouseMethod::M6 => "M6",
        }
    }
}

impl fmt::Display for HouseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseMethod {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        HouseMethod::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigurationError::UnknownHouseMethod(s.to_string()))
    }
}

fn deg(value: i64) -> Sexagesimal {
    Sexagesimal::from_int(value)
}

/// Exact division by a small integer
///
/// Thirds and halves of a sexagesimal value terminate one place later.
fn divide(value: &Sexagesimal, by: i64) -> Result<Sexagesimal> {
    Ok(value.div_int(by, value.places() + 1)?.into_value())
}

fn method_1(
    ra: &RightAscension,
    ascendant: &Sexagesimal,
    a0: &Sexagesimal,
    a1: &Sexagesimal,
) -> Result<Vec<Sexagesimal>> {
    let eastern = deg(90) + a0 - a1;
    let western = deg(90) - a0 + a1;

    let a2 = mod360(&(a1 + divide(&eastern, 3)?));
    let a3 = mod360(&(a1 + divide(&(&eastern * deg(2)), 3)?));
    let a12 = mod360(&(a1 - divide(&western, 3)?));
    let a11 = mod360(&(a1 - divide(&(&western * deg(2)), 3)?));
    let a10 = mod360(&(a0 - deg(90)));
    let opposite = |x: &Sexagesimal| mod360(&(x + deg(180)));
    let a4 = opposite(&a10);
    let a5 = opposite(&a11);
    let a6 = opposite(&a12);
    let a7 = opposite(a1);
    let a8 = opposite(&a2);
    let a9 = opposite(&a3);

    let mut cusps = vec![mod360(ascendant)];
    for ascension in [a2, a3, a4, a5, a6, a7, a8, a9, a10, a11, a12] {
        cusps.push(ra.reverse_get(&ascension)?);
    }
    Ok(cusps)
}

fn method_2(
    ra: &RightAscension,
    ascendant: &Sexagesimal,
    a0: &Sexagesimal,
    a1: &Sexagesimal,
) -> Result<Vec<Sexagesimal>> {
    let a10 = mod360(&(a0 - deg(90)));
    let a7 = mod360(&(a1 + deg(180)));
    let a4 = mod360(&(&a10 + deg(180)));

    let l10 = ra.reverse_get(&a10)?;
    let l7 = ra.reverse_get(&a7)?;
    let l4 = ra.reverse_get(&a4)?;

    let d0 = divide(&mod360(&(&l4 - ascendant)), 3)?;
    let d1 = divide(&mod360(&(&l7 - &l4)), 3)?;
    let d2 = divide(&mod360(&(&l10 - &l7)), 3)?;
    let d3 = divide(&mod360(&(ascendant - &l10)), 3)?;

    let mut cusps = Vec::with_capacity(12);
    for (start, step) in [(ascendant, &d0), (&l4, &d1), (&l7, &d2), (&l10, &d3)] {
        cusps.push(mod360(start));
        cusps.push(mod360(&(start + step)));
        cusps.push(mod360(&(start + step * deg(2))));
    }
    Ok(cusps)
}

fn method_5(ra: &RightAscension, ascendant: &Sexagesimal, a1: &Sexagesimal) -> Result<Vec<Sexagesimal>> {
    let mut cusps = vec![mod360(ascendant)];
    for offset in (30..360).step_by(30) {
        cusps.push(ra.reverse_get(&mod360(&(a1 + deg(offset))))?);
    }
    Ok(cusps)
}

fn method_6(ascendant: &Sexagesimal) -> Vec<Sexagesimal> {
    (0..360)
        .step_by(30)
        .map(|offset| mod360(&(ascendant + deg(offset))))
        .collect()
}

/// The twelve house cusps for an ascendant at `latitude`
pub fn houses(
    set: &TableSet,
    ascendant: &Sexagesimal,
    latitude: f64,
    method: HouseMethod,
) -> Result<[Angle; 12]> {
    let ra = set.right_ascension();
    let a0 = set.oblique_ascension().get(ascendant, latitude)?;
    let a1 = ra.get(ascendant)?;
    debug!(
        "Houses {}: ascendant {}, oblique ascension {}, right ascension {}",
        method, ascendant, a0, a1
    );

    let cusps = match method {
        HouseMethod::M1 => method_1(ra, ascendant, &a0, &a1)?,
        HouseMethod::M2 => method_2(ra, ascendant, &a0, &a1)?,
        HouseMethod::M5 => method_5(ra, ascendant, &a1)?,
        HouseMethod::M6 => method_6(ascendant),
    };

    let cusps: Vec<Angle> = cusps.into_iter().map(Angle::from_degrees).collect();
    let count = cusps.len();
    cusps.try_into().map_err(|_| {
        crate::AlphonsineError::Calculation(format!("{} produced {} cusps", method, count))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::table_from_literals;

    fn sx(text: &str) -> Sexagesimal {
        text.parse().unwrap()
    }

    fn identity_ra() -> RightAscension {
        RightAscension::new(table_from_literals(&[("0", "0"), ("6,0", "6,0")], vec![]).unwrap())
            .unwrap()
    }

    #[test]
    fn test_method_names() {
        assert_eq!("m1".parse::<HouseMethod>().unwrap(), HouseMethod::M1);
        assert_eq!(" M6 ".parse::<HouseMethod>().unwrap(), HouseMethod::M6);
        assert!("M3".parse::<HouseMethod>().is_err());
        assert_eq!(HouseMethod::default(), HouseMethod::M2);
    }

    #[test]
    fn test_equal_houses() {
        let cusps = method_6(&sx("5,50"));
        assert_eq!(cusps.len(), 12);
        assert_eq!(cusps[0], sx("5,50"));
        assert_eq!(cusps[1], sx("20"));
        assert_eq!(cusps[11], sx("5,20"));
    }

    #[test]
    fn test_equator_houses_with_identity_ascension() {
        let cusps = method_5(&identity_ra(), &sx("10"), &sx("10")).unwrap();
        assert_eq!(cusps, method_6(&sx("10")));
    }

    #[test]
    fn test_quadrant_houses_with_identity_ascension() {
        // With a0 = a1 = ascendant every quadrant is 90°
        let cusps = method_2(&identity_ra(), &sx("1,0"), &sx("1,0"), &sx("1,0")).unwrap();
        assert_eq!(cusps, method_6(&sx("1,0")));
    }

    #[test]
    fn test_semi_arc_houses_with_identity_ascension() {
        let cusps = method_1(&identity_ra(), &sx("1,0"), &sx("1,0"), &sx("1,0")).unwrap();
        assert_eq!(cusps, method_6(&sx("1,0")));
    }

    #[test]
    fn test_quadrant_division_is_exact() {
        // a0 = 100 puts the tenth cusp at 10, the fourth at 190, the seventh at 4,0
        let cusps = method_2(&identity_ra(), &sx("1,0"), &sx("1,40"), &sx("1,0")).unwrap();
        assert_eq!(cusps[3], sx("3,10"));
        assert_eq!(cusps[1], sx("1,43;20"));
        assert_eq!(cusps[9], sx("10"));
        assert_eq!(cusps[10], sx("26;40"));
    }
}
