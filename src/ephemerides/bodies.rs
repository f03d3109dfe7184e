//! True-position pipelines
//!
//! Every body starts from a linear mean motion and corrects it with one or
//! more tabulated equations:
//!
//! 1. `mean = coefficient × days + radix (mod 360)`
//! 2. `apogee = fixed stars mean + access and recess equation + apogee radix`
//! 3. `mean center = mean - apogee (mod 360)`
//!
//! The Sun subtracts a single equation of center. The Moon and the planets
//! also use an equation of argument scaled by proportional minutes.

use super::Body;
use crate::sexagesimal::{mod360, Sexagesimal};
use crate::tables::{Result, SymmetricTable};
use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

lazy_static! {
    static ref HALF_CIRCLE: Sexagesimal = Sexagesimal::from_int(180);
}

/// Linear mean motion in degrees per day
///
/// Serialized as a `[coefficient, radix]` pair of literals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Sexagesimal, Sexagesimal)", into = "(Sexagesimal, Sexagesimal)")]
pub struct MeanMotion {
    pub coefficient: Sexagesimal,
    pub radix: Sexagesimal,
}

impl MeanMotion {
    pub fn new(coefficient: Sexagesimal, radix: Sexagesimal) -> Self {
        Self { coefficient, radix }
    }

    /// Mean position after `days`, in `[0, 360)`
    pub fn at(&self, days: &Sexagesimal) -> Sexagesimal {
        mod360(&(&self.coefficient * days + &self.radix))
    }
}

impl From<(Sexagesimal, Sexagesimal)> for MeanMotion {
    fn from((coefficient, radix): (Sexagesimal, Sexagesimal)) -> Self {
        Self::new(coefficient, radix)
    }
}

impl From<MeanMotion> for (Sexagesimal, Sexagesimal) {
    fn from(mm: MeanMotion) -> Self {
        (mm.coefficient, mm.radix)
    }
}

/// Intermediate quantities of a true-position computation
///
/// Fields a pipeline does not use stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct TruePositionDetails {
    pub body: Body,
    pub days: Sexagesimal,
    pub mean: Sexagesimal,
    pub apogee: Option<Sexagesimal>,
    pub mean_center: Option<Sexagesimal>,
    pub mean_argument: Option<Sexagesimal>,
    pub center_equation: Sexagesimal,
    pub true_argument: Option<Sexagesimal>,
    pub argument_equation: Option<Sexagesimal>,
    pub proportional_minutes: Option<Sexagesimal>,
    pub diameter: Option<Sexagesimal>,
    pub correction: Option<Sexagesimal>,
    pub true_position: Sexagesimal,
}

impl TruePositionDetails {
    fn new(body: Body, days: &Sexagesimal, mean: Sexagesimal) -> Self {
        Self {
            body,
            days: days.clone(),
            mean,
            apogee: None,
            mean_center: None,
            mean_argument: None,
            center_equation: Sexagesimal::zero(),
            true_argument: None,
            argument_equation: None,
            proportional_minutes: None,
            diameter: None,
            correction: None,
            true_position: Sexagesimal::zero(),
        }
    }
}

/// The eighth sphere: fixed-star motion and its access and recess
#[derive(Debug, Clone)]
pub struct FixedStars {
    pub mean_motion: MeanMotion,
    pub access_recess_mean_motion: MeanMotion,
    pub access_recess_equation: SymmetricTable,
}

impl FixedStars {
    /// Motion of the eighth sphere after `days`, apogee radix excluded
    pub fn apogee_motion(&self, days: &Sexagesimal) -> Result<Sexagesimal> {
        let mean = self.mean_motion.at(days);
        let access_recess = self.access_recess_mean_motion.at(days);
        let equation = self.access_recess_equation.get(&access_recess)?;
        Ok(mean + equation)
    }
}

/// The Sun: mean motion corrected by a single equation
#[derive(Debug, Clone)]
pub struct SunModel {
    pub mean_motion: MeanMotion,
    pub apogee_radix: Sexagesimal,
    pub equation: SymmetricTable,
    pub fixed_stars: Arc<FixedStars>,
}

impl SunModel {
    pub fn mean(&self, days: &Sexagesimal) -> Sexagesimal {
        self.mean_motion.at(days)
    }

    pub fn details(&self, days: &Sexagesimal) -> Result<TruePositionDetails> {
        let mean = self.mean(days);
        let apogee = self.fixed_stars.apogee_motion(days)? + &self.apogee_radix;
        let mean_center = mod360(&(&mean - &apogee));
        let equation = self.equation.get(&mean_center)?;
        let true_position = mod360(&(&mean - &equation));

        debug!(
            "Sun: mean {}, apogee {}, mean center {}, equation {}, true {}",
            mean, apogee, mean_center, equation, true_position
        );

        let mut details = TruePositionDetails::new(Body::Sun, days, mean);
        details.apogee = Some(apogee);
        details.mean_center = Some(mean_center);
        details.center_equation = equation;
        details.true_position = true_position;
        Ok(details)
    }
}

/// The Moon: equation of center driven by the double elongation
#[derive(Debug, Clone)]
pub struct MoonModel {
    pub mean_motion: MeanMotion,
    pub mean_argument: MeanMotion,
    pub equation_center: SymmetricTable,
    pub equation_argument: SymmetricTable,
    pub proportional_minutes: SymmetricTable,
    pub diameter_diversion: SymmetricTable,
    pub sun: Arc<SunModel>,
}

impl MoonModel {
    pub fn details(&self, days: &Sexagesimal) -> Result<TruePositionDetails> {
        let mean_moon = self.mean_motion.at(days);
        let mean_sun = self.sun.mean(days);
        let double_elongation = mod360(&(mod360(&(&mean_moon - &mean_sun)) * Sexagesimal::from_int(2)));

        let center_equation = self.equation_center.get(&double_elongation)?;
        let minutes = self.proportional_minutes.get(&double_elongation)? >> 1;
        let mean_argument = self.mean_argument.at(days);
        let true_argument = mod360(&(&mean_argument + &center_equation));
        let argument_equation = self.equation_argument.get(&true_argument)?;
        let diameter = self.diameter_diversion.get(&true_argument)? * &minutes;

        let mut correction = argument_equation.abs() + &diameter;
        if true_argument < *HALF_CIRCLE {
            correction = -correction;
        }
        let true_position = mod360(&(&mean_moon + &correction));

        debug!(
            "Moon: mean {}, center {}, center equation {}, true argument {}, argument equation {}, \
             minutes {}, correction {}, true {}",
            mean_moon,
            double_elongation,
            center_equation,
            true_argument,
            argument_equation,
            minutes,
            correction,
            true_position
        );

        let mut details = TruePositionDetails::new(Body::Moon, days, mean_moon);
        details.mean_center = Some(double_elongation);
        details.mean_argument = Some(mean_argument);
        details.center_equation = center_equation;
        details.true_argument = Some(true_argument);
        details.argument_equation = Some(argument_equation);
        details.proportional_minutes = Some(minutes);
        details.diameter = Some(diameter);
        details.correction = Some(correction);
        details.true_position = true_position;
        Ok(details)
    }
}

/// Equation tables shared by the planet pipelines
#[derive(Debug, Clone)]
pub struct PlanetTables {
    pub center_equation: SymmetricTable,
    pub argument_equation: SymmetricTable,
    pub proportional_minutes: SymmetricTable,
    /// Diversity of diameter at the farthest distance
    pub long_longior: SymmetricTable,
    /// Diversity of diameter at the nearest distance
    pub long_propior: SymmetricTable,
}

/// Quantities a planet pipeline needs before the shared correction step
struct PlanetInput<'a> {
    body: Body,
    days: &'a Sexagesimal,
    mean: Sexagesimal,
    apogee: Sexagesimal,
    mean_argument: Sexagesimal,
}

impl PlanetTables {
    fn correct(&self, input: PlanetInput<'_>) -> Result<TruePositionDetails> {
        let PlanetInput {
            body,
            days,
            mean,
            apogee,
            mean_argument,
        } = input;

        let mean_center = mod360(&(&mean - &apogee));
        let center_equation = self.center_equation.get(&mean_center)?;
        let true_center = mod360(&(&mean_center + &center_equation));
        let true_argument = mod360(&(&mean_argument - &center_equation));
        let minutes = self.proportional_minutes.get(&true_center)? >> 1;
        let argument_equation = self.argument_equation.get(&true_argument)?;

        let diversity = if minutes.is_negative() || minutes.is_zero() {
            &self.long_longior
        } else {
            &self.long_propior
        };
        let diameter = diversity.get(&true_argument)? * &minutes;

        let mut correction = argument_equation.abs() + &diameter;
        if true_argument > *HALF_CIRCLE {
            correction = -correction;
        }
        let true_position = mod360(&(&correction + &center_equation + &mean));

        debug!(
            "{}: mean {}, apogee {}, mean center {}, center equation {}, true argument {}, \
             argument equation {}, minutes {}, correction {}, true {}",
            body,
            mean,
            apogee,
            mean_center,
            center_equation,
            true_argument,
            argument_equation,
            minutes,
            correction,
            true_position
        );

        let mut details = TruePositionDetails::new(body, days, mean);
        details.apogee = Some(apogee);
        details.mean_center = Some(mean_center);
        details.mean_argument = Some(mean_argument);
        details.center_equation = center_equation;
        details.true_argument = Some(true_argument);
        details.argument_equation = Some(argument_equation);
        details.proportional_minutes = Some(minutes);
        details.diameter = Some(diameter);
        details.correction = Some(correction);
        details.true_position = true_position;
        Ok(details)
    }
}

/// Mars, Jupiter and Saturn
///
/// The mean argument is the distance from the planet's mean position to the
/// mean Sun.
#[derive(Debug, Clone)]
pub struct SuperiorPlanet {
    pub body: Body,
    pub mean_motion: MeanMotion,
    pub apogee_radix: Sexagesimal,
    pub tables: PlanetTables,
    pub sun: Arc<SunModel>,
}

impl SuperiorPlanet {
    pub fn details(&self, days: &Sexagesimal) -> Result<TruePositionDetails> {
        let mean = self.mean_motion.at(days);
        let apogee = self.sun.fixed_stars.apogee_motion(days)? + &self.apogee_radix;
        let mean_argument = mod360(&(self.sun.mean(days) - &mean));
        self.tables.correct(PlanetInput {
            body: self.body,
            days,
            mean,
            apogee,
            mean_argument,
        })
    }
}

/// Venus and Mercury
///
/// These follow the mean Sun: unless the table set gives them their own
/// mean motion or apogee radix, the Sun's are used.
#[derive(Debug, Clone)]
pub struct InferiorPlanet {
    pub body: Body,
    pub mean_argument: MeanMotion,
    pub mean_motion: Option<MeanMotion>,
    pub apogee_radix: Option<Sexagesimal>,
    pub tables: PlanetTables,
    pub sun: Arc<SunModel>,
}

impl InferiorPlanet {
    pub fn mean_motion(&self) -> &MeanMotion {
        self.mean_motion.as_ref().unwrap_or(&self.sun.mean_motion)
    }

    pub fn apogee_radix(&self) -> &Sexagesimal {
        self.apogee_radix.as_ref().unwrap_or(&self.sun.apogee_radix)
    }

    pub fn details(&self, days: &Sexagesimal) -> Result<TruePositionDetails> {
        let mean = self.mean_motion().at(days);
        let apogee = self.sun.fixed_stars.apogee_motion(days)? + self.apogee_radix();
        let mean_argument = self.mean_argument.at(days);
        self.tables.correct(PlanetInput {
            body: self.body,
            days,
            mean,
            apogee,
            mean_argument,
        })
    }
}

/// A body's pipeline, dispatched by category
#[derive(Debug, Clone)]
pub enum CelestialModel {
    Sun(Arc<SunModel>),
    Moon(MoonModel),
    Superior(SuperiorPlanet),
    Inferior(InferiorPlanet),
}

impl CelestialModel {
    pub fn body(&self) -> Body {
        match self {
            CelestialModel::Sun(_) => Body::Sun,
            CelestialModel::Moon(_) => Body::Moon,
            CelestialModel::Superior(planet) => planet.body,
            CelestialModel::Inferior(planet) => planet.body,
        }
    }

    /// Run the pipeline and keep every intermediate quantity
    pub fn details(&self, days: &Sexagesimal) -> Result<TruePositionDetails> {
        match self {
            CelestialModel::Sun(sun) => sun.details(days),
            CelestialModel::Moon(moon) => moon.details(days),
            CelestialModel::Superior(planet) => planet.details(days),
            CelestialModel::Inferior(planet) => planet.details(days),
        }
    }

    /// True longitude in `[0, 360)`
    pub fn true_position(&self, days: &Sexagesimal) -> Result<Sexagesimal> {
        Ok(self.details(days)?.true_position)
    }
}
