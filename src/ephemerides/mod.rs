//! Table-based ephemerides
//!
//! A [`TableSet`] bundles the parameters of one astronomical tradition (mean
//! motions, radices and correction tables) and computes from them:
//!
//! - true ecliptic longitudes of the Sun, the Moon and the five planets
//! - the ascendant for a day count and a latitude
//! - the twelve house cusps under several division methods
//!
//! Day counts are continuous days since the epoch of the calendar the tables
//! were built for; converting civil dates is the job of a
//! [`CalendarProvider`](crate::calendar::CalendarProvider).

pub mod ascendant;
pub mod batch;
pub mod bodies;
pub mod houses;
pub mod table_set;

pub use bodies::{CelestialModel, MeanMotion, TruePositionDetails};
pub use houses::HouseMethod;
pub use table_set::{
    EphemerisConfig, InitMode, TableSet, TableSetLoader, TableSetName, TableSetRegistry,
};

use crate::tables::source::SourceError;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Error type for building table sets and resolving names
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("Unknown table set: {0}")]
    UnknownTableSet(String),

    #[error("Unknown house method: {0}")]
    UnknownHouseMethod(String),

    #[error("Table set has no model for {0}")]
    MissingModel(Body),

    #[error("Table source error: {0}")]
    Source(#[from] SourceError),

    #[error("Table {id} used for {role} is unusable: {reason}")]
    BadTable {
        id: u32,
        role: &'static str,
        reason: String,
    },

    #[error("Invalid table set description {path:?}: {reason}")]
    InvalidDescription { path: PathBuf, reason: String },

    #[error("Table set {name} is unavailable: {reason}")]
    Unavailable { name: String, reason: String },
}

/// Bodies with a true-position pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

impl Body {
    /// Every body, in traditional order
    pub const ALL: [Body; 7] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
    ];

    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
        }
    }

    /// Planets beyond the Sun's sphere
    pub fn is_superior(&self) -> bool {
        matches!(self, Body::Mars | Body::Jupiter | Body::Saturn)
    }

    /// Planets between the Moon and the Sun
    pub fn is_inferior(&self) -> bool {
        matches!(self, Body::Mercury | Body::Venus)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pairs of (body, accepted name)
const BODY_NAME_PAIRS: &[(Body, &str)] = &[
    (Body::Sun, "sun"),
    (Body::Sun, "sol"),
    (Body::Moon, "moon"),
    (Body::Moon, "luna"),
    (Body::Mercury, "mercury"),
    (Body::Mercury, "mercurius"),
    (Body::Venus, "venus"),
    (Body::Mars, "mars"),
    (Body::Jupiter, "jupiter"),
    (Body::Jupiter, "iuppiter"),
    (Body::Saturn, "saturn"),
    (Body::Saturn, "saturnus"),
];

lazy_static! {
    /// Map from lowercase names to bodies
    static ref BODY_NAMES: HashMap<&'static str, Body> = {
        let mut m = HashMap::new();
        for &(body, name) in BODY_NAME_PAIRS.iter() {
            m.insert(name, body);
        }
        m
    };
}

/// Get a body from its name, ignoring case
pub fn body_from_name(name: &str) -> Option<Body> {
    BODY_NAMES.get(name.trim().to_lowercase().as_str()).copied()
}

impl FromStr for Body {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        body_from_name(s).ok_or_else(|| ConfigurationError::UnknownBody(s.to_string()))
    }
}
