//! Alphonsine: table-based medieval ephemerides in exact sexagesimal arithmetic
//!
//! This crate reconstructs the computations of the Alphonsine tradition:
//! true longitudes of the Sun, the Moon and the planets, the ascendant and
//! the astrological houses, all derived from historical mean motions and
//! correction tables written in base 60. It also evaluates arithmetic
//! expressions on sexagesimal literals.
//!
//! ```rust
//! use alphonsine::calculations::evaluate;
//!
//! assert_eq!(evaluate("1;2 -- 3;1").unwrap().value.to_string(), "4;3");
//! ```

use thiserror::Error;

pub mod calculations;
pub mod calendar;
pub mod ephemerides;
pub mod sexagesimal;
pub mod tables;

// Re-export commonly used types
pub use calendar::{CalendarProvider, JulianCalendar};
pub use ephemerides::{Body, HouseMethod, TableSet, TableSetLoader, TableSetName};
pub use sexagesimal::{Angle, Sexagesimal, Truncated, Unit};
pub use tables::SymmetricTable;

/// Main error type for the alphonsine library
#[derive(Debug, Error)]
pub enum AlphonsineError {
    #[error("Parse error: {0}")]
    Parse(#[from] sexagesimal::ParseError),

    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] sexagesimal::ArithmeticError),

    #[error("Table error: {0}")]
    Table(#[from] tables::TableError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ephemerides::ConfigurationError),

    #[error("Table source error: {0}")]
    Source(#[from] tables::source::SourceError),

    #[error("Calendar error: {0}")]
    Calendar(#[from] calendar::CalendarError),

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for alphonsine operations
pub type Result<T> = std::result::Result<T, AlphonsineError>;
