//! Alphonsine ephemerides tool
//!
//! Computes true positions, ascendants and houses from a table set found in
//! the data directory, and evaluates sexagesimal expressions.
//!
//! Usage:
//!   alphonsine true-pos --body moon --date 1327-07-03
//!   alphonsine ascendant --date 1327-07-03 --hours 12 --latitude 31
//!   alphonsine houses --ascendant "3,16;11,46" --latitude 31 --method M2
//!   alphonsine eval "1;2 -- 3;1"

use std::path::PathBuf;

use alphonsine::calculations::{self, evaluate, evaluate_with_precision, Operation};
use alphonsine::ephemerides::{batch, EphemerisConfig, TableSet};
use alphonsine::sexagesimal::{Angle, Sexagesimal, Truncated};
use alphonsine::{Body, CalendarProvider, HouseMethod, JulianCalendar, TableSetLoader, TableSetName};
use clap::{Parser, Subcommand};

/// Type alias for the error type used throughout this binary
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Alphonsine table-based ephemerides
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Data directory holding `table_sets/` and `tables/`
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Table set to use
    #[arg(long, global = true, default_value = "parisian_alphonsine_tables")]
    table_set: String,

    /// JSON settings file (day precision, init mode)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// A moment given either as a Julian date or as a raw day count
#[derive(clap::Args, Debug)]
struct Moment {
    /// Julian-calendar date, YYYY-MM-DD
    #[arg(long, conflicts_with = "days")]
    date: Option<String>,

    /// Hours after midnight
    #[arg(long, default_value_t = 0.0)]
    hours: f64,

    /// Days since 1 January AD 1 (Julian)
    #[arg(long)]
    days: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// True longitude of a body
    TruePos {
        #[arg(long)]
        body: String,

        #[command(flatten)]
        moment: Moment,

        /// Number of values, for a series
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Days between values of a series
        #[arg(long, default_value_t = 1.0)]
        step: f64,

        /// Print every intermediate quantity
        #[arg(long)]
        details: bool,
    },

    /// Ascendant for a moment and a latitude
    Ascendant {
        #[command(flatten)]
        moment: Moment,

        #[arg(long)]
        latitude: f64,
    },

    /// House cusps for an ascendant and a latitude
    Houses {
        #[arg(long)]
        ascendant: Sexagesimal,

        #[arg(long)]
        latitude: f64,

        #[arg(long, default_value = "M2")]
        method: String,
    },

    /// Evaluate an expression, or apply a named operation to two literals
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,

        /// Second operand, makes EXPRESSION the first one
        #[arg(long, requires = "operation")]
        with: Option<String>,

        /// add, sub, mul or div
        #[arg(long)]
        operation: Option<String>,

        /// Fractional places of the result
        #[arg(long)]
        precision: Option<usize>,
    },

    /// Decimal value of a literal
    ToFloat { literal: String },

    /// Sexagesimal value of a decimal number
    FromFloat {
        #[arg(allow_hyphen_values = true)]
        value: f64,

        #[arg(long, default_value_t = 2)]
        precision: usize,
    },
}

fn days_of(moment: &Moment) -> Result<f64> {
    if let Some(days) = moment.days {
        return Ok(days + moment.hours / 24.0);
    }
    let date = moment
        .date
        .as_deref()
        .ok_or("either --date or --days is required")?;
    let parts: Vec<&str> = date.splitn(3, '-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(format!("invalid date {date:?}, expected YYYY-MM-DD").into());
    };
    let (year, month, day) = (year.parse::<i32>()?, month.parse::<u32>()?, day.parse::<u32>()?);
    Ok(JulianCalendar.to_days(year, month, day, moment.hours / 24.0)?)
}

fn load_table_set(args: &Args) -> Result<TableSet> {
    let mut loader = TableSetLoader::new();
    if let Some(dir) = &args.data_dir {
        loader = loader.with_data_dir(dir);
    }
    if let Some(path) = &args.config {
        loader = loader.with_config(EphemerisConfig::from_file(path)?);
    }
    let name: TableSetName = args.table_set.parse()?;
    Ok(loader.load(name)?)
}

fn print_truncated(result: &Truncated) {
    if result.is_exact() {
        println!("{}", result.value);
    } else {
        println!("{} (remainder {})", result.value, result.remainder_f64());
    }
}

fn print_angle(label: &str, angle: &Angle) {
    println!("{:<10} {:#}", label, angle.rounded(2));
}

fn main() -> Result<()> {
    let args = Args::parse();

    match &args.command {
        Command::TruePos {
            body,
            moment,
            count,
            step,
            details,
        } => {
            let body: Body = body.parse()?;
            let set = load_table_set(&args)?;
            let start = days_of(moment)?;
            if *details {
                let d = set.details(body, start)?;
                println!("{:#?}", d);
            }
            for (days, angle) in batch::series(&set, body, start, *step, *count)? {
                let (y, m, d) = JulianCalendar.from_days(days);
                print_angle(&format!("{y}-{m:02}-{d:02}"), &angle);
            }
        }
        Command::Ascendant { moment, latitude } => {
            let set = load_table_set(&args)?;
            let ascendant = set.ascendant(days_of(moment)?, *latitude)?;
            print_angle("Ascendant", &ascendant);
        }
        Command::Houses {
            ascendant,
            latitude,
            method,
        } => {
            let method: HouseMethod = method.parse()?;
            let set = load_table_set(&args)?;
            let cusps = set.houses(&Angle::from_degrees(ascendant.clone()), *latitude, method)?;
            for (i, cusp) in cusps.iter().enumerate() {
                print_angle(&format!("House {}", i + 1), cusp);
            }
        }
        Command::Eval {
            expression,
            with,
            operation,
            precision,
        } => {
            let result = match (with, operation) {
                (Some(b), Some(op)) => op.parse::<Operation>()?.apply(expression, b)?,
                _ => match precision {
                    Some(places) => evaluate_with_precision(expression, *places)?,
                    None => evaluate(expression)?,
                },
            };
            print_truncated(&result);
        }
        Command::ToFloat { literal } => {
            println!("{}", calculations::to_float(literal)?);
        }
        Command::FromFloat { value, precision } => {
            print_truncated(&calculations::from_float(*value, *precision)?);
        }
    }

    Ok(())
}
