//! # CSV I/O
//!
//! Hand-rolled parsers and writers for the three CSV formats the scheduler
//! exchanges with the outside world: the map file, the task file, and the
//! trajectory export. No `csv` crate dependency — parsing is simple enough
//! (comma-split, no quoting or embedded commas in any column) that a small
//! hand-rolled parser with line-numbered errors is clearer than pulling in a
//! general-purpose CSV engine for it.
mod map_csv;
mod task_csv;
mod trajectory_csv;

pub use self::map_csv::*;
pub use self::task_csv::*;
pub use self::trajectory_csv::*;

use std::fmt;

/// A CSV parse failure, carrying the 1-based line number it occurred on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvError {
    MissingColumn { line: usize, column: &'static str },
    InvalidValue { line: usize, column: &'static str, value: String },
}

impl fmt::Display for CsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvError::MissingColumn { line, column } => write!(f, "line {line}: missing column '{column}'"),
            CsvError::InvalidValue { line, column, value } => {
                write!(f, "line {line}: invalid value '{value}' for column '{column}'")
            }
        }
    }
}

impl std::error::Error for CsvError {}

fn column<'a>(fields: &'a [&str], index: usize, line: usize, name: &'static str) -> Result<&'a str, CsvError> {
    fields.get(index).map(|s| s.trim()).ok_or(CsvError::MissingColumn { line, column: name })
}

fn parse_i32(raw: &str, line: usize, name: &'static str) -> Result<i32, CsvError> {
    raw.parse::<i32>().map_err(|_| CsvError::InvalidValue { line, column: name, value: raw.to_string() })
}

fn parse_u32(raw: &str, line: usize, name: &'static str) -> Result<u32, CsvError> {
    raw.parse::<u32>().map_err(|_| CsvError::InvalidValue { line, column: name, value: raw.to_string() })
}

fn lines_of(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty())
}
