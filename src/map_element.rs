//! # Map Element
//!
//! The three kinds of entity a map file places on the grid — start points,
//! end points and AGVs — share one shape (`name, x, y`, optional heading).
//! Modeled as a tagged variant rather than a class hierarchy per the
//! "Polymorphism over map elements" design note.

use crate::geom::{Direction, Point};
use std::fmt;

/// Which kind of entity a [`MapElement`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    StartPoint,
    EndPoint,
    Agv,
}

impl ElementKind {
    /// Parses the CSV `type` column, case-insensitively.
    pub fn parse(raw: &str) -> Option<ElementKind> {
        match raw.trim().to_ascii_lowercase().replace('_', "").as_str() {
            "startpoint" => Some(ElementKind::StartPoint),
            "endpoint" => Some(ElementKind::EndPoint),
            "agv" => Some(ElementKind::Agv),
            _ => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::StartPoint => write!(f, "start_point"),
            ElementKind::EndPoint => write!(f, "end_point"),
            ElementKind::Agv => write!(f, "agv"),
        }
    }
}

/// One row of the map file: a named point on the grid, with a heading
/// required for AGVs and absent for start/end points.
#[derive(Debug, Clone, PartialEq)]
pub struct MapElement {
    pub kind: ElementKind,
    pub name: String,
    pub position: Point,
    pub pitch: Option<Direction>,
}

impl MapElement {
    pub fn new(kind: ElementKind, name: impl Into<String>, position: Point, pitch: Option<Direction>) -> Self {
        MapElement { kind, name: name.into(), position, pitch }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parsing_is_case_insensitive() {
        assert_eq!(ElementKind::parse("StartPoint"), Some(ElementKind::StartPoint));
        assert_eq!(ElementKind::parse("start_point"), Some(ElementKind::StartPoint));
        assert_eq!(ElementKind::parse("ENDPOINT"), Some(ElementKind::EndPoint));
        assert_eq!(ElementKind::parse("Agv"), Some(ElementKind::Agv));
        assert_eq!(ElementKind::parse("bogus"), None);
    }
}
