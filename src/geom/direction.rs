//! Cardinal heading for grid-aligned AGV motion.

use crate::geom::point::Point;
use std::fmt;

/// Error returned when a heading is derived between two non-adjacent points.
///
/// Per the data model's adjacency rule this is a programmer error: callers
/// are expected to only ever derive headings between cells that are already
/// known to be adjacent (e.g. consecutive waypoints of a planned path).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotAdjacent {
    pub from: Point,
    pub to: Point,
}

impl fmt::Display for NotAdjacent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot derive heading: {} and {} are not adjacent",
            self.from, self.to
        )
    }
}

impl std::error::Error for NotAdjacent {}

/// One of the four cardinal headings, canonically represented by its degree
/// value. Note: `Up` increases `y` (the coordinate system treats +y as up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}

impl Direction {
    /// Derives the heading from `from` to an adjacent `to`.
    ///
    /// # Errors
    ///
    /// Returns [`NotAdjacent`] if the two points are not Manhattan-1 apart.
    ///
    /// # Example
    ///
    /// ```
    /// use agv_fleet_sim_core::geom::{Direction, Point};
    /// let h = Direction::between(Point::new(1, 1), Point::new(2, 1)).unwrap();
    /// assert_eq!(h, Direction::Right);
    /// ```
    pub fn between(from: Point, to: Point) -> Result<Direction, NotAdjacent> {
        match (to.x - from.x, to.y - from.y) {
            (1, 0) => Ok(Direction::Right),
            (-1, 0) => Ok(Direction::Left),
            (0, 1) => Ok(Direction::Up),
            (0, -1) => Ok(Direction::Down),
            _ => Err(NotAdjacent { from, to }),
        }
    }

    /// Degree value used throughout the map/task/trajectory CSV formats.
    pub fn degrees(&self) -> u32 {
        match self {
            Direction::Right => 0,
            Direction::Up => 90,
            Direction::Left => 180,
            Direction::Down => 270,
        }
    }

    /// Parses a degree value from the external CSV representation.
    pub fn from_degrees(deg: u32) -> Option<Direction> {
        match deg % 360 {
            0 => Some(Direction::Right),
            90 => Some(Direction::Up),
            180 => Some(Direction::Left),
            270 => Some(Direction::Down),
            _ => None,
        }
    }

    /// The cell reached by moving one step in this heading from `from`.
    pub fn step(&self, from: Point) -> Point {
        match self {
            Direction::Right => Point::new(from.x + 1, from.y),
            Direction::Left => Point::new(from.x - 1, from.y),
            Direction::Up => Point::new(from.x, from.y + 1),
            Direction::Down => Point::new(from.x, from.y - 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}
