//! # Geometry Module
//!
//! Grid primitives shared by the planner, the AGV state machine and the
//! validator: [`Point`] (a grid cell), [`Direction`] (one of the four
//! cardinal headings) and [`Rect`] (map bounds).
//!
//! ## Usage
//!
//! ```rust
//! use agv_fleet_sim_core::geom::{Point, Direction};
//!
//! let a = Point::new(1, 1);
//! let b = Point::new(2, 1);
//! assert_eq!(Direction::between(a, b).unwrap(), Direction::Right);
//! ```

mod direction;
mod point;
mod rect;

pub use self::{direction::*, point::*, rect::*};
