//! # Planner Module
//!
//! Oriented A* pathfinding over the warehouse grid.
//!
//! This module provides shortest-time path computation between two grid
//! cells, where state is `(position, heading)` and turning in place costs an
//! extra second — supporting the scheduler's need to know not just *how
//! far* but *how long* a route will take an AGV.
//!
//! ## Components
//!
//! - [`astar::shortest_path`] - A* search over `(position, heading)` states
//! - [`heuristics::heuristic`] - Manhattan-distance heuristic
//! - [`path::compute_timing`] / [`path::PathTimePoint`] - cumulative-second annotation of a raw path
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::HashSet;
//! use agv_fleet_sim_core::geom::{Direction, Point};
//! use agv_fleet_sim_core::planner::{shortest_path, compute_timing};
//!
//! let path = shortest_path(Point::new(1, 1), Point::new(3, 1), Direction::Right, &HashSet::new(), None).unwrap();
//! let timed = compute_timing(&path, Direction::Right);
//! assert_eq!(timed.last().unwrap().time_cost, 2);
//! ```
pub mod astar;
pub mod heuristics;
pub mod path;

pub use self::{astar::*, path::*};
