//! # AGV Module
//!
//! The AGV state machine: position, heading, load status and planned timed
//! path, with the predicates ([`Agv::should_move`], [`Agv::should_turn`],
//! [`Agv::can_unload`]) and actuators ([`Agv::turn`], [`Agv::advance`],
//! [`Agv::load`], [`Agv::unload`]) the scheduler drives each tick.
//!
//! ## Usage
//!
//! ```rust
//! use agv_fleet_sim_core::agv::{Agv, AgvId};
//! use agv_fleet_sim_core::geom::{Direction, Point};
//!
//! let agv = Agv::new(AgvId(0), "AGV01", Point::new(1, 1), Direction::Right);
//! assert!(!agv.is_loaded);
//! ```
mod agv;

pub use self::agv::*;
