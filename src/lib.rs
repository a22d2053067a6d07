//! Core library for time-stepped multi-AGV warehouse fleet scheduling on a
//! discrete grid: oriented A* pathfinding, an eight-phase per-tick
//! scheduler, a trajectory recorder and an independent validator.
//!
//! A typical run: build a [`context::Context`] from map elements and task
//! records, then call [`context::Context::process_to_complete`] and inspect
//! `context.recorder`.
//!
//! ```rust
//! use agv_fleet_sim_core::config::SimConfig;
//! use agv_fleet_sim_core::context::Context;
//! use agv_fleet_sim_core::utils::fixtures::{production_map, production_tasks};
//!
//! let mut ctx = Context::new(production_map(), production_tasks(), SimConfig::default()).unwrap();
//! ctx.process_to_complete().unwrap();
//! assert!(ctx.all_tasks_completed());
//! ```
pub mod agv;
pub mod config;
pub mod context;
pub mod error;
pub mod geom;
pub mod io;
pub mod map_element;
pub mod planner;
pub mod recorder;
pub mod scheduler;
pub mod scoring;
pub mod task;
pub mod utils;
pub mod validator;
pub mod verbose;

pub use crate::config::SimConfig;
pub use crate::context::Context;
pub use crate::error::SimError;
