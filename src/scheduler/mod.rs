//! # Scheduler
//!
//! The per-tick orchestrator. Operates on `&mut Context` — see
//! `crate::context` for why this isn't a struct owning the state it
//! mutates.
//!
//! Tick phases, in order: unload, load, loaded movement, loaded turning,
//! idle assignment, idle movement, parking, record.
pub mod batch_move;
pub mod obstacles;
pub mod ordering;
mod scheduler;

pub use self::scheduler::*;
