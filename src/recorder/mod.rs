//! # Recorder
//!
//! Append-only trajectory log: one row per AGV per simulated tick, starting
//! with a tick-0 snapshot at construction. Independent of the
//! [`crate::validator`] module so a run can be validated without re-deriving
//! the recorded rows from scratch.
mod trajectory;

pub use self::trajectory::*;
