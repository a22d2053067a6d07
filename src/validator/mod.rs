//! # Validator
//!
//! An independent oracle over a recorded trajectory: a pure function that
//! checks a run for physical and logical consistency without re-running the
//! scheduler. Deliberately never panics on a normal rule violation — it
//! reports every violation it finds instead of throwing on the first one,
//! so a caller gets the full picture of a broken run.
mod validator;

pub use self::validator::*;
