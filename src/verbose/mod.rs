//! # Logging Module
//!
//! Structured logging for scheduler debugging and monitoring, using the
//! `tracing` crate with JSON output.
//!
//! **Most of the time an end-developer should not use this module
//! directly, except for setting the global logging level and using the
//! logging macros.**
//!
//! ## Components
//!
//! - [`VerboseLevel`] - Hierarchical debug levels (None → Main → Additional → Detailed → All)
//! - Event constants - Predefined event names for scheduler phases
//! - Macros - `log_main!`, `log_additional!`, `log_detailed!`, `log_all!`
//!
//! ## Quick Start
//!
//! ```rust
//! use agv_fleet_sim_core::verbose::{set_verbose_level, VerboseLevel, EVENT_TICK};
//! use agv_fleet_sim_core::log_main;
//!
//! set_verbose_level(VerboseLevel::Main);
//! log_main!(EVENT_TICK, "tick processed", tick = 1);
//! ```
pub mod verbose;

pub use self::verbose::*;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber on first call; subsequent calls are no-ops.
pub fn ensure_logger_init() {
    INIT.call_once(|| {
        init_logger();
    });
}
