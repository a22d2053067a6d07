//! # Configuration
//!
//! Run-wide knobs for a scheduler run, built with the same
//! `XBuilder`-returned-from-`X::new`-consumed-by-`.build()` pattern the
//! rest of the crate uses for its data types.

use crate::geom::Direction;
use crate::verbose::VerboseLevel;

/// Configuration for a [`crate::context::Context`] / [`crate::scheduler::Scheduler`] pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Usable grid size as `(width, height)`, coordinates starting at 1.
    pub grid_size: (i32, i32),
    /// Simulated seconds after which `Process` fails as a deadlock/timeout.
    pub tick_cap: u32,
    /// Heading assigned to an AGV whose map row has no `pitch` column.
    pub default_heading: Direction,
    /// Logging verbosity for scheduler phases.
    pub verbose: VerboseLevel,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            grid_size: (21, 21),
            tick_cap: 400,
            default_heading: Direction::Right,
            verbose: VerboseLevel::None,
        }
    }
}

impl SimConfig {
    pub fn builder() -> SimConfigBuilder {
        SimConfigBuilder { config: SimConfig::default() }
    }
}

/// Builder for [`SimConfig`].
#[derive(Debug, Clone, Copy)]
pub struct SimConfigBuilder {
    config: SimConfig,
}

impl SimConfigBuilder {
    pub fn with_grid_size(mut self, width: i32, height: i32) -> Self {
        self.config.grid_size = (width, height);
        self
    }

    pub fn with_tick_cap(mut self, tick_cap: u32) -> Self {
        self.config.tick_cap = tick_cap;
        self
    }

    pub fn with_default_heading(mut self, heading: Direction) -> Self {
        self.config.default_heading = heading;
        self
    }

    pub fn with_verbose(mut self, verbose: VerboseLevel) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> SimConfig {
        self.config
    }
}
