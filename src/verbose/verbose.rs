use std::fmt;
use std::sync::OnceLock;
use tracing::Level;
use tracing_subscriber::{fmt as tracing_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Hierarchical logging levels for scheduler debugging.
///
/// Each level includes all lower levels, providing increasingly detailed
/// output. Uses JSON structured logging via the `tracing` crate.
///
/// # Examples
///
/// ```rust
/// use agv_fleet_sim_core::verbose::{VerboseLevel, set_verbose_level};
///
/// set_verbose_level(VerboseLevel::Main);
/// assert!(VerboseLevel::Detailed.is_at_least(VerboseLevel::Additional));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum VerboseLevel {
    /// No debug at all
    #[default]
    None = 0,
    /// Major simulation phases - `info` level
    Main = 1,
    /// Function-level details - `debug` level
    Additional = 2,
    /// Loop iterations and fine operations - `debug` level
    Detailed = 3,
    /// Everything including traces - `trace` level
    All = 4,
}

impl fmt::Display for VerboseLevel {
    /// Formats the verbosity level for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use agv_fleet_sim_core::verbose::VerboseLevel;
    ///
    /// assert_eq!(format!("{}", VerboseLevel::None), "none");
    /// assert_eq!(format!("{}", VerboseLevel::All), "all");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerboseLevel::None => "none",
            VerboseLevel::Main => "main",
            VerboseLevel::Additional => "additional",
            VerboseLevel::Detailed => "detailed",
            VerboseLevel::All => "all",
        };
        write!(f, "{}", s)
    }
}

impl From<VerboseLevel> for Level {
    fn from(level: VerboseLevel) -> Self {
        match level {
            VerboseLevel::None => Level::ERROR,
            VerboseLevel::Main => Level::INFO,
            VerboseLevel::Additional => Level::DEBUG,
            VerboseLevel::Detailed => Level::DEBUG,
            VerboseLevel::All => Level::TRACE,
        }
    }
}

// Event type constants, used as the `event` field on every log line so that
// phases can be filtered downstream without parsing the message text.
pub const EVENT_TICK: &str = "tick";
pub const EVENT_PHASE_UNLOAD: &str = "phase_unload";
pub const EVENT_PHASE_LOAD: &str = "phase_load";
pub const EVENT_PHASE_LOADED_MOVE: &str = "phase_loaded_move";
pub const EVENT_PHASE_LOADED_TURN: &str = "phase_loaded_turn";
pub const EVENT_PHASE_IDLE_ASSIGN: &str = "phase_idle_assign";
pub const EVENT_PHASE_IDLE_MOVE: &str = "phase_idle_move";
pub const EVENT_PHASE_PARKING: &str = "phase_parking";
pub const EVENT_PHASE_RECORD: &str = "phase_record";
pub const EVENT_PLANNER_EMPTY_PATH: &str = "planner_empty_path";
pub const EVENT_CROSS_LOCK: &str = "cross_lock_override";

static VERBOSE_LEVEL: OnceLock<VerboseLevel> = OnceLock::new();
static LOGGER_INITIALIZED: OnceLock<bool> = OnceLock::new();

/// Initializes the process-wide tracing subscriber exactly once.
pub fn init_logger() {
    if LOGGER_INITIALIZED.set(true).is_ok() {
        tracing_subscriber::registry()
            .with(
                tracing_fmt::layer()
                    .json()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

/// Sets the global verbose level and lazily initializes the tracing subscriber.
pub fn set_verbose_level(level: VerboseLevel) {
    let _ = VERBOSE_LEVEL.set(level);
    init_logger();
}

/// Gets the current global verbose level (defaults to [`VerboseLevel::None`]).
pub fn get_verbose_level() -> VerboseLevel {
    *VERBOSE_LEVEL.get().unwrap_or(&VerboseLevel::None)
}

/// Checks if the current global verbose level is at least `level`.
pub fn is_verbose_level(level: VerboseLevel) -> bool {
    get_verbose_level() >= level
}

impl VerboseLevel {
    /// Checks if this level is at least `min_level`.
    pub fn is_at_least(self, min_level: VerboseLevel) -> bool {
        self >= min_level
    }
}

/// Logs a major simulation phase. Corresponds to [`VerboseLevel::Main`].
#[macro_export]
macro_rules! log_main {
    ($event:expr, $msg:literal, $($key:ident = $value:expr),*) => {
        if $crate::verbose::is_verbose_level($crate::verbose::VerboseLevel::Main) {
            tracing::info!(event = $event, $($key = $value,)* $msg);
        }
    };
}

/// Logs a function-level detail. Corresponds to [`VerboseLevel::Additional`].
///
/// Use for intermediate scheduler events such as a failed plan or a cross-lock override.
#[macro_export]
macro_rules! log_additional {
    ($event:expr, $msg:literal, $($key:ident = $value:expr),*) => {
        if $crate::verbose::is_verbose_level($crate::verbose::VerboseLevel::Additional) {
            tracing::debug!(event = $event, $($key = $value,)* $msg);
        }
    };
}

/// Logs a fine-grained, per-AGV detail. Corresponds to [`VerboseLevel::Detailed`].
#[macro_export]
macro_rules! log_detailed {
    ($event:expr, $msg:literal, $($key:ident = $value:expr),*) => {
        if $crate::verbose::is_verbose_level($crate::verbose::VerboseLevel::Detailed) {
            tracing::debug!(event = $event, $($key = $value,)* $msg);
        }
    };
}

/// Logs everything, including per-iteration A* search detail. Corresponds to [`VerboseLevel::All`].
#[macro_export]
macro_rules! log_all {
    ($event:expr, $msg:literal, $($key:ident = $value:expr),*) => {
        if $crate::verbose::is_verbose_level($crate::verbose::VerboseLevel::All) {
            tracing::trace!(event = $event, $($key = $value,)* $msg);
        }
    };
}
