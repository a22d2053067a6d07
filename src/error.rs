//! Top-level error type aggregating every module's error enum, for callers
//! (the demo binary, integration tests) that want one `Result` to propagate
//! with `?` instead of matching on each module separately.

use crate::agv::AgvError;
use crate::context::ContextError;
use crate::geom::NotAdjacent;
use crate::io::CsvError;
use crate::planner::AStarError;
use crate::scheduler::SchedulerError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    Context(ContextError),
    Scheduler(SchedulerError),
    Agv(AgvError),
    Planner(AStarError),
    Geom(NotAdjacent),
    Csv(CsvError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Context(e) => write!(f, "{e}"),
            SimError::Scheduler(e) => write!(f, "{e}"),
            SimError::Agv(e) => write!(f, "{e}"),
            SimError::Planner(e) => write!(f, "{e}"),
            SimError::Geom(e) => write!(f, "{e}"),
            SimError::Csv(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<ContextError> for SimError {
    fn from(e: ContextError) -> Self {
        SimError::Context(e)
    }
}

impl From<SchedulerError> for SimError {
    fn from(e: SchedulerError) -> Self {
        SimError::Scheduler(e)
    }
}

impl From<AgvError> for SimError {
    fn from(e: AgvError) -> Self {
        SimError::Agv(e)
    }
}

impl From<AStarError> for SimError {
    fn from(e: AStarError) -> Self {
        SimError::Planner(e)
    }
}

impl From<NotAdjacent> for SimError {
    fn from(e: NotAdjacent) -> Self {
        SimError::Geom(e)
    }
}

impl From<CsvError> for SimError {
    fn from(e: CsvError) -> Self {
        SimError::Csv(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_and_displays_a_context_error() {
        let err: SimError = ContextError::EmptyMap.into();
        assert_eq!(err.to_string(), "map has no elements");
    }
}
