use crate::geom::{Direction, Point};
use crate::planner::PathTimePoint;
use crate::task::TaskId;
use std::fmt;

/// Index into [`crate::context::Context`]'s AGV arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgvId(pub usize);

impl fmt::Display for AgvId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agv#{}", self.0)
    }
}

/// Errors raised by an AGV actuator invoked in a state that makes no sense,
/// e.g. `advance()` with no planned path. The scheduler never calls an
/// actuator without first checking the matching predicate, so these
/// indicate a scheduler bug, not a runtime condition to recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgvError {
    NoPlannedStep,
}

impl fmt::Display for AgvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgvError::NoPlannedStep => write!(f, "no planned next step to act on"),
        }
    }
}

impl std::error::Error for AgvError {}

/// An automated guided vehicle: position, heading, load status and its
/// currently planned timed path.
///
/// Invariants: `is_loaded` iff `loaded_task` is set; `planned_path`, when
/// non-empty, starts at `position` and every consecutive pair of waypoints
/// is adjacent (both maintained by construction — see [`Agv::advance`] and
/// [`Agv::set_planned_path`]).
#[derive(Debug, Clone)]
pub struct Agv {
    pub id: AgvId,
    pub name: String,
    pub position: Point,
    pub heading: Direction,
    pub is_loaded: bool,
    pub loaded_task: Option<TaskId>,
    pub planned_path: Vec<PathTimePoint>,
}

impl Agv {
    pub fn new(id: AgvId, name: impl Into<String>, position: Point, heading: Direction) -> Agv {
        Agv {
            id,
            name: name.into(),
            position,
            heading,
            is_loaded: false,
            loaded_task: None,
            planned_path: Vec::new(),
        }
    }

    /// Replaces the planned path. Panics in debug builds if the invariant
    /// (starts at `position`, consecutive waypoints adjacent) is violated —
    /// this is only ever called with output from [`crate::planner::shortest_path`]
    /// plus [`crate::planner::compute_timing`].
    pub fn set_planned_path(&mut self, path: Vec<PathTimePoint>) {
        if let Some(first) = path.first() {
            debug_assert_eq!(first.position, self.position);
        }
        debug_assert!(path.windows(2).all(|w| w[0].position.is_adjacent(&w[1].position)));
        self.planned_path = path;
    }

    /// `len(planned_path) > 1` and the heading to the next waypoint matches
    /// the current heading.
    pub fn should_move(&self) -> bool {
        self.next_heading().is_some_and(|h| h == self.heading)
    }

    /// `len(planned_path) > 1` and the heading to the next waypoint differs
    /// from the current heading.
    pub fn should_turn(&self) -> bool {
        self.next_heading().is_some_and(|h| h != self.heading)
    }

    /// `is_loaded` and the AGV's position is adjacent to `task_end_position`
    /// (the loaded task's drop point).
    pub fn can_unload(&self, task_end_position: Point) -> bool {
        self.is_loaded && self.position.is_adjacent(&task_end_position)
    }

    fn next_heading(&self) -> Option<Direction> {
        if self.planned_path.len() < 2 {
            return None;
        }
        Direction::between(self.position, self.planned_path[1].position).ok()
    }

    /// Turns toward `specified`, or toward the next planned waypoint if
    /// `specified` is `None`. In the latter case every remaining waypoint's
    /// `time_cost` is decremented by one, reflecting the second spent
    /// turning in place instead of moving.
    pub fn turn(&mut self, specified: Option<Direction>) -> Result<(), AgvError> {
        match specified {
            Some(heading) => {
                self.heading = heading;
            }
            None => {
                let heading = self.next_heading().ok_or(AgvError::NoPlannedStep)?;
                self.heading = heading;
                for wp in self.planned_path.iter_mut() {
                    wp.time_cost -= 1;
                }
            }
        }
        Ok(())
    }

    /// Advances to `planned_path[1]`, decrementing every remaining waypoint's
    /// `time_cost` by one and dropping the consumed head of the path.
    pub fn advance(&mut self) -> Result<(), AgvError> {
        if self.planned_path.len() < 2 {
            return Err(AgvError::NoPlannedStep);
        }
        self.position = self.planned_path[1].position;
        for wp in self.planned_path.iter_mut() {
            wp.time_cost -= 1;
        }
        self.planned_path.remove(0);
        Ok(())
    }

    /// Binds `task` as the loaded task. The caller is responsible for also
    /// calling [`crate::task::Task::load_by`] on that task — the two halves
    /// of this actuator live on different arenas (see `TaskId`'s docs), so
    /// the scheduler performs both updates in the same phase.
    pub fn load(&mut self, task: TaskId) {
        self.is_loaded = true;
        self.loaded_task = Some(task);
    }

    /// Clears the planned path and load state, returning the task that was
    /// being carried so the caller can finish updating it via
    /// [`crate::task::Task::unload`].
    pub fn unload(&mut self) -> Option<TaskId> {
        self.planned_path.clear();
        self.is_loaded = false;
        self.loaded_task.take()
    }
}
