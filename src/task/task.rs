use crate::agv::AgvId;
use crate::geom::Point;
use std::fmt;

/// Index into [`crate::context::Context`]'s task arena.
///
/// Using a plain index instead of a shared owning pointer keeps the
/// AGV<->Task back-reference acyclic (see the "Cycles and back-references"
/// design note): a [`Task`] stores the [`AgvId`] that holds it, an
/// [`crate::agv::Agv`] stores the [`TaskId`] it is carrying, and neither owns
/// the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub usize);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Task priority. Affects pending-task ordering and scoring, never motion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Normal,
    High,
}

impl Priority {
    /// Parses the CSV `priority` column. Unrecognized values, including the
    /// legacy `Medium`/`Low` tiers, silently map to `Normal` (see
    /// `DESIGN.md` for the open question this preserves).
    pub fn parse(raw: &str) -> Priority {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            _ => Priority::Normal,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Normal => write!(f, "normal"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// Runtime lifecycle of a [`Task`]. Transitions only move forward:
/// `Pending -> Running` (at load) `-> Completed` (at unload).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Running => write!(f, "running"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

/// The immutable part of a transport task, as parsed from the task CSV or
/// built directly by a caller.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub external_id: String,
    pub start_point_name: String,
    pub end_point_name: String,
    pub priority: Priority,
    pub deadline: Option<u32>,
}

/// A transport task tracked by the scheduler for the lifetime of a run.
///
/// `pickup_position` is derived once at construction from the start point's
/// column (`x > 10` picks the left neighbor of `start_position`, otherwise
/// the right neighbor — see `SPEC_FULL.md` §3/§6).
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub record: TaskRecord,
    pub start_position: Point,
    pub end_position: Point,
    pub pickup_position: Point,
    pub status: TaskStatus,
    pub assigned_agv: Option<AgvId>,
    pub start_ts: Option<u32>,
    pub complete_ts: Option<u32>,
}

impl Task {
    pub fn new(
        id: TaskId,
        record: TaskRecord,
        start_position: Point,
        end_position: Point,
    ) -> Task {
        let pickup_position = if start_position.x > 10 {
            Point::new(start_position.x - 1, start_position.y)
        } else {
            Point::new(start_position.x + 1, start_position.y)
        };
        Task {
            id,
            record,
            start_position,
            end_position,
            pickup_position,
            status: TaskStatus::Pending,
            assigned_agv: None,
            start_ts: None,
            complete_ts: None,
        }
    }

    pub fn priority(&self) -> Priority {
        self.record.priority
    }

    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    /// Marks the task as picked up by `agv` at simulated second `ts`.
    /// Called by [`crate::agv::Agv::load`]; never call directly from
    /// scheduler code so the status transition and the AGV's `is_loaded`
    /// flag stay in lockstep.
    pub fn load_by(&mut self, agv: AgvId, ts: u32) {
        self.status = TaskStatus::Running;
        self.assigned_agv = Some(agv);
        self.start_ts = Some(ts);
    }

    /// Marks the task as delivered at simulated second `ts`. Called by
    /// [`crate::agv::Agv::unload`].
    pub fn unload(&mut self, ts: u32) {
        self.status = TaskStatus::Completed;
        self.complete_ts = Some(ts);
    }

    /// Duration between load and unload, once both are known.
    pub fn duration(&self) -> Option<u32> {
        match (self.start_ts, self.complete_ts) {
            (Some(start), Some(end)) => Some(end.saturating_sub(start)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TaskRecord {
        TaskRecord {
            external_id: "T1".to_string(),
            start_point_name: "SP01".to_string(),
            end_point_name: "EP01".to_string(),
            priority: Priority::Normal,
            deadline: None,
        }
    }

    #[test]
    fn pickup_left_when_start_x_greater_than_ten() {
        let task = Task::new(TaskId(0), record(), Point::new(15, 10), Point::new(1, 1));
        assert_eq!(task.pickup_position, Point::new(14, 10));
    }

    #[test]
    fn pickup_right_when_start_x_at_most_ten() {
        let task = Task::new(TaskId(0), record(), Point::new(3, 10), Point::new(1, 1));
        assert_eq!(task.pickup_position, Point::new(4, 10));
    }

    #[test]
    fn legacy_priority_maps_to_normal() {
        assert_eq!(Priority::parse("Medium"), Priority::Normal);
        assert_eq!(Priority::parse("Low"), Priority::Normal);
        assert_eq!(Priority::parse("garbage"), Priority::Normal);
        assert_eq!(Priority::parse("HIGH"), Priority::High);
    }

    #[test]
    fn load_then_unload_transitions_status() {
        let mut task = Task::new(TaskId(0), record(), Point::new(3, 10), Point::new(1, 1));
        assert!(task.is_pending());
        task.load_by(AgvId(2), 5);
        assert_eq!(task.status, TaskStatus::Running);
        assert_eq!(task.assigned_agv, Some(AgvId(2)));
        task.unload(40);
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.duration(), Some(35));
    }
}
