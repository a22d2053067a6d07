//! # Context
//!
//! `Context` is the single owner of all mutable simulation state: the AGV
//! and task arenas, the static obstacle set, map bounds, and the trajectory
//! recorder. A fresh `Context` is built per run; nothing here is shared
//! across runs (see `SPEC_FULL.md` §9, "Global state").
//!
//! The scheduler (`crate::scheduler`) is a set of functions operating on
//! `&mut Context` rather than a struct `Context` owns — giving the
//! per-tick orchestrator its own type while also having it own the state
//! it mutates would recreate exactly the bidirectional-ownership problem
//! the AGV/Task arena design avoids (see `DESIGN.md`).

use crate::agv::{Agv, AgvId};
use crate::geom::{Point, Rect};
use crate::map_element::{ElementKind, MapElement};
use crate::recorder::Recorder;
use crate::scheduler::{self, SchedulerError};
use crate::task::{Task, TaskId, TaskRecord};
use crate::config::SimConfig;
use std::collections::HashSet;
use std::fmt;

/// Errors raised while building a [`Context`] from map elements and task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    EmptyMap,
    UnknownStartPoint { task_external_id: String, name: String },
    UnknownEndPoint { task_external_id: String, name: String },
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::EmptyMap => write!(f, "map has no elements"),
            ContextError::UnknownStartPoint { task_external_id, name } => write!(
                f,
                "task '{}' references unknown start point '{}'",
                task_external_id, name
            ),
            ContextError::UnknownEndPoint { task_external_id, name } => write!(
                f,
                "task '{}' references unknown end point '{}'",
                task_external_id, name
            ),
        }
    }
}

impl std::error::Error for ContextError {}

/// Owns every piece of mutable and immutable state for one simulation run.
pub struct Context {
    pub map_elements: Vec<MapElement>,
    pub agvs: Vec<Agv>,
    pub tasks: Vec<Task>,
    pub fixed_obstacles: HashSet<Point>,
    pub bounds: Rect,
    pub config: SimConfig,
    pub timestamp: u32,
    pub recorder: Recorder,
}

impl Context {
    /// Builds a fresh `Context`. Derives `bounds` from every map element's
    /// min/max coordinates, `fixed_obstacles` from every start/end point cell
    /// plus a one-cell ring just outside `bounds`, one [`Agv`] per
    /// `MapElement::Agv` row, and one [`Task`] per `TaskRecord` in input
    /// order (order matters: it feeds the FIFO tie-break in pending-task
    /// ordering).
    pub fn new(
        map_elements: Vec<MapElement>,
        task_records: Vec<TaskRecord>,
        config: SimConfig,
    ) -> Result<Context, ContextError> {
        let bounds = Rect::bounding(map_elements.iter().map(|e| e.position)).ok_or(ContextError::EmptyMap)?;

        let mut fixed_obstacles: HashSet<Point> = HashSet::new();
        for element in &map_elements {
            if matches!(element.kind, ElementKind::StartPoint | ElementKind::EndPoint) {
                fixed_obstacles.insert(element.position);
            }
        }
        for x in (bounds.left - 1)..=(bounds.right + 1) {
            fixed_obstacles.insert(Point::new(x, bounds.bottom - 1));
            fixed_obstacles.insert(Point::new(x, bounds.top + 1));
        }
        for y in (bounds.bottom - 1)..=(bounds.top + 1) {
            fixed_obstacles.insert(Point::new(bounds.left - 1, y));
            fixed_obstacles.insert(Point::new(bounds.right + 1, y));
        }

        let mut agvs = Vec::new();
        for element in &map_elements {
            if element.kind == ElementKind::Agv {
                let heading = element.pitch.unwrap_or(config.default_heading);
                agvs.push(Agv::new(AgvId(agvs.len()), element.name.clone(), element.position, heading));
            }
        }

        let find_point = |kind: ElementKind, name: &str| -> Option<Point> {
            map_elements
                .iter()
                .find(|e| e.kind == kind && e.name == name)
                .map(|e| e.position)
        };

        let mut tasks = Vec::with_capacity(task_records.len());
        for record in task_records {
            let start_position = find_point(ElementKind::StartPoint, &record.start_point_name).ok_or_else(|| {
                ContextError::UnknownStartPoint {
                    task_external_id: record.external_id.clone(),
                    name: record.start_point_name.clone(),
                }
            })?;
            let end_position = find_point(ElementKind::EndPoint, &record.end_point_name).ok_or_else(|| {
                ContextError::UnknownEndPoint {
                    task_external_id: record.external_id.clone(),
                    name: record.end_point_name.clone(),
                }
            })?;
            let id = TaskId(tasks.len());
            tasks.push(Task::new(id, record, start_position, end_position));
        }

        let recorder = Recorder::new(&agvs);

        Ok(Context {
            map_elements,
            agvs,
            tasks,
            fixed_obstacles,
            bounds,
            config,
            timestamp: 0,
            recorder,
        })
    }

    /// True once every task has reached [`crate::task::TaskStatus::Completed`].
    pub fn all_tasks_completed(&self) -> bool {
        self.tasks.iter().all(|t| t.status == crate::task::TaskStatus::Completed)
    }

    /// Advances the simulation by exactly one tick. A no-op once every task
    /// is completed.
    pub fn process(&mut self) -> Result<(), SchedulerError> {
        scheduler::process(self)
    }

    /// Repeatedly calls [`Context::process`] until every task is completed
    /// or the tick cap is exceeded.
    pub fn process_to_complete(&mut self) -> Result<(), SchedulerError> {
        while !self.all_tasks_completed() {
            self.process()?;
        }
        Ok(())
    }

    pub fn agv(&self, id: AgvId) -> &Agv {
        &self.agvs[id.0]
    }

    pub fn agv_mut(&mut self, id: AgvId) -> &mut Agv {
        &mut self.agvs[id.0]
    }

    pub fn task(&self, id: TaskId) -> &Task {
        &self.tasks[id.0]
    }

    pub fn task_mut(&mut self, id: TaskId) -> &mut Task {
        &mut self.tasks[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Direction;
    use crate::task::Priority;

    fn tiny_map() -> Vec<MapElement> {
        vec![
            MapElement::new(ElementKind::StartPoint, "SP01", Point::new(2, 5), None),
            MapElement::new(ElementKind::EndPoint, "EP01", Point::new(18, 5), None),
            MapElement::new(ElementKind::Agv, "AGV01", Point::new(5, 5), Some(Direction::Right)),
        ]
    }

    fn tiny_task() -> TaskRecord {
        TaskRecord {
            external_id: "1".to_string(),
            start_point_name: "SP01".to_string(),
            end_point_name: "EP01".to_string(),
            priority: Priority::Normal,
            deadline: None,
        }
    }

    #[test]
    fn derives_bounds_and_ring_obstacles() {
        let ctx = Context::new(tiny_map(), vec![tiny_task()], SimConfig::default()).unwrap();
        assert_eq!(ctx.bounds, Rect::new(2, 5, 18, 5));
        assert!(ctx.fixed_obstacles.contains(&Point::new(1, 5)));
        assert!(ctx.fixed_obstacles.contains(&Point::new(19, 5)));
        assert!(ctx.fixed_obstacles.contains(&Point::new(2, 5))); // start point itself
        assert!(ctx.fixed_obstacles.contains(&Point::new(18, 5))); // end point itself
    }

    #[test]
    fn unknown_start_point_is_an_error() {
        let mut task = tiny_task();
        task.start_point_name = "GHOST".to_string();
        let err = Context::new(tiny_map(), vec![task], SimConfig::default()).unwrap_err();
        assert!(matches!(err, ContextError::UnknownStartPoint { .. }));
    }

    #[test]
    fn empty_map_is_an_error() {
        let err = Context::new(vec![], vec![], SimConfig::default()).unwrap_err();
        assert_eq!(err, ContextError::EmptyMap);
    }

    #[test]
    fn recorder_snapshots_tick_zero_on_construction() {
        let ctx = Context::new(tiny_map(), vec![tiny_task()], SimConfig::default()).unwrap();
        assert_eq!(ctx.recorder.rows().len(), 1);
        assert_eq!(ctx.recorder.rows()[0].timestamp, 0);
    }
}
