//! Fixture builders for the "production map": a 20x20 usable grid with 12
//! AGVs and 100 tasks shuttling between a ring of start/end points, used by
//! the integration tests and the `run_sim` demo binary.

use crate::geom::{Direction, Point};
use crate::map_element::{ElementKind, MapElement};
use crate::task::{Priority, TaskRecord};

/// Number of AGVs the production fixture spawns.
pub const PRODUCTION_AGV_COUNT: usize = 12;
/// Number of tasks the production fixture generates.
pub const PRODUCTION_TASK_COUNT: usize = 100;

/// Builds the production map: one start point and one end point per AGV
/// lane (named `SP01..SP12` / `EP01..EP12`), plus `PRODUCTION_AGV_COUNT`
/// AGVs spread along `y = 1`, all initially heading `Right`.
pub fn production_map() -> Vec<MapElement> {
    let mut elements = Vec::with_capacity(PRODUCTION_AGV_COUNT * 3);

    for lane in 0..PRODUCTION_AGV_COUNT {
        let y = 2 + lane as i32;
        elements.push(MapElement::new(
            ElementKind::StartPoint,
            format!("SP{:02}", lane + 1),
            Point::new(1, y),
            None,
        ));
        elements.push(MapElement::new(
            ElementKind::EndPoint,
            format!("EP{:02}", lane + 1),
            Point::new(20, y),
            None,
        ));
        elements.push(MapElement::new(
            ElementKind::Agv,
            format!("AGV{:02}", lane + 1),
            Point::new(10, y),
            Some(Direction::Right),
        ));
    }

    elements
}

/// Ticks of the production fixture's 4 `Priority::High` tasks, indices into
/// the 100-task sequence `production_tasks` builds.
const HIGH_PRIORITY_TASK_INDICES: [usize; 4] = [0, 25, 50, 75];

/// Deadline given to each High-priority task. Set to the default tick cap
/// (`SimConfig::default().tick_cap`) so delivery counts as on-time whenever
/// the run itself completes, independent of task shuffling.
const HIGH_PRIORITY_DEADLINE: u32 = 400;

/// Builds `PRODUCTION_TASK_COUNT` tasks cycling through every lane's
/// start/end point pair. Four tasks (see `HIGH_PRIORITY_TASK_INDICES`) are
/// `Priority::High` with a deadline; the rest are `Priority::Normal` with
/// no deadline.
pub fn production_tasks() -> Vec<TaskRecord> {
    (0..PRODUCTION_TASK_COUNT)
        .map(|i| {
            let lane = (i % PRODUCTION_AGV_COUNT) + 1;
            let high = HIGH_PRIORITY_TASK_INDICES.contains(&i);
            TaskRecord {
                external_id: format!("T{:04}", i + 1),
                start_point_name: format!("SP{lane:02}"),
                end_point_name: format!("EP{lane:02}"),
                priority: if high { Priority::High } else { Priority::Normal },
                deadline: if high { Some(HIGH_PRIORITY_DEADLINE) } else { None },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_map_has_one_agv_per_lane() {
        let elements = production_map();
        let agv_count = elements.iter().filter(|e| e.kind == ElementKind::Agv).count();
        assert_eq!(agv_count, PRODUCTION_AGV_COUNT);
    }

    #[test]
    fn production_tasks_count_matches_constant() {
        assert_eq!(production_tasks().len(), PRODUCTION_TASK_COUNT);
    }

    #[test]
    fn every_task_references_an_existing_point() {
        let elements = production_map();
        for task in production_tasks() {
            assert!(elements.iter().any(|e| e.kind == ElementKind::StartPoint && e.name == task.start_point_name));
            assert!(elements.iter().any(|e| e.kind == ElementKind::EndPoint && e.name == task.end_point_name));
        }
    }

    #[test]
    fn exactly_four_tasks_are_high_priority_with_a_deadline() {
        let tasks = production_tasks();
        let high: Vec<_> = tasks.iter().filter(|t| t.priority == Priority::High).collect();
        assert_eq!(high.len(), 4);
        assert!(high.iter().all(|t| t.deadline == Some(HIGH_PRIORITY_DEADLINE)));
        assert!(tasks.iter().filter(|t| t.priority == Priority::Normal).all(|t| t.deadline.is_none()));
    }
}
