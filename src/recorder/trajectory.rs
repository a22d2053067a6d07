use crate::agv::Agv;
use crate::geom::Point;
use crate::task::{Priority, Task, TaskId};

/// One recorded observation of a single AGV at a single simulated second.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryRow {
    pub timestamp: u32,
    pub agv_name: String,
    pub position: Point,
    pub heading_degrees: u32,
    pub loaded: bool,
    pub destination_name: Option<String>,
    pub emergency: bool,
    pub task_id: Option<TaskId>,
}

/// Append-only trajectory log. `rows()` is in timestamp order, grouped by
/// tick (every AGV's row for tick *t* before any row for tick *t+1*).
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    rows: Vec<TrajectoryRow>,
}

impl Recorder {
    /// Snapshots every AGV at tick 0: no AGV has a loaded task yet, so every
    /// row has an empty destination and `emergency=false`.
    pub fn new(agvs: &[Agv]) -> Recorder {
        let mut recorder = Recorder { rows: Vec::new() };
        recorder.add(0, agvs, &[]);
        recorder
    }

    /// Appends one row per AGV for simulated second `ts`. `emergency` is
    /// `true` exactly when the AGV's loaded task is `Priority::High` — an
    /// idle or tentatively-assigned AGV always records `false`.
    pub fn add(&mut self, ts: u32, agvs: &[Agv], tasks: &[Task]) {
        for agv in agvs {
            let loaded_task = agv.loaded_task.and_then(|task_id| tasks.get(task_id.0));
            let destination_name = loaded_task.map(|t| t.record.end_point_name.clone());
            let emergency = loaded_task.is_some_and(|t| t.priority() == Priority::High);

            self.rows.push(TrajectoryRow {
                timestamp: ts,
                agv_name: agv.name.clone(),
                position: agv.position,
                heading_degrees: agv.heading.degrees(),
                loaded: agv.is_loaded,
                destination_name,
                emergency,
                task_id: agv.loaded_task,
            });
        }
    }

    pub fn rows(&self) -> &[TrajectoryRow] {
        &self.rows
    }

    /// Rows for a single AGV, in timestamp order.
    pub fn rows_for(&self, agv_name: &str) -> Vec<&TrajectoryRow> {
        self.rows.iter().filter(|r| r.agv_name == agv_name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agv::AgvId;
    use crate::geom::Direction;
    use crate::task::TaskRecord;

    #[test]
    fn new_snapshots_every_agv_at_tick_zero() {
        let agvs = vec![
            Agv::new(AgvId(0), "AGV01", Point::new(1, 1), Direction::Right),
            Agv::new(AgvId(1), "AGV02", Point::new(2, 2), Direction::Up),
        ];
        let recorder = Recorder::new(&agvs);
        assert_eq!(recorder.rows().len(), 2);
        assert!(recorder.rows().iter().all(|r| r.timestamp == 0 && !r.emergency && r.destination_name.is_none()));
    }

    #[test]
    fn rows_for_filters_by_agv_name() {
        let agvs = vec![Agv::new(AgvId(0), "AGV01", Point::new(1, 1), Direction::Right)];
        let mut recorder = Recorder::new(&agvs);
        recorder.add(1, &agvs, &[]);
        assert_eq!(recorder.rows_for("AGV01").len(), 2);
        assert_eq!(recorder.rows_for("GHOST").len(), 0);
    }

    #[test]
    fn emergency_flag_follows_loaded_task_priority_not_cross_lock_state() {
        let mut agv = Agv::new(AgvId(0), "AGV01", Point::new(1, 1), Direction::Right);
        let record = TaskRecord {
            external_id: "T1".to_string(),
            start_point_name: "SP".to_string(),
            end_point_name: "EP".to_string(),
            priority: Priority::High,
            deadline: None,
        };
        let mut task = Task::new(TaskId(0), record, Point::new(1, 1), Point::new(5, 5));
        task.load_by(AgvId(0), 0);
        agv.load(TaskId(0));

        let mut recorder = Recorder::new(&[agv.clone()]);
        recorder.add(1, &[agv], &[task]);

        let row = &recorder.rows_for("AGV01")[1];
        assert!(row.emergency);
        assert_eq!(row.destination_name.as_deref(), Some("EP"));
    }
}
