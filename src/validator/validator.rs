use crate::geom::{Direction, Point};
use crate::map_element::{ElementKind, MapElement};
use crate::recorder::{Recorder, TrajectoryRow};
use crate::task::Task;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One violation found while validating a recorded trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: String,
    pub ts: u32,
    pub agv_name: String,
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ts={} {}] {}", self.ts, self.agv_name, self.message)
    }
}

fn violation(ts: u32, agv_name: impl Into<String>, message: impl Into<String>) -> ValidationResult {
    ValidationResult { valid: false, message: message.into(), ts, agv_name: agv_name.into() }
}

/// Checks a recorded trajectory against every invariant the scheduler is
/// supposed to uphold. Returns one [`ValidationResult`] per violation found;
/// an empty `Vec` means the run is fully consistent.
///
/// `map_elements` backs the pickup/delivery-legality checks (pickup cells
/// are derived from start points the same way `Task::new` derives them);
/// `grid_size` bounds the "AGV stayed on the grid" check; `tasks` backs the
/// task-sequence and trajectory-coverage checks.
pub fn validate(recorder: &Recorder, map_elements: &[MapElement], tasks: &[Task], grid_size: (i32, i32)) -> Vec<ValidationResult> {
    let mut results = Vec::new();

    check_bounds(recorder, grid_size, &mut results);
    check_speed_and_geometry(recorder, &mut results);
    check_move_while_turning(recorder, &mut results);
    check_rotation(recorder, &mut results);
    check_collisions(recorder, &mut results);
    check_pickup_legality(recorder, map_elements, &mut results);
    check_delivery_legality(recorder, map_elements, &mut results);
    check_task_sequence(recorder, map_elements, tasks, &mut results);
    check_trajectory_coverage(recorder, map_elements, tasks, &mut results);

    results
}

fn group_by_agv(recorder: &Recorder) -> Vec<(&str, Vec<&TrajectoryRow>)> {
    let mut by_agv: HashMap<&str, Vec<&TrajectoryRow>> = HashMap::new();
    for row in recorder.rows() {
        by_agv.entry(&row.agv_name).or_default().push(row);
    }
    by_agv.into_iter().collect()
}

/// The pickup cell the data model derives from a start point: its left
/// neighbor when `x > 10`, otherwise its right neighbor (see `Task::new`).
fn derive_pickup(start: Point) -> Point {
    if start.x > 10 {
        Point::new(start.x - 1, start.y)
    } else {
        Point::new(start.x + 1, start.y)
    }
}

fn pickup_points(map_elements: &[MapElement]) -> HashMap<Point, String> {
    map_elements
        .iter()
        .filter(|e| e.kind == ElementKind::StartPoint)
        .map(|e| (derive_pickup(e.position), e.name.clone()))
        .collect()
}

fn end_points(map_elements: &[MapElement]) -> HashMap<&str, Point> {
    map_elements.iter().filter(|e| e.kind == ElementKind::EndPoint).map(|e| (e.name.as_str(), e.position)).collect()
}

fn check_bounds(recorder: &Recorder, grid_size: (i32, i32), results: &mut Vec<ValidationResult>) {
    for row in recorder.rows() {
        if !row.position.in_bounds(grid_size.0, grid_size.1) {
            results.push(violation(row.timestamp, row.agv_name.clone(), format!("position {} is outside the grid", row.position)));
        }
    }
}

/// Non-adjacent jumps, movement faster than the elapsed ticks allow, and
/// diagonal movement (`Δx≠0 ∧ Δy≠0` between consecutive rows).
fn check_speed_and_geometry(recorder: &Recorder, results: &mut Vec<ValidationResult>) {
    for (name, rows) in group_by_agv(recorder) {
        for pair in rows.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            if prev.position == cur.position {
                continue;
            }
            if !prev.position.is_adjacent(&cur.position) {
                results.push(violation(cur.timestamp, name, format!("non-adjacent jump from {} to {}", prev.position, cur.position)));
                continue;
            }

            let dx = (cur.position.x - prev.position.x).abs();
            let dy = (cur.position.y - prev.position.y).abs();
            let dt = cur.timestamp.saturating_sub(prev.timestamp).max(1) as i32;
            if dx + dy > dt {
                results.push(violation(cur.timestamp, name, format!("moved {} cells in {dt} tick(s)", dx + dy)));
            }
            if dx != 0 && dy != 0 {
                results.push(violation(cur.timestamp, name, "diagonal movement between consecutive rows"));
            }
        }
    }
}

/// If the AGV moved, the heading recorded at the *previous* row must equal
/// the heading implied by that move — a turn always happens a tick ahead of
/// the move it enables.
fn check_move_while_turning(recorder: &Recorder, results: &mut Vec<ValidationResult>) {
    for (name, rows) in group_by_agv(recorder) {
        for pair in rows.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            if prev.position == cur.position || !prev.position.is_adjacent(&cur.position) {
                continue;
            }
            let implied = Direction::between(prev.position, cur.position).expect("adjacency checked above");
            if implied.degrees() != prev.heading_degrees {
                results.push(violation(
                    cur.timestamp,
                    name,
                    format!("moved {implied} but the previous tick's recorded heading was {} degrees", prev.heading_degrees),
                ));
            }
        }
    }
}

/// Rotation must be a quarter turn (90 or 270 degrees; 180 accepted as two
/// quarter turns recorded as one row gap). Turning on the same tick the
/// loaded flag changes is flagged separately.
fn check_rotation(recorder: &Recorder, results: &mut Vec<ValidationResult>) {
    for (name, rows) in group_by_agv(recorder) {
        for pair in rows.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            if prev.heading_degrees == cur.heading_degrees {
                continue;
            }
            let delta = (cur.heading_degrees as i32 - prev.heading_degrees as i32).rem_euclid(360);
            if delta != 90 && delta != 180 && delta != 270 {
                results.push(violation(cur.timestamp, name, format!("rotated by {delta} degrees instead of a quarter turn")));
            }
            if prev.loaded != cur.loaded {
                results.push(violation(cur.timestamp, name, "turned on the same tick its loaded status changed"));
            }
        }
    }
}

fn check_collisions(recorder: &Recorder, results: &mut Vec<ValidationResult>) {
    let mut by_tick: HashMap<u32, Vec<&TrajectoryRow>> = HashMap::new();
    for row in recorder.rows() {
        by_tick.entry(row.timestamp).or_default().push(row);
    }

    let mut ticks: Vec<&u32> = by_tick.keys().collect();
    ticks.sort();

    for &ts in &ticks {
        let rows = &by_tick[ts];
        let mut seen: HashMap<(i32, i32), &str> = HashMap::new();
        for row in rows {
            if let Some(other) = seen.insert((row.position.x, row.position.y), row.agv_name.as_str()) {
                results.push(violation(*ts, row.agv_name.clone(), format!("occupies the same cell as {other} at {}", row.position)));
            }
        }
    }

    for pair in ticks.windows(2) {
        let (prev_ts, cur_ts) = (*pair[0], *pair[1]);
        let prev_positions: HashMap<&str, (i32, i32)> =
            by_tick[&prev_ts].iter().map(|r| (r.agv_name.as_str(), (r.position.x, r.position.y))).collect();
        let cur_positions: HashMap<&str, (i32, i32)> =
            by_tick[&cur_ts].iter().map(|r| (r.agv_name.as_str(), (r.position.x, r.position.y))).collect();

        for (&name_a, &pos_a_prev) in &prev_positions {
            let Some(&pos_a_cur) = cur_positions.get(name_a) else { continue };
            for (&name_b, &pos_b_prev) in &prev_positions {
                if name_a >= name_b {
                    continue;
                }
                let Some(&pos_b_cur) = cur_positions.get(name_b) else { continue };
                if pos_a_prev == pos_b_cur && pos_b_prev == pos_a_cur && pos_a_prev != pos_a_cur {
                    results.push(violation(cur_ts, name_a.to_string(), format!("swapped cells with {name_b} between ticks")));
                }
            }
        }
    }
}

fn check_pickup_legality(recorder: &Recorder, map_elements: &[MapElement], results: &mut Vec<ValidationResult>) {
    let pickups = pickup_points(map_elements);
    for (name, rows) in group_by_agv(recorder) {
        for pair in rows.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            if !prev.loaded && cur.loaded && !pickups.contains_key(&cur.position) {
                results.push(violation(cur.timestamp, name, format!("picked up at {} which is not a pickup cell", cur.position)));
            }
        }
    }
}

fn check_delivery_legality(recorder: &Recorder, map_elements: &[MapElement], results: &mut Vec<ValidationResult>) {
    let ends = end_points(map_elements);
    for (name, rows) in group_by_agv(recorder) {
        for pair in rows.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            if !(prev.loaded && !cur.loaded) {
                continue;
            }
            match prev.destination_name.as_deref() {
                None => results.push(violation(cur.timestamp, name, "unloaded with no recorded destination")),
                Some(dest_name) => match ends.get(dest_name) {
                    Some(&end_pos) if cur.position.is_adjacent(&end_pos) => {}
                    Some(&end_pos) => results.push(violation(
                        cur.timestamp,
                        name,
                        format!("delivered at {} which is not adjacent to {dest_name} at {end_pos}", cur.position),
                    )),
                    None => results.push(violation(cur.timestamp, name, format!("unknown destination '{dest_name}'"))),
                },
            }
        }
    }
}

/// One observed pickup: the start point it came from (derived from the
/// pickup cell) and the destination recorded on the same row.
fn pickup_events(recorder: &Recorder, map_elements: &[MapElement]) -> Vec<(u32, String, Option<String>)> {
    let pickups = pickup_points(map_elements);
    let mut events = Vec::new();
    for (_, rows) in group_by_agv(recorder) {
        for pair in rows.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            if !prev.loaded && cur.loaded {
                if let Some(start_point_name) = pickups.get(&cur.position) {
                    events.push((cur.timestamp, start_point_name.clone(), cur.destination_name.clone()));
                }
            }
        }
    }
    events.sort_by_key(|(ts, _, _)| *ts);
    events
}

/// Per start-point, the ordered destinations observed in the trajectory
/// (by pickup time) must equal the ordered destinations in the task list.
fn check_task_sequence(recorder: &Recorder, map_elements: &[MapElement], tasks: &[Task], results: &mut Vec<ValidationResult>) {
    let events = pickup_events(recorder, map_elements);

    let mut observed: HashMap<String, Vec<String>> = HashMap::new();
    for (_, start_point_name, destination_name) in &events {
        observed.entry(start_point_name.clone()).or_default().push(destination_name.clone().unwrap_or_default());
    }

    let mut expected: HashMap<String, Vec<String>> = HashMap::new();
    for task in tasks {
        expected.entry(task.record.start_point_name.clone()).or_default().push(task.record.end_point_name.clone());
    }

    for (start_point, observed_seq) in &observed {
        let expected_seq = expected.get(start_point).cloned().unwrap_or_default();
        if *observed_seq != expected_seq {
            results.push(violation(
                0,
                format!("start point {start_point}"),
                format!("observed pickup sequence {observed_seq:?} does not match the task list's order {expected_seq:?}"),
            ));
        }
    }
}

/// The number of distinct start-points that produced a pickup must not
/// exceed the number of distinct start-points named in the task list.
fn check_trajectory_coverage(recorder: &Recorder, map_elements: &[MapElement], tasks: &[Task], results: &mut Vec<ValidationResult>) {
    let events = pickup_events(recorder, map_elements);
    let observed: HashSet<&str> = events.iter().map(|(_, sp, _)| sp.as_str()).collect();
    let expected: HashSet<&str> = tasks.iter().map(|t| t.record.start_point_name.as_str()).collect();

    if observed.len() > expected.len() {
        results.push(violation(
            0,
            "trajectory",
            format!("pickups came from {} distinct start points but only {} appear in the task list", observed.len(), expected.len()),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agv::{Agv, AgvId};
    use crate::geom::Point;

    fn one_lane_map() -> Vec<MapElement> {
        vec![
            MapElement::new(ElementKind::StartPoint, "SP01", Point::new(1, 1), None),
            MapElement::new(ElementKind::EndPoint, "EP01", Point::new(19, 1), None),
        ]
    }

    #[test]
    fn clean_single_agv_run_has_no_violations() {
        let agvs = vec![Agv::new(AgvId(0), "AGV01", Point::new(1, 1), Direction::Right)];
        let mut recorder = Recorder::new(&agvs);
        let mut moved = agvs.clone();
        moved[0].position = Point::new(2, 1);
        recorder.add(1, &moved, &[]);

        let results = validate(&recorder, &one_lane_map(), &[], (20, 20));
        assert!(results.is_empty(), "unexpected violations: {results:?}");
    }

    #[test]
    fn non_adjacent_jump_is_flagged() {
        let agvs = vec![Agv::new(AgvId(0), "AGV01", Point::new(1, 1), Direction::Right)];
        let mut recorder = Recorder::new(&agvs);
        let mut jumped = agvs.clone();
        jumped[0].position = Point::new(5, 5);
        recorder.add(1, &jumped, &[]);

        let results = validate(&recorder, &one_lane_map(), &[], (20, 20));
        assert!(results.iter().any(|r| r.message.contains("non-adjacent")));
    }

    #[test]
    fn same_cell_collision_is_flagged() {
        let agvs = vec![
            Agv::new(AgvId(0), "AGV01", Point::new(5, 5), Direction::Right),
            Agv::new(AgvId(1), "AGV02", Point::new(5, 6), Direction::Right),
        ];
        let mut recorder = Recorder::new(&agvs);
        let mut collided = agvs.clone();
        collided[1].position = Point::new(5, 5);
        recorder.add(1, &collided, &[]);

        let results = validate(&recorder, &one_lane_map(), &[], (20, 20));
        assert!(results.iter().any(|r| r.message.contains("same cell")));
    }

    #[test]
    fn out_of_bounds_position_is_flagged() {
        let agvs = vec![Agv::new(AgvId(0), "AGV01", Point::new(25, 25), Direction::Right)];
        let recorder = Recorder::new(&agvs);
        let results = validate(&recorder, &one_lane_map(), &[], (20, 20));
        assert!(results.iter().any(|r| r.message.contains("outside the grid")));
    }

    #[test]
    fn pickup_away_from_a_pickup_cell_is_flagged() {
        let mut agv = Agv::new(AgvId(0), "AGV01", Point::new(10, 10), Direction::Right);
        let mut recorder = Recorder::new(&[agv.clone()]);
        agv.is_loaded = true;
        agv.loaded_task = Some(crate::task::TaskId(0));
        recorder.add(1, &[agv], &[]);

        let results = validate(&recorder, &one_lane_map(), &[], (20, 20));
        assert!(results.iter().any(|r| r.message.contains("not a pickup cell")));
    }

    #[test]
    fn delivery_not_adjacent_to_declared_destination_is_flagged() {
        use crate::task::{Priority, Task, TaskId, TaskRecord};

        let record = TaskRecord {
            external_id: "T1".to_string(),
            start_point_name: "SP01".to_string(),
            end_point_name: "EP01".to_string(),
            priority: Priority::Normal,
            deadline: None,
        };
        let task = Task::new(TaskId(0), record, Point::new(1, 1), Point::new(19, 1));

        let mut agv = Agv::new(AgvId(0), "AGV01", Point::new(2, 1), Direction::Right);
        let mut recorder = Recorder::new(&[agv.clone()]);
        agv.is_loaded = true;
        agv.loaded_task = Some(TaskId(0));
        recorder.add(1, &[agv.clone()], std::slice::from_ref(&task));
        agv.is_loaded = false;
        agv.loaded_task = None;
        recorder.add(2, &[agv], &[]);

        let results = validate(&recorder, &one_lane_map(), std::slice::from_ref(&task), (20, 20));
        assert!(results.iter().any(|r| r.message.contains("not adjacent")));
    }
}
