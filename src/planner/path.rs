//! Timed waypoints: a planned path annotated with the cumulative second at
//! which each waypoint is reached.

use crate::geom::{Direction, Point};

/// A single waypoint with the cumulative number of seconds (moves + turns)
/// needed to reach it from the path's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathTimePoint {
    pub position: Point,
    pub time_cost: i64,
}

impl PathTimePoint {
    pub fn new(position: Point, time_cost: i64) -> Self {
        PathTimePoint { position, time_cost }
    }
}

/// Annotates a raw path of points with cumulative time cost, starting from
/// `initial_heading`.
///
/// Walks the path, adding one second for a turn whenever the heading to the
/// next waypoint differs from the current heading (and updating the current
/// heading), then one second for the move itself. The first point always
/// carries `time_cost = 0`. An empty path yields an empty annotation.
///
/// # Example
///
/// ```
/// use agv_fleet_sim_core::geom::{Direction, Point};
/// use agv_fleet_sim_core::planner::compute_timing;
///
/// // (1,1) -> (1,3) while starting out heading Right: one turn, two moves.
/// let path = vec![Point::new(1, 1), Point::new(1, 2), Point::new(1, 3)];
/// let timed = compute_timing(&path, Direction::Right);
/// assert_eq!(timed.last().unwrap().time_cost, 3);
/// ```
pub fn compute_timing(path: &[Point], initial_heading: Direction) -> Vec<PathTimePoint> {
    if path.is_empty() {
        return Vec::new();
    }

    let mut heading = initial_heading;
    let mut cumulative: i64 = 0;
    let mut out = Vec::with_capacity(path.len());
    out.push(PathTimePoint::new(path[0], 0));

    for window in path.windows(2) {
        let (from, to) = (window[0], window[1]);
        let step_heading = Direction::between(from, to)
            .expect("compute_timing requires consecutive adjacent waypoints");
        if step_heading != heading {
            cumulative += 1;
            heading = step_heading;
        }
        cumulative += 1;
        out.push(PathTimePoint::new(to, cumulative));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_yields_empty_timing() {
        assert!(compute_timing(&[], Direction::Right).is_empty());
    }

    #[test]
    fn straight_path_has_no_turn_cost() {
        let path = vec![Point::new(1, 1), Point::new(2, 1), Point::new(3, 1)];
        let timed = compute_timing(&path, Direction::Right);
        let costs: Vec<i64> = timed.iter().map(|p| p.time_cost).collect();
        assert_eq!(costs, vec![0, 1, 2]);
    }

    #[test]
    fn single_turn_costs_one_extra_second() {
        // (1,1) Right-facing -> (1,3): must turn to Up before the two moves.
        let path = vec![Point::new(1, 1), Point::new(1, 2), Point::new(1, 3)];
        let timed = compute_timing(&path, Direction::Right);
        assert_eq!(timed[0].time_cost, 0);
        assert_eq!(timed[1].time_cost, 2); // turn + move
        assert_eq!(timed[2].time_cost, 3); // + move
    }

    #[test]
    fn total_equals_moves_plus_turns() {
        let path = vec![
            Point::new(1, 1),
            Point::new(2, 1),
            Point::new(2, 2),
            Point::new(2, 3),
            Point::new(3, 3),
        ];
        let timed = compute_timing(&path, Direction::Right);
        let moves = path.len() - 1;
        let mut turns = 0;
        let mut heading = Direction::Right;
        for w in path.windows(2) {
            let h = Direction::between(w[0], w[1]).unwrap();
            if h != heading {
                turns += 1;
                heading = h;
            }
        }
        assert_eq!(timed.last().unwrap().time_cost as usize, moves + turns);
    }
}
