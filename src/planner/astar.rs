//! Oriented A* planner: shortest-time path over a 4-connected grid with a
//! turn penalty, searching over `(position, heading)` states.

use crate::geom::{Direction, Point};
use crate::planner::heuristics::heuristic;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;

/// Cost of moving one cell forward.
pub const MOVE_COST: i64 = 1;
/// Cost of changing heading in place.
pub const TURN_COST: i64 = 1;

/// Default grid size when the caller does not specify one: usable
/// coordinates `1..=20` on both axes, bounded by a one-cell obstacle ring.
pub const DEFAULT_GRID_SIZE: (i32, i32) = (21, 21);

/// A `(position, heading)` search state.
type SearchState = (Point, Direction);

#[derive(Debug)]
struct AStarNode {
    state: SearchState,
    g_cost: i64,
    f_cost: i64,
    seq: u64,
}

impl PartialEq for AStarNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.seq == other.seq
    }
}

impl Eq for AStarNode {}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse so the smallest f_cost pops
        // first, breaking ties by earliest insertion (first-popped-wins).
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Errors from the planner. Malformed grid dimensions are the only thing
/// that is ever an error here; an unreachable goal simply yields an empty
/// path (see [`shortest_path`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AStarError {
    InvalidGridSize { width: i32, height: i32 },
}

impl fmt::Display for AStarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AStarError::InvalidGridSize { width, height } => {
                write!(f, "invalid grid size: {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for AStarError {}

/// Finds the minimum-cost path from `start` to `goal`, starting with
/// `initial_heading`, avoiding every cell in `obstacles`.
///
/// State is `(position, heading)`; each step costs [`MOVE_COST`] plus
/// [`TURN_COST`] if it changes heading. The heuristic is Manhattan distance,
/// which is admissible under these unit costs. A state is closed on its
/// first pop; later, stale pops of the same state are skipped.
///
/// Returns the sequence of points from `start` to `goal` (inclusive), or an
/// empty `Vec` if `goal` is unreachable.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use agv_fleet_sim_core::geom::{Direction, Point};
/// use agv_fleet_sim_core::planner::shortest_path;
///
/// let path = shortest_path(
///     Point::new(1, 1),
///     Point::new(1, 3),
///     Direction::Right,
///     &HashSet::new(),
///     None,
/// ).unwrap();
/// assert_eq!(path, vec![Point::new(1, 1), Point::new(1, 2), Point::new(1, 3)]);
/// ```
pub fn shortest_path(
    start: Point,
    goal: Point,
    initial_heading: Direction,
    obstacles: &HashSet<Point>,
    grid_size: Option<(i32, i32)>,
) -> Result<Vec<Point>, AStarError> {
    let (width, height) = grid_size.unwrap_or(DEFAULT_GRID_SIZE);
    if width < 1 || height < 1 {
        return Err(AStarError::InvalidGridSize { width, height });
    }

    if start == goal {
        return Ok(vec![start]);
    }

    let start_state: SearchState = (start, initial_heading);

    let mut open_set = BinaryHeap::new();
    let mut g_score: IndexMap<SearchState, i64> = IndexMap::new();
    let mut came_from: IndexMap<SearchState, SearchState> = IndexMap::new();
    let mut closed: HashSet<SearchState> = HashSet::new();
    let mut seq: u64 = 0;

    g_score.insert(start_state, 0);
    open_set.push(AStarNode {
        state: start_state,
        g_cost: 0,
        f_cost: heuristic(start, goal),
        seq,
    });

    while let Some(current) = open_set.pop() {
        if closed.contains(&current.state) {
            continue;
        }
        closed.insert(current.state);

        let (position, heading) = current.state;
        if position == goal {
            return Ok(reconstruct_path(&came_from, current.state));
        }

        for &next_heading in &[Direction::Right, Direction::Up, Direction::Left, Direction::Down] {
            let next_position = next_heading.step(position);
            if !next_position.in_bounds(width, height) {
                continue;
            }
            if obstacles.contains(&next_position) {
                continue;
            }
            let next_state: SearchState = (next_position, next_heading);
            if closed.contains(&next_state) {
                continue;
            }

            let turn_cost = if next_heading != heading { TURN_COST } else { 0 };
            let tentative_g = current.g_cost + MOVE_COST + turn_cost;

            let improves = match g_score.get(&next_state) {
                Some(&best) => tentative_g < best,
                None => true,
            };
            if improves {
                g_score.insert(next_state, tentative_g);
                came_from.insert(next_state, current.state);
                seq += 1;
                open_set.push(AStarNode {
                    state: next_state,
                    g_cost: tentative_g,
                    f_cost: tentative_g + heuristic(next_position, goal),
                    seq,
                });
            }
        }
    }

    Ok(Vec::new())
}

fn reconstruct_path(
    came_from: &IndexMap<SearchState, SearchState>,
    goal_state: SearchState,
) -> Vec<Point> {
    let mut states = vec![goal_state];
    let mut current = goal_state;
    while let Some(&prev) = came_from.get(&current) {
        states.push(prev);
        current = prev;
    }
    states.reverse();
    states.into_iter().map(|(p, _)| p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_cost_scenario() {
        // From (1,1) heading Right to (1,3): two moves + one turn = cost 3.
        let path = shortest_path(
            Point::new(1, 1),
            Point::new(1, 3),
            Direction::Right,
            &HashSet::new(),
            None,
        )
        .unwrap();
        assert_eq!(path.len(), 3);
        let timed = crate::planner::compute_timing(&path, Direction::Right);
        assert_eq!(timed.last().unwrap().time_cost, 3);
    }

    #[test]
    fn straight_line_has_no_turn_penalty() {
        let path = shortest_path(
            Point::new(1, 1),
            Point::new(5, 1),
            Direction::Right,
            &HashSet::new(),
            None,
        )
        .unwrap();
        assert_eq!(path.len(), 5);
        let timed = crate::planner::compute_timing(&path, Direction::Right);
        assert_eq!(timed.last().unwrap().time_cost, 4);
    }

    #[test]
    fn unreachable_goal_yields_empty_path() {
        // Box the goal in completely.
        let goal = Point::new(10, 10);
        let obstacles: HashSet<Point> = goal.neighbors().into_iter().collect();
        let path = shortest_path(Point::new(1, 1), goal, Direction::Right, &obstacles, None).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn path_never_touches_obstacles_except_removed_goal() {
        let mut obstacles = HashSet::new();
        obstacles.insert(Point::new(2, 1));
        obstacles.insert(Point::new(2, 2));
        let path = shortest_path(
            Point::new(1, 1),
            Point::new(3, 1),
            Direction::Right,
            &obstacles,
            None,
        )
        .unwrap();
        assert_eq!(path.first(), Some(&Point::new(1, 1)));
        assert_eq!(path.last(), Some(&Point::new(3, 1)));
        for p in &path {
            assert!(!obstacles.contains(p));
        }
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(&w[1]));
        }
    }

    #[test]
    fn repeated_invocations_agree_on_cost() {
        let obstacles = HashSet::new();
        let a = shortest_path(Point::new(1, 1), Point::new(8, 9), Direction::Up, &obstacles, None).unwrap();
        let b = shortest_path(Point::new(1, 1), Point::new(8, 9), Direction::Up, &obstacles, None).unwrap();
        let ta = crate::planner::compute_timing(&a, Direction::Up);
        let tb = crate::planner::compute_timing(&b, Direction::Up);
        assert_eq!(ta.last().unwrap().time_cost, tb.last().unwrap().time_cost);
    }

    #[test]
    fn same_start_and_goal_is_single_point_path() {
        let path = shortest_path(
            Point::new(4, 4),
            Point::new(4, 4),
            Direction::Right,
            &HashSet::new(),
            None,
        )
        .unwrap();
        assert_eq!(path, vec![Point::new(4, 4)]);
    }
}
