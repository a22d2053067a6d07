//! Admissible heuristic for the oriented A* search.

use crate::geom::Point;

/// Manhattan distance between `from` and `to`. Admissible under the
/// planner's unit move cost: moving closer by one cell never costs less
/// than one, so the heuristic never overestimates the remaining cost.
pub fn heuristic(from: Point, to: Point) -> i64 {
    from.manhattan(&to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_at_goal() {
        let p = Point::new(4, 4);
        assert_eq!(heuristic(p, p), 0);
    }

    #[test]
    fn matches_manhattan_distance() {
        assert_eq!(heuristic(Point::new(1, 1), Point::new(4, 5)), 7);
    }
}
