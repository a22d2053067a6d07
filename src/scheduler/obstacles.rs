//! Dynamic obstacle computation, recomputed fresh before every single replan:
//!
//! 1. The fixed map obstacles (start/end points, boundary ring).
//! 2. Every neighbor cell of the AGV being planned for that currently holds
//!    another AGV — so it never steps onto a vehicle sitting right next to it.
//! 3. The single free neighbor of any other AGV `b`, if `b` has exactly one
//!    (after excluding fixed obstacles and cells occupied by AGVs adjacent to
//!    `b`) and that cell is also a neighbor of the AGV being planned for.
//!    This preempts the cell a boxed-in neighbor would need to escape into,
//!    so two AGVs can't each wait on the other's only way out.

use crate::agv::AgvId;
use crate::context::Context;
use crate::geom::Point;
use std::collections::HashSet;

/// The obstacle set `agv_id` should avoid for its next replan.
pub fn dynamic_obstacles(ctx: &Context, agv_id: AgvId) -> HashSet<Point> {
    let mut obstacles = ctx.fixed_obstacles.clone();
    let a_pos = ctx.agv(agv_id).position;
    let a_neighbors: HashSet<Point> = a_pos.neighbors().into_iter().collect();

    let occupied: HashSet<Point> = ctx.agvs.iter().filter(|o| o.id != agv_id).map(|o| o.position).collect();
    for n in &a_neighbors {
        if occupied.contains(n) {
            obstacles.insert(*n);
        }
    }

    for b in ctx.agvs.iter().filter(|o| o.id != agv_id) {
        let free = free_neighbors(ctx, b.id, b.position);
        if free.len() == 1 && a_neighbors.contains(&free[0]) {
            obstacles.insert(free[0]);
        }
    }

    obstacles
}

fn free_neighbors(ctx: &Context, exclude: AgvId, pos: Point) -> Vec<Point> {
    let occupied: HashSet<Point> = ctx.agvs.iter().filter(|o| o.id != exclude).map(|o| o.position).collect();
    pos.neighbors().into_iter().filter(|c| !ctx.fixed_obstacles.contains(c) && !occupied.contains(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::geom::Direction;
    use crate::map_element::{ElementKind, MapElement};

    fn ctx_with(elements: Vec<MapElement>) -> Context {
        Context::new(elements, vec![], SimConfig::default()).unwrap()
    }

    #[test]
    fn excludes_the_named_agv_own_cell() {
        let ctx = ctx_with(vec![
            MapElement::new(ElementKind::StartPoint, "SP", Point::new(1, 1), None),
            MapElement::new(ElementKind::EndPoint, "EP", Point::new(19, 1), None),
            MapElement::new(ElementKind::Agv, "A", Point::new(5, 5), Some(Direction::Right)),
            MapElement::new(ElementKind::Agv, "B", Point::new(6, 5), Some(Direction::Right)),
        ]);
        let obstacles = dynamic_obstacles(&ctx, crate::agv::AgvId(0));
        assert!(!obstacles.contains(&Point::new(5, 5)));
        // B sits at a neighbor of A, so A must avoid stepping onto it.
        assert!(obstacles.contains(&Point::new(6, 5)));
    }

    #[test]
    fn preempts_the_only_free_neighbor_of_a_boxed_in_agv() {
        // B at (6,5) is hemmed in on three sides, with (6,6) its only free
        // neighbor; A sits at (6,7), for which (6,6) is also a neighbor.
        let ctx = ctx_with(vec![
            MapElement::new(ElementKind::StartPoint, "SP", Point::new(1, 1), None),
            MapElement::new(ElementKind::EndPoint, "EP", Point::new(19, 1), None),
            MapElement::new(ElementKind::Agv, "A", Point::new(6, 7), Some(Direction::Down)),
            MapElement::new(ElementKind::Agv, "B", Point::new(6, 5), Some(Direction::Right)),
            MapElement::new(ElementKind::Agv, "C", Point::new(5, 5), Some(Direction::Right)),
            MapElement::new(ElementKind::Agv, "D", Point::new(7, 5), Some(Direction::Right)),
            MapElement::new(ElementKind::Agv, "E", Point::new(6, 4), Some(Direction::Right)),
        ]);
        let obstacles = dynamic_obstacles(&ctx, crate::agv::AgvId(0));
        assert!(obstacles.contains(&Point::new(6, 6)));
    }
}
