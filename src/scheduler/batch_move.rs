//! Batched movement for a group of AGVs in one phase (loaded or idle).
//!
//! Each pass re-plans every unhandled candidate's path from scratch (the
//! fleet has moved since the last plan, so dynamic obstacles have too),
//! moves whoever isn't blocked, and restarts until a pass makes no further
//! progress — letting moves cascade within the same tick (an AGV freed up
//! by another's move can advance in the very next pass).
//!
//! Two hazards are handled without a full re-plan:
//!
//! - **Same-cell collision** never arises here: each candidate's own re-plan
//!   already routes around every other AGV's current cell (see
//!   `dynamic_obstacles`), so two candidates never intend the same next cell
//!   in the same pass.
//! - **Cross-lock**: an AGV's step would swap or squeeze past one that just
//!   moved ahead of it along the same axis. Caught by comparing the
//!   candidate against every `(agv', prev_pos, prev_task)` recorded earlier
//!   in this pass; a match forces a turn instead of a move.

use crate::agv::AgvId;
use crate::context::Context;
use crate::geom::{Direction, Point};
use crate::planner::{compute_timing, shortest_path};
use crate::scheduler::obstacles::dynamic_obstacles;
use crate::task::TaskId;
use crate::verbose::{is_verbose_level, VerboseLevel, EVENT_CROSS_LOCK};
use std::collections::{HashMap, HashSet};

/// Re-plans and advances every candidate in `candidates` whose `is_loaded`
/// matches `loaded` and who isn't already in `handled`, looping until a pass
/// makes no progress. `tentative` supplies each idle candidate's assigned
/// task (ignored when `loaded` is true, since a loaded AGV's task is its own
/// `loaded_task`).
pub fn execute(
    ctx: &mut Context,
    candidates: &[AgvId],
    handled: &mut HashSet<AgvId>,
    loaded: bool,
    tentative: &HashMap<AgvId, TaskId>,
) {
    let mut prev_moves: Vec<(AgvId, Point, TaskId)> = Vec::new();

    loop {
        let mut progressed = false;

        for &agv_id in candidates {
            if handled.contains(&agv_id) {
                continue;
            }
            if ctx.agv(agv_id).is_loaded != loaded {
                continue;
            }

            let task_id = if loaded {
                match ctx.agv(agv_id).loaded_task {
                    Some(t) => t,
                    None => continue,
                }
            } else {
                match tentative.get(&agv_id) {
                    Some(&t) => t,
                    None => continue,
                }
            };

            let goal = if loaded { ctx.task(task_id).end_position } else { ctx.task(task_id).pickup_position };
            let mut obstacles = dynamic_obstacles(ctx, agv_id);
            if loaded {
                obstacles.remove(&goal);
            }

            let start = ctx.agv(agv_id).position;
            let heading = ctx.agv(agv_id).heading;
            let grid_size = Some(ctx.config.grid_size);
            let Ok(path) = shortest_path(start, goal, heading, &obstacles, grid_size) else { continue };
            if path.is_empty() {
                continue;
            }
            let timed = compute_timing(&path, heading);
            ctx.agv_mut(agv_id).set_planned_path(timed);

            if ctx.agv(agv_id).planned_path.len() < 2 {
                continue;
            }
            let next_pos = ctx.agv(agv_id).planned_path[1].position;
            let step_heading = Direction::between(start, next_pos).expect("adjacent by construction");
            if step_heading != heading {
                // Handled by the turning phase instead.
                continue;
            }

            let task_end = ctx.task(task_id).end_position;
            if let Some(forced) = cross_lock_override(ctx, start, heading, task_end, &prev_moves) {
                if is_verbose_level(VerboseLevel::Additional) {
                    crate::log_additional!(EVENT_CROSS_LOCK, "cross-lock detected", agv = agv_id.0);
                }
                ctx.agv_mut(agv_id).planned_path.clear();
                let _ = ctx.agv_mut(agv_id).turn(Some(forced));
                handled.insert(agv_id);
                progressed = true;
                continue;
            }

            let _ = ctx.agv_mut(agv_id).advance();
            prev_moves.push((agv_id, start, task_id));
            handled.insert(agv_id);
            progressed = true;
        }

        if !progressed {
            break;
        }
    }
}

/// Checks `agv`'s pending step (at `pos`, heading `heading`, carrying a task
/// ending at `task_end`) against every AGV that already moved this pass. See
/// `SPEC_FULL.md` §4.5 for the four orthogonal patterns below.
fn cross_lock_override(
    ctx: &Context,
    pos: Point,
    heading: Direction,
    task_end: Point,
    prev_moves: &[(AgvId, Point, TaskId)],
) -> Option<Direction> {
    for &(prev_agv, prev_pos, prev_task_id) in prev_moves {
        if ctx.agv(prev_agv).heading != heading {
            continue;
        }
        let prev_task_end = ctx.task(prev_task_id).end_position;

        match heading {
            Direction::Left | Direction::Right => {
                if prev_pos.x == pos.x && prev_pos.y == pos.y + 1 && task_end.y > pos.y && prev_task_end.y <= prev_pos.y {
                    return Some(Direction::Up);
                }
                if prev_pos.x == pos.x && prev_pos.y == pos.y - 1 && task_end.y < pos.y && prev_task_end.y >= prev_pos.y {
                    return Some(Direction::Down);
                }
            }
            Direction::Up | Direction::Down => {
                if prev_pos.y == pos.y && prev_pos.x == pos.x - 1 && task_end.x < pos.x && prev_task_end.x >= prev_pos.x {
                    return Some(Direction::Left);
                }
                if prev_pos.y == pos.y && prev_pos.x == pos.x + 1 && task_end.x > pos.x && prev_task_end.x <= prev_pos.x {
                    return Some(Direction::Right);
                }
            }
        }
    }
    None
}
