//! The eight-phase tick: Unload, Load, Loaded movement, Loaded turning, Idle
//! assignment, Idle movement, Parking, Record — run once per call to
//! [`process`]. `Context::process` is the public entry point; this module
//! is the implementation the crate root re-exports as `scheduler`.
//!
//! A per-tick `handled` set is threaded through every phase so that no AGV
//! is touched by more than one actuator in the same tick — unloading,
//! loading, moving and turning are each a one-shot action per AGV per
//! second.

use crate::agv::AgvId;
use crate::context::Context;
use crate::geom::Point;
use crate::planner::{compute_timing, shortest_path};
use crate::scheduler::batch_move;
use crate::scheduler::obstacles::dynamic_obstacles;
use crate::scheduler::ordering::order_pending_tasks;
use crate::task::TaskId;
use crate::verbose::{
    is_verbose_level, VerboseLevel, EVENT_PHASE_IDLE_ASSIGN, EVENT_PHASE_IDLE_MOVE, EVENT_PHASE_LOAD,
    EVENT_PHASE_LOADED_MOVE, EVENT_PHASE_LOADED_TURN, EVENT_PHASE_PARKING, EVENT_PHASE_RECORD, EVENT_PHASE_UNLOAD,
    EVENT_PLANNER_EMPTY_PATH, EVENT_TICK,
};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Errors that can terminate a scheduler run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// The tick cap (`SimConfig::tick_cap`) was exceeded before every task completed.
    Timeout { tick_cap: u32 },
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::Timeout { tick_cap } => write!(f, "exceeded tick cap of {tick_cap} without completing all tasks"),
        }
    }
}

impl std::error::Error for SchedulerError {}

/// Runs one simulated second of every phase.
pub fn process(ctx: &mut Context) -> Result<(), SchedulerError> {
    if ctx.all_tasks_completed() {
        return Ok(());
    }

    ctx.timestamp += 1;
    if ctx.timestamp > ctx.config.tick_cap {
        return Err(SchedulerError::Timeout { tick_cap: ctx.config.tick_cap });
    }
    let ts = ctx.timestamp;

    if is_verbose_level(VerboseLevel::Main) {
        crate::log_main!(EVENT_TICK, "tick start", ts = ts);
    }

    let mut handled: HashSet<AgvId> = HashSet::new();

    unload_phase(ctx, ts, &mut handled);
    load_phase(ctx, ts, &mut handled);
    loaded_movement_phase(ctx, &mut handled);
    loaded_turning_phase(ctx, &mut handled);
    let tentative = idle_assignment_phase(ctx, &mut handled);
    idle_movement_phase(ctx, &mut handled, &tentative);
    parking_phase(ctx, &mut handled);
    record_phase(ctx, ts);

    Ok(())
}

fn unload_phase(ctx: &mut Context, ts: u32, handled: &mut HashSet<AgvId>) {
    if is_verbose_level(VerboseLevel::Additional) {
        crate::log_additional!(EVENT_PHASE_UNLOAD, "phase start", ts = ts);
    }
    let candidates: Vec<AgvId> = ctx
        .agvs
        .iter()
        .filter(|a| !handled.contains(&a.id) && a.is_loaded)
        .filter_map(|a| a.loaded_task.map(|task_id| (a.id, task_id)))
        .filter(|&(agv_id, task_id)| ctx.agv(agv_id).can_unload(ctx.task(task_id).end_position))
        .map(|(agv_id, _)| agv_id)
        .collect();

    for agv_id in candidates {
        if let Some(task_id) = ctx.agv_mut(agv_id).unload() {
            ctx.task_mut(task_id).unload(ts);
        }
        handled.insert(agv_id);
    }
}

/// Any pending task whose `pickup_position` matches an unhandled, unloaded
/// AGV's current cell is loaded onto it — preferring a task already
/// tentatively assigned to that AGV (by Phase 5 on an earlier tick) over an
/// unclaimed one, so a passing AGV never steals another's reservation.
fn load_phase(ctx: &mut Context, ts: u32, handled: &mut HashSet<AgvId>) {
    if is_verbose_level(VerboseLevel::Additional) {
        crate::log_additional!(EVENT_PHASE_LOAD, "phase start", ts = ts);
    }
    let sorted = order_pending_tasks(&ctx.tasks);
    let candidates: Vec<(AgvId, TaskId)> = ctx
        .agvs
        .iter()
        .filter(|a| !handled.contains(&a.id) && !a.is_loaded)
        .filter_map(|a| {
            sorted
                .iter()
                .copied()
                .find(|&task_id| {
                    let t = ctx.task(task_id);
                    t.is_pending() && t.pickup_position == a.position && t.assigned_agv.is_none_or(|id| id == a.id)
                })
                .map(|task_id| (a.id, task_id))
        })
        .collect();

    for (agv_id, task_id) in candidates {
        if !ctx.task(task_id).is_pending() {
            continue;
        }
        ctx.agv_mut(agv_id).load(task_id);
        ctx.task_mut(task_id).load_by(agv_id, ts);
        handled.insert(agv_id);

        let end_position = ctx.task(task_id).end_position;
        plan_path(ctx, agv_id, end_position, true);
    }
}

fn loaded_movement_phase(ctx: &mut Context, handled: &mut HashSet<AgvId>) {
    if is_verbose_level(VerboseLevel::Additional) {
        crate::log_additional!(EVENT_PHASE_LOADED_MOVE, "phase start", count = ctx.agvs.iter().filter(|a| a.is_loaded).count());
    }
    let candidates: Vec<AgvId> = ctx.agvs.iter().filter(|a| a.is_loaded && !handled.contains(&a.id)).map(|a| a.id).collect();
    batch_move::execute(ctx, &candidates, handled, true, &HashMap::new());
}

/// Turns every unhandled loaded AGV whose path (re-planned by Phase 3) needs
/// a heading change before its next step.
fn loaded_turning_phase(ctx: &mut Context, handled: &mut HashSet<AgvId>) {
    if is_verbose_level(VerboseLevel::Additional) {
        crate::log_additional!(EVENT_PHASE_LOADED_TURN, "phase start");
    }
    let turners: Vec<AgvId> =
        ctx.agvs.iter().filter(|a| a.is_loaded && !handled.contains(&a.id) && a.should_turn()).map(|a| a.id).collect();
    for agv_id in turners {
        let _ = ctx.agv_mut(agv_id).turn(None);
        handled.insert(agv_id);
    }
}

/// For each pending task, in priority order, plans a path from every
/// remaining idle AGV to the task's pickup position and tentatively assigns
/// the task to whichever AGV's plan is cheapest. Returns the resulting
/// AGV-to-task map for Phase 6 to consume.
fn idle_assignment_phase(ctx: &mut Context, handled: &mut HashSet<AgvId>) -> HashMap<AgvId, TaskId> {
    if is_verbose_level(VerboseLevel::Additional) {
        crate::log_additional!(EVENT_PHASE_IDLE_ASSIGN, "phase start", count = ctx.tasks.iter().filter(|t| t.is_pending()).count());
    }
    let mut idle: Vec<AgvId> = ctx.agvs.iter().filter(|a| !handled.contains(&a.id) && !a.is_loaded).map(|a| a.id).collect();

    let pending = order_pending_tasks(&ctx.tasks);
    let mut tentative: HashMap<AgvId, TaskId> = HashMap::new();

    for task_id in pending {
        if idle.is_empty() {
            break;
        }
        if ctx.task(task_id).assigned_agv.is_some() {
            continue;
        }
        let pickup = ctx.task(task_id).pickup_position;
        let grid_size = Some(ctx.config.grid_size);

        let mut best: Option<(usize, i64, Vec<crate::planner::PathTimePoint>)> = None;
        for (i, &agv_id) in idle.iter().enumerate() {
            let start = ctx.agv(agv_id).position;
            let heading = ctx.agv(agv_id).heading;
            let obstacles = dynamic_obstacles(ctx, agv_id);
            let Ok(path) = shortest_path(start, pickup, heading, &obstacles, grid_size) else { continue };
            if path.is_empty() {
                continue;
            }
            let timed = compute_timing(&path, heading);
            let cost = timed.last().map(|p| p.time_cost).unwrap_or(0);
            if best.as_ref().is_none_or(|(_, b, _)| cost < *b) {
                best = Some((i, cost, timed));
            }
        }

        match best {
            Some((i, _, timed)) => {
                let agv_id = idle.remove(i);
                ctx.agv_mut(agv_id).set_planned_path(timed);
                ctx.task_mut(task_id).assigned_agv = Some(agv_id);
                tentative.insert(agv_id, task_id);
            }
            None if is_verbose_level(VerboseLevel::Additional) => {
                crate::log_additional!(EVENT_PLANNER_EMPTY_PATH, "no idle agv can reach pickup", task = task_id.0);
            }
            None => {}
        }
    }

    tentative
}

fn idle_movement_phase(ctx: &mut Context, handled: &mut HashSet<AgvId>, tentative: &HashMap<AgvId, TaskId>) {
    if is_verbose_level(VerboseLevel::Additional) {
        crate::log_additional!(EVENT_PHASE_IDLE_MOVE, "phase start");
    }
    let turners: Vec<AgvId> =
        tentative.keys().copied().filter(|id| !handled.contains(id) && ctx.agv(*id).should_turn()).collect();
    for agv_id in turners {
        let _ = ctx.agv_mut(agv_id).turn(None);
        handled.insert(agv_id);
    }

    let movers: Vec<AgvId> =
        tentative.keys().copied().filter(|id| !handled.contains(id) && ctx.agv(*id).should_move()).collect();
    batch_move::execute(ctx, &movers, handled, false, tentative);
}

/// Only runs once no pending tasks remain. Each unhandled AGV heads for the
/// nearest open map-edge cell, excluding an edge whenever a *loaded* AGV
/// already occupies that open half-plane along the same row or column.
fn parking_phase(ctx: &mut Context, handled: &mut HashSet<AgvId>) {
    if is_verbose_level(VerboseLevel::Detailed) {
        crate::log_detailed!(EVENT_PHASE_PARKING, "phase start", idle = ctx.agvs.iter().filter(|a| !a.is_loaded).count());
    }
    if ctx.tasks.iter().any(|t| t.is_pending()) {
        return;
    }

    let candidates: Vec<AgvId> = ctx.agvs.iter().filter(|a| !handled.contains(&a.id)).map(|a| a.id).collect();

    for agv_id in candidates {
        let pos = ctx.agv(agv_id).position;
        let bounds = ctx.bounds;

        let loaded_blocks = |dir_check: &dyn Fn(Point) -> bool| {
            ctx.agvs.iter().any(|o| o.id != agv_id && o.is_loaded && dir_check(o.position))
        };

        let mut candidates_edge: Vec<Point> = Vec::new();
        if !loaded_blocks(&|p: Point| p.x == pos.x && p.y > pos.y) {
            candidates_edge.push(Point::new(pos.x, bounds.top));
        }
        if !loaded_blocks(&|p: Point| p.x == pos.x && p.y < pos.y) {
            candidates_edge.push(Point::new(pos.x, bounds.bottom));
        }
        if !loaded_blocks(&|p: Point| p.y == pos.y && p.x > pos.x) {
            candidates_edge.push(Point::new(bounds.right, pos.y));
        }
        if !loaded_blocks(&|p: Point| p.y == pos.y && p.x < pos.x) {
            candidates_edge.push(Point::new(bounds.left, pos.y));
        }

        let Some(goal) = candidates_edge.into_iter().min_by_key(|p| p.manhattan(&pos)) else { continue };

        if plan_path(ctx, agv_id, goal, false) {
            let agv = ctx.agv_mut(agv_id);
            if agv.should_move() {
                let _ = agv.advance();
                handled.insert(agv_id);
            } else if agv.should_turn() {
                let _ = agv.turn(None);
                handled.insert(agv_id);
            }
        }
    }
}

fn record_phase(ctx: &mut Context, ts: u32) {
    if is_verbose_level(VerboseLevel::Additional) {
        crate::log_additional!(EVENT_PHASE_RECORD, "phase start", ts = ts);
    }
    let (agvs, tasks, recorder) = (&ctx.agvs, &ctx.tasks, &mut ctx.recorder);
    recorder.add(ts, agvs, tasks);
}

/// Plans a path from `agv_id`'s current position to `goal`, avoiding the
/// dynamic obstacle set (§4.6), and installs it as the AGV's planned path.
/// `exempt_goal` removes `goal` from the obstacle set first — used for a
/// loaded delivery, where the goal is an end point and therefore otherwise a
/// fixed obstacle. Returns whether a path was found.
fn plan_path(ctx: &mut Context, agv_id: AgvId, goal: Point, exempt_goal: bool) -> bool {
    let start = ctx.agv(agv_id).position;
    let heading = ctx.agv(agv_id).heading;
    let mut obstacles = dynamic_obstacles(ctx, agv_id);
    if exempt_goal {
        obstacles.remove(&goal);
    }
    let grid_size = Some(ctx.config.grid_size);

    match shortest_path(start, goal, heading, &obstacles, grid_size) {
        Ok(path) if !path.is_empty() => {
            let timed = compute_timing(&path, heading);
            ctx.agv_mut(agv_id).set_planned_path(timed);
            true
        }
        _ => false,
    }
}
