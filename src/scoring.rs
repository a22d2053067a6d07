//! # Scoring
//!
//! Post-run scorer, independent of the scheduler and validator: `+1` per
//! delivered task, plus `+10`/`-5` for a delivered `Priority::High` task
//! depending on whether it beat its deadline. Pending or running tasks
//! contribute nothing.

use crate::task::{Priority, Task, TaskStatus};

/// Scores a finished (or in-progress) run from its task list. Only
/// `Completed` tasks contribute; a `High` task with no recorded deadline is
/// treated as delivered on time, since there is nothing to have missed.
pub fn score(tasks: &[Task]) -> i64 {
    tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .map(|t| {
            let mut points = 1i64;
            if t.priority() == Priority::High {
                let on_time = match (t.complete_ts, t.record.deadline) {
                    (Some(complete_ts), Some(deadline)) => complete_ts <= deadline,
                    _ => true,
                };
                points += if on_time { 10 } else { -5 };
            }
            points
        })
        .sum()
}
