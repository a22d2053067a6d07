//! Pending-task ordering: recomputed on demand every time the idle-assignment
//! phase needs it, never cached.
//!
//! Pending tasks are first grouped by `start_point_name` — tasks queued at
//! the same pickup point share a FIFO queue. The composite sort key, in
//! order: (1) FIFO position within that group (original task order, i.e. the
//! earliest-queued task at a pickup point is served first); (2) `High`
//! priority before `Normal`; (3) whether the task's group contains any `High`
//! task, descending; (4) group size, descending (longer queues first); (5)
//! whether `pickup_position.y != 10`, descending. A final tie-break on
//! [`TaskId`] keeps the order deterministic when every key above agrees.

use crate::task::{Priority, Task, TaskId};
use std::collections::HashMap;

pub fn order_pending_tasks(tasks: &[Task]) -> Vec<TaskId> {
    let pending: Vec<&Task> = tasks.iter().filter(|t| t.is_pending()).collect();

    let mut groups: HashMap<&str, Vec<TaskId>> = HashMap::new();
    for t in &pending {
        groups.entry(t.record.start_point_name.as_str()).or_default().push(t.id);
    }
    for ids in groups.values_mut() {
        ids.sort_by_key(|id| id.0);
    }

    let fifo_rank = |t: &Task| -> usize {
        groups[t.record.start_point_name.as_str()].iter().position(|&id| id == t.id).unwrap()
    };
    let group_size = |t: &Task| groups[t.record.start_point_name.as_str()].len();
    let group_has_high = |t: &Task| {
        groups[t.record.start_point_name.as_str()]
            .iter()
            .any(|&id| tasks.iter().any(|x| x.id == id && x.priority() == Priority::High))
    };

    let priority_key = |p: Priority| if p == Priority::High { 0u8 } else { 1u8 };
    let desc_bool_key = |b: bool| if b { 0u8 } else { 1u8 };

    let mut ordered = pending;
    ordered.sort_by(|a, b| {
        fifo_rank(a)
            .cmp(&fifo_rank(b))
            .then_with(|| priority_key(a.priority()).cmp(&priority_key(b.priority())))
            .then_with(|| desc_bool_key(group_has_high(a)).cmp(&desc_bool_key(group_has_high(b))))
            .then_with(|| group_size(b).cmp(&group_size(a)))
            .then_with(|| desc_bool_key(a.pickup_position.y != 10).cmp(&desc_bool_key(b.pickup_position.y != 10)))
            .then_with(|| a.id.0.cmp(&b.id.0))
    });

    ordered.into_iter().map(|t| t.id).collect()
}
