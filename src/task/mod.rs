//! # Task Module
//!
//! Transport task records: the immutable request (start point, end point,
//! priority, deadline) plus the runtime status a [`Task`] accrues as an AGV
//! picks it up and delivers it.
//!
//! ## Components
//!
//! - [`TaskRecord`] - parsed, immutable task request (as read from CSV or built by hand)
//! - [`Task`] - runtime task state tracked by the scheduler
//! - [`Priority`] - `Normal` / `High`
//! - [`TaskStatus`] - `Pending` → `Running` → `Completed`
//! - [`TaskId`] - index into [`crate::context::Context`]'s task arena

mod task;

pub use self::task::*;
