//! Process-local priority task scheduler.
//!
//! A bounded pool of worker threads executes submitted [`Task`]s in
//! [`Level`] order. Each queued submission wakes exactly one idle
//! worker through a rendezvous token, so a burst of submissions
//! throttles the producers once every worker is busy. [`Level::Top`]
//! bypasses the pool entirely and runs on its own thread.
//!
//! Pools initialize lazily on the first queued submission and shut
//! down cooperatively via [`Scheduler::stop`]; both transitions are
//! idempotent. A process-wide default instance is available through
//! [`Scheduler::global`] and the free [`submit`] /
//! [`submit_with_priority`] functions.

mod global;
mod heap;
mod level;
mod scheduler;
mod task;
mod worker;

pub use global::{submit, submit_with_priority};
pub use heap::MinHeap;
pub use level::Level;
pub use scheduler::Scheduler;
pub use task::{Task, WithLevel};
