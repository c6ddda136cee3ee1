//! Bounded priority worker pool with lazy initialization and
//! cooperative shutdown.
//!
//! # Design
//!
//! One mutex guards both the queue and the lifecycle state. A pool is
//! built by the first queued submission: the queue, the shutdown
//! signal, the token channel and exactly N worker threads, all tagged
//! with a generation number. Submissions push under the lock, then
//! perform one raced token send with the lock released; workers race
//! token against shutdown, pop the minimum entry under the lock and
//! execute with the lock released, so task execution never blocks
//! submissions or other pops. [`Scheduler::stop`] trips the shutdown
//! signal, closes the token channel, discards queued entries and
//! resets the scheduler to uninitialized.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use parking_lot::Mutex;
use spindle_signal::{Shutdown, TokenSender, token};

use crate::Level;
use crate::heap::MinHeap;
use crate::task::{Task, WithLevel};
use crate::worker::{self, WorkerCtx};


/// One queued unit: a task paired with its resolved level.
///
/// Entries compare by level alone; equal levels have no defined order
/// among themselves.
pub(crate) struct Entry {
	pub(crate) level: Level,
	pub(crate) task: Box<dyn Task>,
}

impl PartialEq for Entry {
	fn eq(&self, other: &Self) -> bool {
		self.level == other.level
	}
}

impl Eq for Entry {}

impl PartialOrd for Entry {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Entry {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.level.cmp(&other.level)
	}
}

/// Monotonic counter distinguishing pool incarnations, so a worker
/// from a stopped pool can never pop from a successor's queue.
#[derive(Debug, Default, Clone)]
struct GenerationClock {
	next: Arc<AtomicU64>,
}

impl GenerationClock {
	fn next(&self) -> u64 {
		self.next.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
	}
}

/// Live state of one pool incarnation.
pub(crate) struct Pool {
	pub(crate) generation: u64,
	pub(crate) queue: MinHeap<Entry>,
	token_tx: TokenSender,
	shutdown: Shutdown,
}

/// Lifecycle state behind the scheduler-wide lock. `None` means
/// uninitialized.
pub(crate) type SharedState = Arc<Mutex<Option<Pool>>>;

/// Bounded worker pool executing submitted tasks in level order.
///
/// Cheap to clone; clones share one pool. No resources are allocated
/// until the first queued submission, and [`Scheduler::stop`] returns
/// the scheduler to that state.
#[derive(Clone)]
pub struct Scheduler {
	workers: usize,
	generations: GenerationClock,
	state: SharedState,
}

impl Default for Scheduler {
	/// Pool sized at twice the logical CPU count.
	fn default() -> Self {
		let cpus = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
		Self::new(cpus * 2)
	}
}

impl fmt::Debug for Scheduler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Scheduler").field("workers", &self.workers).finish_non_exhaustive()
	}
}

impl Scheduler {
	/// Creates a scheduler with a fixed worker count, clamped to at
	/// least one.
	pub fn new(workers: usize) -> Self {
		Self {
			workers: workers.max(1),
			generations: GenerationClock::default(),
			state: Arc::new(Mutex::new(None)),
		}
	}

	/// Configured worker count.
	pub fn workers(&self) -> usize {
		self.workers
	}

	/// Entries currently queued. Zero while uninitialized.
	pub fn pending(&self) -> usize {
		self.state.lock().as_ref().map_or(0, |pool| pool.queue.len())
	}

	/// Submits a task at its self-reported level.
	///
	/// [`Level::Top`] tasks run immediately on their own thread. Any
	/// other level queues the task and wakes one worker; the call
	/// blocks until a worker accepts the wake-up or the scheduler
	/// stops, which throttles producers while every worker is busy.
	pub fn submit<T: Task>(&self, task: T) {
		let level = task.priority();
		if level == Level::Top {
			self.bypass(Box::new(task));
		} else {
			self.enqueue(Entry { level, task: Box::new(task) });
		}
	}

	/// Submits a task at `level`, overriding whatever it reports
	/// itself.
	pub fn submit_with_priority<T: Task>(&self, task: T, level: Level) {
		self.submit(WithLevel::new(task, level));
	}

	/// Stops the pool: trips the shutdown signal, closes the token
	/// channel and discards every queued entry without running it.
	/// Idempotent and safe to call concurrently. The next queued
	/// submission builds a fresh pool of the configured size.
	pub fn stop(&self) {
		let mut state = self.state.lock();
		let Some(pool) = state.take() else {
			return;
		};
		pool.shutdown.cancel();
		tracing::debug!(
			generation = pool.generation,
			discarded = pool.queue.len(),
			"sched.stop"
		);
	}

	fn enqueue(&self, entry: Entry) {
		let (token_tx, shutdown) = {
			let mut state = self.state.lock();
			let pool = state.get_or_insert_with(|| self.spawn_pool());
			pool.queue.push(entry);
			tracing::trace!(
				generation = pool.generation,
				pending = pool.queue.len(),
				"sched.submit"
			);
			(pool.token_tx.clone(), pool.shutdown.clone())
		};
		// Exactly one token per entry, sent outside the lock.
		token_tx.send(&shutdown);
	}

	/// Builds one pool incarnation: queue, signals and exactly N worker
	/// threads bound to the new generation. The caller holds the lock.
	fn spawn_pool(&self) -> Pool {
		let generation = self.generations.next();
		let (token_tx, token_rx) = token();
		let shutdown = Shutdown::new();

		for id in 0..self.workers {
			let ctx = WorkerCtx {
				id,
				generation,
				state: Arc::clone(&self.state),
				token_rx: token_rx.clone(),
				shutdown: shutdown.clone(),
			};
			thread::Builder::new()
				.name(format!("spindle-worker-{id}"))
				.spawn(move || worker::run(ctx))
				.expect("failed to spawn spindle worker thread");
		}

		tracing::debug!(workers = self.workers, generation, "sched.init");
		Pool {
			generation,
			queue: MinHeap::with_capacity(self.workers.max(4)),
			token_tx,
			shutdown,
		}
	}

	/// Runs a `Top` task on a fresh thread: never queued, never counted
	/// against the pool, never throttled.
	fn bypass(&self, task: Box<dyn Task>) {
		tracing::trace!("sched.bypass");
		thread::Builder::new()
			.name("spindle-top".into())
			.spawn(move || worker::run_isolated(task))
			.expect("failed to spawn spindle bypass thread");
	}
}
