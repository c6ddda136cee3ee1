use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use spindle_signal::{Shutdown, TokenReceiver, Wait};

use crate::scheduler::SharedState;
use crate::task::Task;

/// Everything one worker needs, bound to a single pool generation.
pub(crate) struct WorkerCtx {
	pub(crate) id: usize,
	pub(crate) generation: u64,
	pub(crate) state: SharedState,
	pub(crate) token_rx: TokenReceiver,
	pub(crate) shutdown: Shutdown,
}

/// Worker loop: wait for a token, pop the minimum entry, execute,
/// repeat until shutdown is observed.
pub(crate) fn run(ctx: WorkerCtx) {
	tracing::trace!(worker = ctx.id, generation = ctx.generation, "worker.spawn");
	loop {
		match ctx.token_rx.recv(&ctx.shutdown) {
			Wait::Shutdown => break,
			Wait::Token => {}
		}

		// A token with an empty queue is legal: another worker may have
		// taken the only entry first.
		let entry = {
			let mut state = ctx.state.lock();
			match state.as_mut() {
				// Never pop from a successor generation's queue.
				Some(pool) if pool.generation == ctx.generation => pool.queue.pop(),
				_ => None,
			}
		};

		if let Some(entry) = entry {
			tracing::trace!(worker = ctx.id, level = ?entry.level, "worker.run");
			run_isolated(entry.task);
		}
	}
	tracing::trace!(worker = ctx.id, generation = ctx.generation, "worker.exit");
}

/// Executes one task behind a panic boundary: a faulting task is
/// logged and discarded instead of taking its thread down, so the pool
/// keeps its full size for the scheduler's lifetime.
pub(crate) fn run_isolated(task: Box<dyn Task>) {
	if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| task.run())) {
		tracing::error!(reason = panic_message(payload.as_ref()), "worker.task_panic");
	}
}

/// Best-effort extraction of a panic payload's message.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
	if let Some(message) = payload.downcast_ref::<&'static str>() {
		message
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.as_str()
	} else {
		"opaque panic payload"
	}
}

#[cfg(test)]
mod tests {
	use std::sync::mpsc;

	use super::*;

	#[test]
	fn run_isolated_swallows_panics() {
		run_isolated(Box::new(|| panic!("boom")));
	}

	#[test]
	fn run_isolated_executes_the_task() {
		let (tx, rx) = mpsc::channel();
		run_isolated(Box::new(move || tx.send(()).unwrap()));
		rx.try_recv().unwrap();
	}

	#[test]
	fn panic_message_extracts_static_str() {
		let payload: Box<dyn Any + Send> = Box::new("boom-str");
		assert_eq!(panic_message(payload.as_ref()), "boom-str");
	}

	#[test]
	fn panic_message_extracts_string() {
		let payload: Box<dyn Any + Send> = Box::new(String::from("boom-string"));
		assert_eq!(panic_message(payload.as_ref()), "boom-string");
	}

	#[test]
	fn panic_message_tolerates_other_payloads() {
		let payload: Box<dyn Any + Send> = Box::new(42u32);
		assert_eq!(panic_message(payload.as_ref()), "opaque panic payload");
	}
}
