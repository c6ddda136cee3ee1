use std::sync::LazyLock;

use crate::{Level, Scheduler, Task};

/// Process-wide default scheduler, sized at twice the logical CPU
/// count. Built on first use.
static GLOBAL: LazyLock<Scheduler> = LazyLock::new(Scheduler::default);

impl Scheduler {
	/// The process-wide default instance.
	///
	/// Ambient entry point for code without an injected scheduler;
	/// prefer owned instances where one can be passed in (tests in
	/// particular). Stopping it follows the usual lifecycle: the next
	/// queued submission rebuilds the pool.
	pub fn global() -> &'static Scheduler {
		&GLOBAL
	}
}

/// Submits a task to the process-wide default scheduler.
pub fn submit<T: Task>(task: T) {
	Scheduler::global().submit(task);
}

/// Submits a task to the process-wide default scheduler at a forced
/// level.
pub fn submit_with_priority<T: Task>(task: T, level: Level) {
	Scheduler::global().submit_with_priority(task, level);
}

#[cfg(test)]
mod tests {
	use std::sync::mpsc;
	use std::time::Duration;

	use serial_test::serial;

	use super::*;

	const WAIT: Duration = Duration::from_secs(5);

	#[test]
	#[serial]
	fn global_submit_executes() {
		let (tx, rx) = mpsc::channel();
		submit(move || tx.send(()).unwrap());
		rx.recv_timeout(WAIT).unwrap();
	}

	#[test]
	#[serial]
	fn global_restarts_after_stop() {
		let (tx, rx) = mpsc::channel();
		submit(move || tx.send(()).unwrap());
		rx.recv_timeout(WAIT).unwrap();

		Scheduler::global().stop();

		let (tx, rx) = mpsc::channel();
		submit_with_priority(move || tx.send(()).unwrap(), Level::High);
		rx.recv_timeout(WAIT).unwrap();
	}
}
