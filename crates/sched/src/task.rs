use crate::Level;

/// The minimal executable unit accepted by the scheduler.
///
/// Ownership transfers to the scheduler at submission; `run` consumes
/// the task, so a given submission can be executed at most once.
pub trait Task: Send + 'static {
	/// Executes the task synchronously on whichever thread runs it.
	fn run(self: Box<Self>);

	/// Level used for queue ordering. Read exactly once, at submission
	/// time; changing what a task reports afterwards has no effect on
	/// an already queued entry.
	fn priority(&self) -> Level {
		Level::Low
	}
}

/// Plain closures are tasks: `scheduler.submit(|| { .. })`.
impl<F> Task for F
where
	F: FnOnce() + Send + 'static,
{
	fn run(self: Box<Self>) {
		(*self)()
	}
}

impl Task for Box<dyn Task> {
	fn run(self: Box<Self>) {
		(*self).run()
	}

	fn priority(&self) -> Level {
		(**self).priority()
	}
}

/// Adapter forcing a fixed level onto a task, overriding whatever the
/// inner task reports.
pub struct WithLevel<T> {
	task: T,
	level: Level,
}

impl<T: Task> WithLevel<T> {
	pub fn new(task: T, level: Level) -> Self {
		Self { task, level }
	}
}

impl<T: Task> Task for WithLevel<T> {
	fn run(self: Box<Self>) {
		let WithLevel { task, .. } = *self;
		Box::new(task).run();
	}

	fn priority(&self) -> Level {
		self.level
	}
}

#[cfg(test)]
mod tests {
	use std::sync::mpsc;

	use super::*;

	struct Labeled {
		level: Level,
	}

	impl Task for Labeled {
		fn run(self: Box<Self>) {}

		fn priority(&self) -> Level {
			self.level
		}
	}

	#[test]
	fn closures_default_to_low() {
		let task = || {};
		assert_eq!(task.priority(), Level::Low);
	}

	#[test]
	fn with_level_overrides_inner_priority() {
		let task = WithLevel::new(Labeled { level: Level::High }, Level::Mid);
		assert_eq!(task.priority(), Level::Mid);
	}

	#[test]
	fn run_executes_boxed_closure() {
		let (tx, rx) = mpsc::channel();
		let task: Box<dyn Task> = Box::new(move || tx.send(()).unwrap());
		task.run();
		rx.try_recv().unwrap();
	}

	#[test]
	fn boxed_tasks_forward_priority() {
		let task: Box<dyn Task> = Box::new(Labeled { level: Level::High });
		assert_eq!(task.priority(), Level::High);
	}

	#[test]
	fn with_level_still_runs_inner_task() {
		let (tx, rx) = mpsc::channel();
		let task = WithLevel::new(move || tx.send(()).unwrap(), Level::High);
		Box::new(task).run();
		rx.try_recv().unwrap();
	}
}
