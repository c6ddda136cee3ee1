/// Priority class of a submitted task. Smaller value = served first.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
	/// Served before `Mid` and `Low`.
	High = 0,
	/// Served after `High`, before `Low`.
	Mid = 1,
	/// Default level for tasks that do not report one.
	Low = 2,
	/// Bypass sentinel: the task skips the queue and the pool and runs
	/// on its own thread. Never placed in the queue; the discriminant
	/// is deliberately disjoint from the queueable levels.
	Top = 0xF690_951D,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn queueable_levels_are_totally_ordered() {
		assert!(Level::High < Level::Mid);
		assert!(Level::Mid < Level::Low);
		assert!(Level::High < Level::Low);
	}

	#[test]
	fn top_is_numerically_disjoint() {
		assert_eq!(Level::High as u32, 0);
		assert_eq!(Level::Mid as u32, 1);
		assert_eq!(Level::Low as u32, 2);
		assert_eq!(Level::Top as u32, 0xF690_951D);
		assert!(Level::Low < Level::Top);
	}
}
