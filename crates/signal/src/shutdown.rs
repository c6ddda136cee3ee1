use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, bounded};
use parking_lot::Mutex;

/// Payload of the shutdown channel. Uninhabited: the channel can only
/// ever disconnect, never deliver a value, so observing it is always
/// unambiguous.
pub(crate) enum Never {}

/// Cancellable broadcast signal.
///
/// Cloned handles observe the same signal. Cancelling disconnects the
/// underlying channel, which every handle sees, including waits that
/// are already in progress.
#[derive(Debug, Clone)]
pub struct Shutdown {
	tx: Arc<Mutex<Option<Sender<Never>>>>,
	rx: Receiver<Never>,
}

impl Shutdown {
	/// Creates a fresh, untripped signal.
	pub fn new() -> Self {
		let (tx, rx) = bounded(0);
		Self {
			tx: Arc::new(Mutex::new(Some(tx))),
			rx,
		}
	}

	/// Trips the signal. Idempotent; safe to call from any handle.
	pub fn cancel(&self) {
		self.tx.lock().take();
	}

	/// Returns true once the signal has been tripped.
	pub fn is_cancelled(&self) -> bool {
		self.tx.lock().is_none()
	}

	pub(crate) fn receiver(&self) -> &Receiver<Never> {
		&self.rx
	}
}

impl Default for Shutdown {
	fn default() -> Self {
		Self::new()
	}
}
