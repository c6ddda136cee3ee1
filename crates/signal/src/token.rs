use crossbeam_channel::{Receiver, Sender, bounded, select};

use crate::shutdown::Shutdown;

/// Outcome of one racing wait on the token channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
	/// A token was taken; work may be available.
	Token,
	/// The shutdown signal fired, or the token channel closed.
	Shutdown,
}

/// Creates a connected token rendezvous.
///
/// The channel has zero capacity: a send completes only when a
/// receiver takes the token. Senders therefore block while every
/// consumer is busy, which is the producer-side throttle.
pub fn token() -> (TokenSender, TokenReceiver) {
	let (tx, rx) = bounded(0);
	(TokenSender { tx }, TokenReceiver { rx })
}

/// Producer half of the token rendezvous.
#[derive(Debug, Clone)]
pub struct TokenSender {
	tx: Sender<()>,
}

impl TokenSender {
	/// Sends one token, blocking until a receiver takes it or
	/// `shutdown` fires, whichever happens first.
	pub fn send(&self, shutdown: &Shutdown) {
		select! {
			send(self.tx, ()) -> _res => {},
			recv(shutdown.receiver()) -> _never => {},
		}
	}
}

/// Consumer half of the token rendezvous.
#[derive(Debug, Clone)]
pub struct TokenReceiver {
	rx: Receiver<()>,
}

impl TokenReceiver {
	/// Waits for a token, racing the shutdown signal.
	///
	/// A disconnected token channel reads as [`Wait::Shutdown`]: a
	/// closed channel must never look like available work.
	pub fn recv(&self, shutdown: &Shutdown) -> Wait {
		select! {
			recv(self.rx) -> msg => match msg {
				Ok(()) => Wait::Token,
				Err(_) => Wait::Shutdown,
			},
			recv(shutdown.receiver()) -> _never => Wait::Shutdown,
		}
	}
}
