//! Wake-up and shutdown signalling primitives for worker pools.
//!
//! Two cooperating pieces:
//! - [`Shutdown`], a cancellable broadcast signal shared by one pool
//!   generation, and
//! - a zero-capacity token rendezvous ([`token`]) that wakes exactly
//!   one idle worker per send.
//!
//! Every blocking operation on the token channel races the shutdown
//! signal, so a tripped signal unblocks producers and consumers alike.

mod shutdown;
mod token;

pub use shutdown::Shutdown;
pub use token::{TokenReceiver, TokenSender, Wait, token};
