//! Channel-backed event delivery.
//!
//! [`ChannelListener`] turns each notification into an owned [`NetEvent`]
//! and queues it on a tokio mpsc channel, so consumers can handle events on
//! their own task or thread instead of on the core's network thread.

mod queue;

pub use queue::*;
