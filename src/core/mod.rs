//! Core boundary types shared by every layer.
//!
//! These are the handles the transport core passes across the notification
//! boundary: peers, connection ids, and the call-scoped payload reader.

mod error;
mod peer;
mod reader;

pub use error::*;
pub use peer::*;
pub use reader::*;
