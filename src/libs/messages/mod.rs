//! User-facing messages and the macros that print them.
//!
//! Commands print through the `msg_*` macros with a [`Message`] value. With
//! `PMT_DEBUG` or `RUST_LOG` set, the same output is routed to `tracing`
//! instead of stdout.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
