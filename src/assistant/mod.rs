//! # Assistant
//!
//! Produces replies for the chat sidebar. The rest of the app talks to a
//! [`ChatResponder`]; the only implementation is [`CannedResponder`], which
//! waits a fixed delay and answers with fixed text.

pub mod canned;
pub mod responder;

pub use canned::CannedResponder;
pub use responder::{ChatResponder, spawn_reply};
