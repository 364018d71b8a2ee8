//! # Core Application Logic
//!
//! This module contains the IDE's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect::ScheduleReply
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │ assistant  │
//!     │  Adapter   │ ◀── Action::ReplyArrived │ (canned)   │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`tree`]: Copy-on-write file tree
//! - [`documents`]: Path → text store behind the editor
//! - [`chat`]: Append-only assistant transcript
//! - [`run`]: Simulated code execution
//! - [`panel`]: Bottom bar height, tabs, and resize state machine
//! - [`config`]: Layered configuration

pub mod action;
pub mod chat;
pub mod config;
pub mod documents;
pub mod panel;
pub mod run;
pub mod state;
pub mod theme;
pub mod tree;
