//! Task notification infrastructure.
//!
//! This crate provides the building blocks for delivering generation
//! outcomes to subscribed clients:
//!
//! - [`TaskOutcome`] -- the terminal event published once per task.
//! - [`TaskRegistry`] -- in-memory map of task rooms with an outcome cache,
//!   so clients that subscribe after the worker finished still receive the
//!   event (join-after-completion replay).

pub mod outcome;
pub mod registry;

pub use outcome::TaskOutcome;
pub use registry::{OutcomeReceiver, OutcomeSender, TaskRegistry};
