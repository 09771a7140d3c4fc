//! Skillwright: concurrent per-item skill generation
//!
//! Pick a bounded set of catalog apps, stream an independently generated skill for each,
//! and gate the later steps on partial completion. Each stream is cancellable on its own,
//! and late frames from a superseded or cancelled stream never reach the job.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod error;
pub mod job;
pub mod logging;
pub mod registry;
pub mod scheduler;
pub mod selection;
pub mod session;
pub mod transport;
pub mod wizard;
