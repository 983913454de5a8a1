//! Scheduler layer for the monitor
//!
//! Drives the fixed-interval check loop over the watched batch jobs and
//! tracks each job from pending to resolved.

pub mod poller;

pub use poller::{BatchMonitor, MonitorSummary};
