//! Core domain types
//!
//! The batch job descriptor and the status vocabulary of the remote batch API.
//! These types are shared between the monitor (which mutates job state) and
//! the CLI (which only reports).

pub mod batch;
