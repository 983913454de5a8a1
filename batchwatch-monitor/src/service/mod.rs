//! Service layer
//!
//! Services contain the decision logic of the monitor. They never perform
//! I/O themselves; the scheduler feeds them data fetched through the
//! repositories and acts on what they return.

mod resolution;

pub use resolution::{Resolution, resolve};
