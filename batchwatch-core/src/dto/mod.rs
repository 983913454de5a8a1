//! Data Transfer Objects
//!
//! Wire documents exchanged with the remote batch API and the storage endpoint.

pub mod batch;
pub mod store;
