//! Repository layer
//!
//! Repositories wrap the HTTP clients behind small, focused traits so the
//! monitor loop can be driven by fakes in tests. They carry no business logic.

mod batches;
mod results;

// Re-export traits
pub use batches::BatchRepository;
pub use results::ResultRepository;

// Re-export implementations
pub use batches::HttpBatchRepository;
pub use results::HttpResultRepository;
