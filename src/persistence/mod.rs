// * Persistence: the canonical draw record and the keyed stores that hold it
// * This module provides the upsert/query-history contract the pipeline
// * writes through and the staleness analyzer reads from.

pub mod schema;
pub mod store;

// * Re-exports for convenient access
pub use schema::DrawResult;
pub use store::{DrawStore, JsonFileDrawStore, MemoryDrawStore, StoreError};
