//! Application layer: command and query handlers over a `KeyValueStore`,
//! and the `ReadingLog` service that owns the aggregate cache.

pub mod command_handlers;
pub mod query_handlers;
pub mod service;
pub mod storage;
