//! Read-only client for a TzKT-style blockchain indexer

pub mod client;
pub mod query;

pub use client::{HttpIndexerClient, IndexerApi};
pub use query::{CountQuery, ListQuery, Operation, OperationSender};
