//! Infrastructure layer - access to the remote indexing API

pub mod indexer;
