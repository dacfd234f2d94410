//! HTTP adapter: maps routes onto the guard chain and the catalog store.

pub mod server;
