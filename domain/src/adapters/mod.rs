//! Adapters that live inside the domain crate for convenience.
//!
//! The in-memory store backs the default server mode, unit tests and the demo
//! CLI. The SQLite store lives in its own crate.

pub mod memory_repo;
