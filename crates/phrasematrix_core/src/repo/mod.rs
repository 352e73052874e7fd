//! Persistence abstractions for the phrase collection.
//!
//! # Responsibility
//! - Define the durable key-value contract the store writes through.
//! - Isolate SQLite and JSON details from state/business orchestration.

pub mod kv_repo;
pub mod phrase_repo;
