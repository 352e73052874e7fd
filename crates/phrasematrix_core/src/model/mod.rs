//! Domain model for phrase records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep validation rules next to the record they protect.
//!
//! # Invariants
//! - Every phrase is identified by a stable `PhraseId`.
//! - Phrases are never mutated in place; deletion removes the record.

pub mod phrase;
pub mod sanitize;
