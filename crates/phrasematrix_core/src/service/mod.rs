//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, persistence and notification into phrase use-cases.
//! - Keep presentation layers decoupled from storage details.

pub mod phrase_store;
pub mod provider;
