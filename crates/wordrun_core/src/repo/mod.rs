//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Provide a string key-value store over SQLite.
//! - Map journal records to versioned JSON values under stable keys.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`Read`, `Write`, `Parse`) so the
//!   service layer can decide how to degrade.

pub mod daily_log_repo;
pub mod kv_store;
