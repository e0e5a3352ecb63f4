//! Flutter-facing bindings for the WordRun core.

pub mod api;
