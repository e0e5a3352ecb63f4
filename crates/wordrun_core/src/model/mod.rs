//! Domain model for the daily word journal.
//!
//! # Responsibility
//! - Define the records the journal persists: entries, the current day's run
//!   and the archived history of past days.
//! - Keep ordering and uniqueness rules next to the data they protect.
//!
//! # Invariants
//! - Entries are only appended or removed by position, never reordered.
//! - A `HistoryDay` id appears at most once in a `History`.

pub mod date_key;
pub mod entry;
pub mod history;
