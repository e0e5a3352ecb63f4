//! Word suggestions and keystroke debouncing.

use super::{LookupError, LookupResult};
use serde::Deserialize;
use std::time::{Duration, Instant};

/// Quiet period after the last keystroke before suggestions are requested.
pub const DEFAULT_SUGGESTION_DEBOUNCE: Duration = Duration::from_millis(300);

/// Candidate word for a partial query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    pub word: String,
    #[serde(default)]
    pub score: Option<u64>,
}

/// Decodes a suggestion API body (`[{"word": .., "score": ..}, ..]`).
pub fn parse_suggestions(body: &str) -> LookupResult<Vec<Suggestion>> {
    serde_json::from_str(body).map_err(LookupError::Parse)
}

/// What the caller should do right after a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceAction {
    /// Query is blank: clear shown results now.
    Clear,
    /// Wait for `poll` to release the query.
    Scheduled,
}

/// Collapses bursts of keystrokes into one suggestion request.
///
/// Time is passed in by the caller so the UI loop owns the clock.
#[derive(Debug, Clone)]
pub struct SuggestionDebouncer {
    quiet_period: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for SuggestionDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGESTION_DEBOUNCE)
    }
}

impl SuggestionDebouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// Records the latest input text, replacing any pending query.
    pub fn on_input(&mut self, text: &str, now: Instant) -> DebounceAction {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.pending = None;
            return DebounceAction::Clear;
        }
        self.pending = Some((trimmed.to_string(), now));
        DebounceAction::Scheduled
    }

    /// Releases the pending query once the input has been quiet long enough.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let (_, last_input) = self.pending.as_ref()?;
        if now.saturating_duration_since(*last_input) < self.quiet_period {
            return None;
        }
        self.pending.take().map(|(query, _)| query)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
