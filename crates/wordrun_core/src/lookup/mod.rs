//! Dictionary and suggestion lookups.
//!
//! # Responsibility
//! - Define the seams to the remote dictionary and suggestion services.
//! - Decode their responses and combine them into search results.
//!
//! # Invariants
//! - Transport stays behind `DictionaryLookup`/`SuggestionLookup`.
//! - A failed lookup drops that result; search itself never fails.

use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod dictionary;
pub mod suggest;

pub use dictionary::{parse_dictionary_response, ResultCard, WordDetails};
pub use suggest::{parse_suggestions, DebounceAction, Suggestion, SuggestionDebouncer};

pub type LookupResult<T> = Result<T, LookupError>;

/// Failure of a remote lookup.
#[derive(Debug)]
pub enum LookupError {
    /// Network or service failure reported by the transport.
    Transport(String),
    Parse(serde_json::Error),
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "lookup transport failed: {message}"),
            Self::Parse(err) => write!(f, "malformed lookup response: {err}"),
        }
    }
}

impl Error for LookupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(_) => None,
            Self::Parse(err) => Some(err),
        }
    }
}

/// Resolves a word to its dictionary entry.
pub trait DictionaryLookup {
    fn lookup(&self, word: &str) -> LookupResult<Option<WordDetails>>;
}

/// Proposes complete words for a partial query.
pub trait SuggestionLookup {
    fn suggest(&self, partial: &str) -> LookupResult<Vec<Suggestion>>;
}

/// Suggests words for `text` and resolves each one to its dictionary entry.
///
/// Blank queries return nothing without calling either service. Suggestions
/// without an entry, or whose lookup fails, are skipped; order follows the
/// suggestion service.
pub fn search_words<S, D>(suggestions: &S, dictionary: &D, text: &str) -> Vec<WordDetails>
where
    S: SuggestionLookup + ?Sized,
    D: DictionaryLookup + ?Sized,
{
    let query = text.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let candidates = match suggestions.suggest(query) {
        Ok(candidates) => candidates,
        Err(err) => {
            warn!("event=word_search module=lookup status=error stage=suggest error={err}");
            return Vec::new();
        }
    };

    let mut failed = 0usize;
    let results = candidates
        .iter()
        .filter_map(|candidate| match dictionary.lookup(&candidate.word) {
            Ok(details) => details,
            Err(_) => {
                failed += 1;
                None
            }
        })
        .collect::<Vec<_>>();

    if failed > 0 {
        warn!(
            "event=word_search module=lookup status=degraded candidates={} failed={}",
            candidates.len(),
            failed
        );
    }
    results
}

#[cfg(test)]
mod tests {
    use super::{
        parse_dictionary_response, search_words, DictionaryLookup, LookupError, LookupResult,
        Suggestion, SuggestionLookup, WordDetails,
    };
    use std::cell::Cell;

    struct FixedSuggestions {
        words: Vec<&'static str>,
        calls: Cell<usize>,
    }

    impl SuggestionLookup for FixedSuggestions {
        fn suggest(&self, _partial: &str) -> LookupResult<Vec<Suggestion>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self
                .words
                .iter()
                .map(|word| Suggestion {
                    word: word.to_string(),
                    score: None,
                })
                .collect())
        }
    }

    struct BrokenSuggestions;

    impl SuggestionLookup for BrokenSuggestions {
        fn suggest(&self, _partial: &str) -> LookupResult<Vec<Suggestion>> {
            Err(LookupError::Transport("offline".to_string()))
        }
    }

    struct Dictionary;

    impl DictionaryLookup for Dictionary {
        fn lookup(&self, word: &str) -> LookupResult<Option<WordDetails>> {
            match word {
                "apple" => parse_dictionary_response(
                    r#"[{"word":"apple","phonetics":[{"text":"/ˈæp.əl/"}],"meanings":[]}]"#,
                ),
                "appl" => Ok(None),
                _ => Err(LookupError::Transport("timeout".to_string())),
            }
        }
    }

    #[test]
    fn keeps_resolved_suggestions_in_order() {
        let suggestions = FixedSuggestions {
            words: vec!["appl", "apple", "applesauce"],
            calls: Cell::new(0),
        };
        let results = search_words(&suggestions, &Dictionary, " app ");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].word, "apple");
        assert_eq!(results[0].card_phonetic(), "/ˈæp.əl/");
    }

    #[test]
    fn blank_query_skips_services() {
        let suggestions = FixedSuggestions {
            words: vec!["apple"],
            calls: Cell::new(0),
        };
        assert!(search_words(&suggestions, &Dictionary, "   ").is_empty());
        assert_eq!(suggestions.calls.get(), 0);
    }

    #[test]
    fn suggestion_failure_yields_empty_results() {
        assert!(search_words(&BrokenSuggestions, &Dictionary, "app").is_empty());
    }
}
