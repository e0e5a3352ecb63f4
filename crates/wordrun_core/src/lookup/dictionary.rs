//! Dictionary lookup response model.
//!
//! # Responsibility
//! - Decode dictionary API entries into typed word details.
//! - Pick the phonetic, audio and definition the screens display.

use super::{LookupError, LookupResult};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Phonetic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Definition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

/// One dictionary entry for a word.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WordDetails {
    pub word: String,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

/// Compact row shown while searching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub word: String,
    pub phonetic: String,
    pub definition: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DictionaryResponse {
    Entries(Vec<WordDetails>),
    NotFound {
        #[allow(dead_code)]
        title: String,
    },
}

/// Decodes a dictionary API body. `None` when the word has no entry.
pub fn parse_dictionary_response(body: &str) -> LookupResult<Option<WordDetails>> {
    let response: DictionaryResponse = serde_json::from_str(body).map_err(LookupError::Parse)?;
    Ok(match response {
        DictionaryResponse::Entries(entries) => entries.into_iter().next(),
        DictionaryResponse::NotFound { .. } => None,
    })
}

impl WordDetails {
    /// Phonetic for the detail view: the first one that also has audio,
    /// else the first with text, else empty.
    pub fn primary_phonetic(&self) -> &str {
        self.phonetic_with_audio()
            .and_then(|phonetic| phonetic.text.as_deref())
            .or_else(|| self.phonetics.iter().find_map(non_empty_text))
            .unwrap_or("")
    }

    /// Playable URL of the phonetic chosen by `primary_phonetic`.
    ///
    /// Protocol-relative URLs (`//host/...`) get an `https:` prefix.
    pub fn audio_url(&self) -> Option<String> {
        let raw = self.phonetic_with_audio()?.audio.as_deref()?;
        if raw.starts_with("http") {
            Some(raw.to_string())
        } else {
            Some(format!("https:{raw}"))
        }
    }

    /// Phonetic recorded with an entry: the first phonetic's text.
    pub fn card_phonetic(&self) -> &str {
        self.phonetics
            .first()
            .and_then(|phonetic| phonetic.text.as_deref())
            .unwrap_or("")
    }

    pub fn first_definition(&self) -> &str {
        self.meanings
            .first()
            .and_then(|meaning| meaning.definitions.first())
            .map_or("", |definition| definition.definition.as_str())
    }

    pub fn to_card(&self) -> ResultCard {
        ResultCard {
            word: self.word.clone(),
            phonetic: self.card_phonetic().to_string(),
            definition: self.first_definition().to_string(),
        }
    }

    fn phonetic_with_audio(&self) -> Option<&Phonetic> {
        self.phonetics.iter().find(|phonetic| {
            non_empty_text(phonetic).is_some()
                && phonetic.audio.as_deref().is_some_and(|audio| !audio.is_empty())
        })
    }
}

fn non_empty_text(phonetic: &Phonetic) -> Option<&str> {
    phonetic.text.as_deref().filter(|text| !text.is_empty())
}
