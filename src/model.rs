//! Vocabulary records shared by the controllers, the data source, and the UI.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of one of the user's languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LangId(pub u32);

/// Identifier of a persisted word (one row of the words table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(pub u32);

/// Identifier of a study deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(pub u32);

macro_rules! id_text {
    ($($name:ident),+ $(,)?) => {$(
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map($name)
            }
        }
    )+};
}

id_text!(LangId, WordId, DeckId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: LangId,
    pub title: String,
}

/// Read-only reflection of one persisted word: its translations keyed by language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRow {
    pub id: WordId,
    #[serde(default)]
    pub translations: BTreeMap<LangId, String>,
}

impl WordRow {
    pub fn translation(&self, lang: LangId) -> Option<&str> {
        self.translations.get(&lang).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub title: String,
    #[serde(default)]
    pub words: Vec<WordId>,
    /// Languages studied with this deck; a word is offered for the deck only
    /// when it has a translation in each of them.
    #[serde(default)]
    pub langs: Vec<LangId>,
}

/// Whether the entry form creates a new word or modifies an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Add,
    Edit,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Add => "add",
            Mode::Edit => "edit",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payload carried by the entry form's default submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    /// `None` when the identifier field is empty (create).
    pub word_id: Option<WordId>,
    pub translations: BTreeMap<LangId, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_parse_trimmed_text() {
        assert_eq!(" 42 ".parse::<WordId>().ok(), Some(WordId(42)));
        assert_eq!("7".parse::<DeckId>().ok(), Some(DeckId(7)));
        assert_eq!("3\n".parse::<LangId>().ok(), Some(LangId(3)));
        assert!("abc".parse::<WordId>().is_err());
        assert!("".parse::<DeckId>().is_err());
        assert!("-1".parse::<LangId>().is_err());
    }

    #[test]
    fn deck_languages_default_to_empty() {
        let deck: Deck = serde_json::from_str(r#"{"id": 2, "title": "Verbs"}"#).expect("deck json");
        assert!(deck.words.is_empty());
        assert!(deck.langs.is_empty());
        assert_eq!(deck.id.to_string(), "2");
    }

    #[test]
    fn word_row_deserializes_with_string_lang_keys() {
        let row: WordRow =
            serde_json::from_str(r#"{"id": 7, "translations": {"1": "dog", "2": "Hund"}}"#)
                .expect("row json");
        assert_eq!(row.id, WordId(7));
        assert_eq!(row.translation(LangId(2)), Some("Hund"));
        assert_eq!(row.translation(LangId(3)), None);
    }

    #[test]
    fn mode_defaults_to_add() {
        assert_eq!(Mode::default(), Mode::Add);
        assert_eq!(Mode::Edit.to_string(), "edit");
    }
}
