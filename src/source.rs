//! Canonical vocabulary data: the languages, words, and decks a screen renders.
//!
//! `WordStore` is an in-memory stand-in for the server collaborator. It can be
//! seeded from a JSON or YAML file but never writes back.

use crate::model::{Deck, DeckId, FormSubmission, LangId, Language, WordId, WordRow};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Read access to canonical word data, used to seed the edit form.
pub trait WordSource {
    fn languages(&self) -> &[Language];
    fn rows(&self) -> Vec<WordRow>;
    fn row(&self, id: WordId) -> Option<WordRow>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NoTranslations,
    UnknownWord(WordId),
    UnknownDeck(DeckId),
    UnknownLanguage(LangId),
    EmptyDeckTitle,
    IdsExhausted,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NoTranslations => f.write_str("At least one translation must be provided"),
            StoreError::UnknownWord(id) => write!(f, "Word {id} not found"),
            StoreError::UnknownDeck(id) => write!(f, "Deck {id} not found"),
            StoreError::UnknownLanguage(id) => write!(f, "Language {id} not found"),
            StoreError::EmptyDeckTitle => f.write_str("Deck title is required"),
            StoreError::IdsExhausted => f.write_str("No identifiers left for a new entry"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Outcome of applying a form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saved {
    Created(WordId),
    Updated(WordId),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreFile {
    languages: Vec<Language>,
    #[serde(default)]
    words: Vec<WordRow>,
    #[serde(default)]
    decks: Vec<Deck>,
}

#[derive(Debug, Clone, Default)]
pub struct WordStore {
    languages: Vec<Language>,
    words: BTreeMap<WordId, BTreeMap<LangId, String>>,
    decks: Vec<Deck>,
}

impl WordStore {
    pub fn new(languages: Vec<Language>, words: Vec<WordRow>, decks: Vec<Deck>) -> Self {
        Self {
            languages,
            words: words
                .into_iter()
                .map(|row| (row.id, row.translations))
                .collect(),
            decks,
        }
    }

    /// Load a store from `.json`, `.yaml`, or `.yml`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read word data {}", path.display()))?;
        let file: StoreFile = match extension(path).as_deref() {
            Some("json") => serde_json::from_str(&raw)
                .with_context(|| format!("invalid JSON in {}", path.display()))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)
                .with_context(|| format!("invalid YAML in {}", path.display()))?,
            _ => bail!(
                "unsupported word data format for {} (expected .json, .yaml, or .yml)",
                path.display()
            ),
        };
        let store = Self::new(file.languages, file.words, file.decks);
        store.check_languages()?;
        store.check_decks()?;
        Ok(store)
    }

    /// Small built-in vocabulary used when no data file is given.
    pub fn sample() -> Self {
        let languages = vec![
            Language {
                id: LangId(1),
                title: "English".into(),
            },
            Language {
                id: LangId(2),
                title: "Deutsch".into(),
            },
            Language {
                id: LangId(3),
                title: "Español".into(),
            },
        ];
        let words = [
            [("dog", 1), ("Hund", 2), ("perro", 3)],
            [("house", 1), ("Haus", 2), ("casa", 3)],
            [("tree", 1), ("Baum", 2), ("árbol", 3)],
        ]
        .into_iter()
        .zip(1u32..)
        .map(|(cells, id)| WordRow {
            id: WordId(id),
            translations: cells
                .into_iter()
                .map(|(text, lang)| (LangId(lang), text.to_string()))
                .collect(),
        })
        .chain(std::iter::once(WordRow {
            id: WordId(4),
            translations: [(LangId(1), "water".to_string())].into_iter().collect(),
        }))
        .collect();
        let decks = vec![Deck {
            id: DeckId(1),
            title: "Basics".into(),
            words: vec![WordId(1), WordId(2)],
            langs: vec![LangId(1), LangId(2)],
        }];
        Self::new(languages, words, decks)
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn deck(&self, id: DeckId) -> Option<&Deck> {
        self.decks.iter().find(|deck| deck.id == id)
    }

    /// Apply the entry form's submission the way the words endpoint does:
    /// trimmed, non-empty translations only; empty id creates a word.
    pub fn apply(&mut self, submission: &FormSubmission) -> Result<Saved, StoreError> {
        let provided: Vec<(LangId, String)> = self
            .languages
            .iter()
            .filter_map(|lang| {
                let text = submission.translations.get(&lang.id)?.trim();
                (!text.is_empty()).then(|| (lang.id, text.to_string()))
            })
            .collect();
        if provided.is_empty() {
            return Err(StoreError::NoTranslations);
        }

        match submission.word_id {
            None => {
                let id = self.next_word_id()?;
                self.words.insert(id, provided.into_iter().collect());
                Ok(Saved::Created(id))
            }
            Some(id) => {
                let existing = self.words.get_mut(&id).ok_or(StoreError::UnknownWord(id))?;
                for (lang, text) in provided {
                    existing.insert(lang, text);
                }
                Ok(Saved::Updated(id))
            }
        }
    }

    /// Remove a word and its deck memberships.
    pub fn delete(&mut self, id: WordId) -> Result<(), StoreError> {
        if self.words.remove(&id).is_none() {
            return Err(StoreError::UnknownWord(id));
        }
        for deck in &mut self.decks {
            deck.words.retain(|word| *word != id);
        }
        Ok(())
    }

    pub fn add_deck(&mut self, title: &str) -> Result<DeckId, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyDeckTitle);
        }
        let id = self
            .decks
            .iter()
            .map(|d| d.id.0)
            .max()
            .map_or(Some(1), |last| last.checked_add(1))
            .map(DeckId)
            .ok_or(StoreError::IdsExhausted)?;
        self.decks.push(Deck {
            id,
            title: title.to_string(),
            words: Vec::new(),
            langs: Vec::new(),
        });
        Ok(id)
    }

    /// Put a word into a deck. `Ok(false)` when it was already there.
    pub fn add_word_to_deck(&mut self, deck: DeckId, word: WordId) -> Result<bool, StoreError> {
        if !self.words.contains_key(&word) {
            return Err(StoreError::UnknownWord(word));
        }
        let deck = self.deck_mut(deck)?;
        if deck.words.contains(&word) {
            return Ok(false);
        }
        deck.words.push(word);
        Ok(true)
    }

    pub fn remove_word_from_deck(&mut self, deck: DeckId, word: WordId) -> Result<bool, StoreError> {
        let deck = self.deck_mut(deck)?;
        let before = deck.words.len();
        deck.words.retain(|id| *id != word);
        Ok(deck.words.len() != before)
    }

    pub fn add_lang_to_deck(&mut self, deck: DeckId, lang: LangId) -> Result<bool, StoreError> {
        if !self.languages.iter().any(|l| l.id == lang) {
            return Err(StoreError::UnknownLanguage(lang));
        }
        let deck = self.deck_mut(deck)?;
        if deck.langs.contains(&lang) {
            return Ok(false);
        }
        deck.langs.push(lang);
        Ok(true)
    }

    pub fn remove_lang_from_deck(&mut self, deck: DeckId, lang: LangId) -> Result<bool, StoreError> {
        let deck = self.deck_mut(deck)?;
        let before = deck.langs.len();
        deck.langs.retain(|id| *id != lang);
        Ok(deck.langs.len() != before)
    }

    /// Everything the deck screen shows: language membership, the deck's
    /// words, and the words that could still be added.
    pub fn deck_view(&self, id: DeckId) -> Option<DeckView<'_>> {
        let deck = self.deck(id)?;
        let languages = self
            .languages
            .iter()
            .map(|lang| (lang, deck.langs.contains(&lang.id)))
            .collect();
        let words = deck.words.iter().filter_map(|word| self.row(*word)).collect();
        let available = if deck.langs.is_empty() {
            Vec::new()
        } else {
            self.words
                .iter()
                .filter(|(word, translations)| {
                    !deck.words.contains(word)
                        && deck.langs.iter().all(|lang| {
                            translations
                                .get(lang)
                                .is_some_and(|text| !text.trim().is_empty())
                        })
                })
                .map(|(word, translations)| WordRow {
                    id: *word,
                    translations: translations.clone(),
                })
                .collect()
        };
        Some(DeckView {
            deck,
            languages,
            words,
            available,
        })
    }

    fn deck_mut(&mut self, id: DeckId) -> Result<&mut Deck, StoreError> {
        self.decks
            .iter_mut()
            .find(|deck| deck.id == id)
            .ok_or(StoreError::UnknownDeck(id))
    }

    fn next_word_id(&self) -> Result<WordId, StoreError> {
        match self.words.keys().next_back() {
            None => Ok(WordId(1)),
            Some(last) => last
                .0
                .checked_add(1)
                .map(WordId)
                .ok_or(StoreError::IdsExhausted),
        }
    }

    fn check_languages(&self) -> Result<()> {
        if self.languages.is_empty() {
            bail!("word data must declare at least one language");
        }
        let mut seen = BTreeMap::new();
        for lang in &self.languages {
            if let Some(previous) = seen.insert(lang.id, lang.title.as_str()) {
                bail!(
                    "language id {} is declared twice ({previous:?} and {:?})",
                    lang.id,
                    lang.title
                );
            }
        }
        Ok(())
    }

    fn check_decks(&self) -> Result<()> {
        for deck in &self.decks {
            if let Some(lang) = deck
                .langs
                .iter()
                .find(|lang| !self.languages.iter().any(|known| known.id == **lang))
            {
                bail!("deck {} uses undeclared language id {lang}", deck.id);
            }
        }
        Ok(())
    }
}

/// One deck with its language membership and word lists resolved.
#[derive(Debug, Clone)]
pub struct DeckView<'a> {
    pub deck: &'a Deck,
    pub languages: Vec<(&'a Language, bool)>,
    pub words: Vec<WordRow>,
    pub available: Vec<WordRow>,
}

impl DeckView<'_> {
    /// Row text for the deck's languages, or every translation when the deck
    /// has none selected.
    pub fn label(&self, row: &WordRow) -> String {
        let parts: Vec<&str> = if self.deck.langs.is_empty() {
            row.translations.values().map(String::as_str).collect()
        } else {
            self.languages
                .iter()
                .filter(|(_, member)| *member)
                .filter_map(|(lang, _)| row.translation(lang.id))
                .collect()
        };
        parts.join(" / ")
    }
}

impl WordSource for WordStore {
    fn languages(&self) -> &[Language] {
        &self.languages
    }

    fn rows(&self) -> Vec<WordRow> {
        self.words
            .iter()
            .map(|(id, translations)| WordRow {
                id: *id,
                translations: translations.clone(),
            })
            .collect()
    }

    fn row(&self, id: WordId) -> Option<WordRow> {
        self.words.get(&id).map(|translations| WordRow {
            id,
            translations: translations.clone(),
        })
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn submission(word_id: Option<u32>, cells: &[(u32, &str)]) -> FormSubmission {
        FormSubmission {
            word_id: word_id.map(WordId),
            translations: cells
                .iter()
                .map(|(lang, text)| (LangId(*lang), text.to_string()))
                .collect(),
        }
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        env::temp_dir().join(format!("wordpanel_{nanos}_{name}"))
    }

    #[test]
    fn apply_creates_word_with_trimmed_translations() {
        let mut store = WordStore::sample();
        let saved = store
            .apply(&submission(None, &[(1, "  cat "), (2, ""), (3, "   ")]))
            .expect("create");
        assert_eq!(saved, Saved::Created(WordId(5)));
        let row = store.row(WordId(5)).expect("created row");
        assert_eq!(row.translation(LangId(1)), Some("cat"));
        assert_eq!(row.translations.len(), 1);
    }

    #[test]
    fn apply_rejects_all_blank() {
        let mut store = WordStore::sample();
        let err = store
            .apply(&submission(None, &[(1, " "), (2, "")]))
            .expect_err("blank rejected");
        assert_eq!(err, StoreError::NoTranslations);
        assert_eq!(err.to_string(), "At least one translation must be provided");
        assert_eq!(store.word_count(), 4);
    }

    #[test]
    fn apply_updates_only_provided_translations() {
        let mut store = WordStore::sample();
        let saved = store
            .apply(&submission(Some(1), &[(1, "hound"), (2, ""), (3, "")]))
            .expect("update");
        assert_eq!(saved, Saved::Updated(WordId(1)));
        let row = store.row(WordId(1)).expect("row");
        assert_eq!(row.translation(LangId(1)), Some("hound"));
        assert_eq!(row.translation(LangId(2)), Some("Hund"));
    }

    #[test]
    fn apply_ignores_unknown_languages_and_rejects_unknown_words() {
        let mut store = WordStore::sample();
        let err = store
            .apply(&submission(Some(1), &[(42, "nope")]))
            .expect_err("unknown language only");
        assert_eq!(err, StoreError::NoTranslations);
        let err = store
            .apply(&submission(Some(99), &[(1, "ghost")]))
            .expect_err("unknown word");
        assert_eq!(err, StoreError::UnknownWord(WordId(99)));
    }

    #[test]
    fn delete_removes_deck_membership() {
        let mut store = WordStore::sample();
        store.delete(WordId(1)).expect("delete");
        assert!(store.row(WordId(1)).is_none());
        assert_eq!(store.decks()[0].words, vec![WordId(2)]);
        assert_eq!(
            store.delete(WordId(1)),
            Err(StoreError::UnknownWord(WordId(1)))
        );
    }

    #[test]
    fn add_deck_requires_title() {
        let mut store = WordStore::sample();
        assert_eq!(store.add_deck("   "), Err(StoreError::EmptyDeckTitle));
        assert_eq!(store.add_deck(" Travel "), Ok(DeckId(2)));
        assert_eq!(store.decks()[1].title, "Travel");
    }

    fn store_with_ids(word: u32, deck: u32) -> WordStore {
        WordStore::new(
            vec![Language {
                id: LangId(1),
                title: "English".into(),
            }],
            vec![WordRow {
                id: WordId(word),
                translations: [(LangId(1), "edge".to_string())].into_iter().collect(),
            }],
            vec![Deck {
                id: DeckId(deck),
                title: "Edge".into(),
                words: Vec::new(),
                langs: Vec::new(),
            }],
        )
    }

    #[test]
    fn creating_past_the_largest_word_id_is_an_error() {
        let mut store = store_with_ids(u32::MAX, 1);
        let err = store
            .apply(&submission(None, &[(1, "one more")]))
            .expect_err("no id left");
        assert_eq!(err, StoreError::IdsExhausted);
        assert_eq!(store.word_count(), 1);
        assert_eq!(
            store.row(WordId(u32::MAX)).and_then(|r| r.translation(LangId(1)).map(str::to_string)),
            Some("edge".to_string())
        );
    }

    #[test]
    fn creating_past_the_largest_deck_id_is_an_error() {
        let mut store = store_with_ids(1, u32::MAX);
        assert_eq!(store.add_deck("y"), Err(StoreError::IdsExhausted));
        assert_eq!(store.decks().len(), 1);
    }

    #[test]
    fn deck_word_membership_changes() {
        let mut store = WordStore::sample();
        assert_eq!(store.add_word_to_deck(DeckId(1), WordId(3)), Ok(true));
        assert_eq!(store.add_word_to_deck(DeckId(1), WordId(3)), Ok(false));
        assert_eq!(
            store.deck(DeckId(1)).map(|d| d.words.clone()),
            Some(vec![WordId(1), WordId(2), WordId(3)])
        );
        assert_eq!(store.remove_word_from_deck(DeckId(1), WordId(1)), Ok(true));
        assert_eq!(store.remove_word_from_deck(DeckId(1), WordId(1)), Ok(false));
        assert_eq!(
            store.add_word_to_deck(DeckId(9), WordId(2)),
            Err(StoreError::UnknownDeck(DeckId(9)))
        );
        assert_eq!(
            store.add_word_to_deck(DeckId(1), WordId(99)),
            Err(StoreError::UnknownWord(WordId(99)))
        );
    }

    #[test]
    fn deck_language_membership_changes() {
        let mut store = WordStore::sample();
        assert_eq!(store.add_lang_to_deck(DeckId(1), LangId(3)), Ok(true));
        assert_eq!(store.add_lang_to_deck(DeckId(1), LangId(3)), Ok(false));
        assert_eq!(
            store.add_lang_to_deck(DeckId(1), LangId(8)),
            Err(StoreError::UnknownLanguage(LangId(8)))
        );
        assert_eq!(store.remove_lang_from_deck(DeckId(1), LangId(1)), Ok(true));
        assert_eq!(
            store.deck(DeckId(1)).map(|d| d.langs.clone()),
            Some(vec![LangId(2), LangId(3)])
        );
    }

    #[test]
    fn deck_view_offers_only_fully_translated_words() {
        let mut store = WordStore::sample();
        let view = store.deck_view(DeckId(1)).expect("deck");
        let in_deck: Vec<WordId> = view.words.iter().map(|r| r.id).collect();
        let offered: Vec<WordId> = view.available.iter().map(|r| r.id).collect();
        assert_eq!(in_deck, vec![WordId(1), WordId(2)]);
        assert_eq!(offered, vec![WordId(3)]);
        assert_eq!(view.label(&view.words[0]), "dog / Hund");
        assert!(view.languages.iter().any(|(l, member)| l.id == LangId(3) && !member));

        store.remove_lang_from_deck(DeckId(1), LangId(1)).expect("remove");
        store.remove_lang_from_deck(DeckId(1), LangId(2)).expect("remove");
        let view = store.deck_view(DeckId(1)).expect("deck");
        assert!(view.available.is_empty());
        assert_eq!(view.label(&view.words[0]), "dog / Hund / perro");
        assert!(store.deck_view(DeckId(5)).is_none());
    }

    #[test]
    fn loads_json_and_yaml() {
        let json = temp_path("words.json");
        fs::write(
            &json,
            r#"{"languages":[{"id":1,"title":"English"},{"id":5,"title":"Русский"}],
                "words":[{"id":3,"translations":{"5":"кот"}}]}"#,
        )
        .expect("write json");
        let store = WordStore::load(&json).expect("load json");
        assert_eq!(store.languages().len(), 2);
        assert_eq!(
            store.row(WordId(3)).and_then(|r| r.translation(LangId(5)).map(str::to_string)),
            Some("кот".to_string())
        );
        let _ = fs::remove_file(&json);

        let yaml = temp_path("words.yaml");
        fs::write(
            &yaml,
            "languages:\n  - id: 1\n    title: English\nwords:\n  - id: 2\n    translations:\n      1: bird\ndecks:\n  - id: 1\n    title: Animals\n    words: [2]\n",
        )
        .expect("write yaml");
        let store = WordStore::load(&yaml).expect("load yaml");
        assert_eq!(store.word_count(), 1);
        assert_eq!(store.decks()[0].title, "Animals");
        let _ = fs::remove_file(&yaml);
    }

    #[test]
    fn load_rejects_unknown_extension_and_duplicate_languages() {
        let txt = temp_path("words.txt");
        fs::write(&txt, "{}").expect("write txt");
        assert!(WordStore::load(&txt).is_err());
        let _ = fs::remove_file(&txt);

        let dup = temp_path("dup.json");
        fs::write(
            &dup,
            r#"{"languages":[{"id":1,"title":"English"},{"id":1,"title":"Again"}]}"#,
        )
        .expect("write dup");
        let err = WordStore::load(&dup).expect_err("duplicate language");
        assert!(err.to_string().contains("declared twice"));
        let _ = fs::remove_file(&dup);

        let stray = temp_path("stray.json");
        fs::write(
            &stray,
            r#"{"languages":[{"id":1,"title":"English"}],
                "decks":[{"id":1,"title":"Odd","langs":[4]}]}"#,
        )
        .expect("write stray");
        let err = WordStore::load(&stray).expect_err("undeclared deck language");
        assert!(err.to_string().contains("undeclared language id 4"));
        let _ = fs::remove_file(&stray);
    }
}
