//! Path routing for navigation requests issued by the controllers.

use crate::model::{DeckId, LangId, WordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Words,
    Decks,
    DeleteWord(WordId),
    Deck(DeckId),
    AddWordToDeck { deck: DeckId, word: WordId },
    RemoveWordFromDeck { deck: DeckId, word: WordId },
    AddLangToDeck { deck: DeckId, lang: LangId },
    RemoveLangFromDeck { deck: DeckId, lang: LangId },
}

impl Route {
    pub fn path(self) -> String {
        match self {
            Route::Words => "/mywords".to_string(),
            Route::Decks => "/mydecks".to_string(),
            Route::DeleteWord(id) => format!("/mywords/delete/{id}"),
            Route::Deck(id) => format!("/deck/{id}"),
            Route::AddWordToDeck { deck, word } => format!("/decks/addword/{deck}/{word}"),
            Route::RemoveWordFromDeck { deck, word } => {
                format!("/decks/removeword/{deck}/{word}")
            }
            Route::AddLangToDeck { deck, lang } => format!("/deck/addlang/{deck}/{lang}"),
            Route::RemoveLangFromDeck { deck, lang } => format!("/deck/removelang/{deck}/{lang}"),
        }
    }
}

/// Map a navigation path onto a route; `None` for paths nothing serves.
pub fn parse_route(path: &str) -> Option<Route> {
    let trimmed = path.trim().trim_end_matches('/');
    let segments: Vec<&str> = trimmed.trim_start_matches('/').split('/').collect();
    let route = match segments.as_slice() {
        ["mywords"] => Route::Words,
        ["mydecks"] => Route::Decks,
        ["mywords", "delete", id] => Route::DeleteWord(id.parse().ok()?),
        ["deck", id] => Route::Deck(id.parse().ok()?),
        ["decks", "addword", deck, word] => Route::AddWordToDeck {
            deck: deck.parse().ok()?,
            word: word.parse().ok()?,
        },
        ["decks", "removeword", deck, word] => Route::RemoveWordFromDeck {
            deck: deck.parse().ok()?,
            word: word.parse().ok()?,
        },
        ["deck", "addlang", deck, lang] => Route::AddLangToDeck {
            deck: deck.parse().ok()?,
            lang: lang.parse().ok()?,
        },
        ["deck", "removelang", deck, lang] => Route::RemoveLangFromDeck {
            deck: deck.parse().ok()?,
            lang: lang.parse().ok()?,
        },
        _ => return None,
    };
    Some(route)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(parse_route("/mywords"), Some(Route::Words));
        assert_eq!(parse_route("/mydecks/"), Some(Route::Decks));
        assert_eq!(
            parse_route("/mywords/delete/12"),
            Some(Route::DeleteWord(WordId(12)))
        );
        assert_eq!(parse_route("/deck/4"), Some(Route::Deck(DeckId(4))));
        assert_eq!(
            parse_route("/decks/removeword/4/9"),
            Some(Route::RemoveWordFromDeck {
                deck: DeckId(4),
                word: WordId(9)
            })
        );
        assert_eq!(
            parse_route("/deck/addlang/4/2"),
            Some(Route::AddLangToDeck {
                deck: DeckId(4),
                lang: LangId(2)
            })
        );
    }

    #[test]
    fn rejects_unknown_or_malformed_paths() {
        assert_eq!(parse_route("/flashcards"), None);
        assert_eq!(parse_route("/mywords/delete/abc"), None);
        assert_eq!(parse_route("/mywords/delete/"), None);
        assert_eq!(parse_route("/deck/addlang/4"), None);
        assert_eq!(parse_route("/decks/addword/x/1"), None);
        assert_eq!(parse_route("/mylanguages"), None);
        assert_eq!(parse_route(""), None);
    }

    #[test]
    fn path_round_trips_through_parser() {
        let deck = DeckId(3);
        for route in [
            Route::Words,
            Route::Decks,
            Route::DeleteWord(WordId(3)),
            Route::Deck(deck),
            Route::AddWordToDeck {
                deck,
                word: WordId(8),
            },
            Route::RemoveWordFromDeck {
                deck,
                word: WordId(8),
            },
            Route::AddLangToDeck {
                deck,
                lang: LangId(1),
            },
            Route::RemoveLangFromDeck {
                deck,
                lang: LangId(1),
            },
        ] {
            assert_eq!(parse_route(&route.path()), Some(route));
        }
    }
}
