//! The rendered view contract: typed element roles the controllers bind to.
//!
//! A `PageView` is what a screen renders before any handler runs. Every role is
//! optional because a screen may simply not carry it; binding takes the elements
//! out of the page and hands them to the controller that owns them from then on.

use crate::model::{LangId, Language, WordRow};

/// Stable identifiers of the element roles, used for missing-element reports.
pub const MENU_TOGGLE_ID: &str = "menu-toggle";
pub const SIDEBAR_ID: &str = "sidebar";
pub const SHOW_FORM_ID: &str = "showFormBtn";
pub const WORD_FORM_ID: &str = "addWordForm";
pub const SHOW_DECK_FORM_ID: &str = "showDeckForm";
pub const DECK_FORM_ID: &str = "newDeckForm";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
    InlineBlock,
}

impl Display {
    pub fn is_visible(self) -> bool {
        !matches!(self, Display::None)
    }
}

/// A clickable control that initiates a visibility or mode change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub label: String,
    pub display: Display,
    pub active: bool,
}

impl Trigger {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            display: Display::InlineBlock,
            active: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarElement {
    pub active: bool,
    /// Horizontal offset in columns; 0 pins the sidebar in view.
    pub left: i16,
}

/// A navigation entry inside a submenu panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLink {
    pub label: String,
    pub href: String,
}

impl MenuLink {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// A submenu trigger paired with its sibling panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmenuElement {
    pub trigger: Trigger,
    pub panel: Display,
    pub links: Vec<MenuLink>,
}

impl SubmenuElement {
    pub fn new(label: impl Into<String>, links: Vec<MenuLink>) -> Self {
        Self {
            trigger: Trigger::new(label),
            panel: Display::None,
            links,
        }
    }

    pub fn is_open(&self) -> bool {
        self.panel.is_visible()
    }
}

/// One labeled input holding the text for a single language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationField {
    pub lang: LangId,
    pub label: String,
    pub value: String,
    /// Visual invalid marking (bordered) set by submit validation.
    pub invalid: bool,
}

impl TranslationField {
    pub fn new(lang: LangId, label: impl Into<String>) -> Self {
        Self {
            lang,
            label: label.into(),
            value: String::new(),
            invalid: false,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// The add/edit entry form of the words screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFormElement {
    pub display: Display,
    pub title: String,
    /// Hidden identifier field; empty for create.
    pub word_id: String,
    pub fields: Vec<TranslationField>,
    /// Validation message rendered immediately before the submit control.
    pub error: Option<String>,
    pub submit_label: String,
    pub cancel_label: String,
}

impl WordFormElement {
    pub fn for_languages(languages: &[Language]) -> Self {
        Self {
            display: Display::None,
            title: String::new(),
            word_id: String::new(),
            fields: languages
                .iter()
                .map(|lang| TranslationField::new(lang.id, lang.title.clone()))
                .collect(),
            error: None,
            submit_label: "Save".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }

    pub fn field(&self, lang: LangId) -> Option<&TranslationField> {
        self.fields.iter().find(|field| field.lang == lang)
    }

    pub fn field_mut(&mut self, lang: LangId) -> Option<&mut TranslationField> {
        self.fields.iter_mut().find(|field| field.lang == lang)
    }
}

/// The collapsible "new deck" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckFormElement {
    pub display: Display,
    pub title_input: String,
}

impl Default for DeckFormElement {
    fn default() -> Self {
        Self {
            display: Display::None,
            title_input: String::new(),
        }
    }
}

/// Everything a screen rendered, before handlers are bound.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub menu_toggle: Option<Trigger>,
    pub sidebar: Option<SidebarElement>,
    pub submenus: Vec<SubmenuElement>,
    pub show_form: Option<Trigger>,
    pub word_form: Option<WordFormElement>,
    pub rows: Vec<WordRow>,
    pub show_deck_form: Option<Trigger>,
    pub deck_form: Option<DeckFormElement>,
}

impl PageView {
    /// Layout chrome shared by every screen: menu toggle, sidebar, submenus.
    pub fn with_layout(sidebar_width: u16) -> Self {
        Self {
            menu_toggle: Some(Trigger::new("☰ Menu")),
            sidebar: Some(SidebarElement {
                active: false,
                left: hidden_offset(sidebar_width),
            }),
            submenus: vec![
                SubmenuElement::new("Vocabulary", vec![MenuLink::new("My Words", "/mywords")]),
                SubmenuElement::new("Study", vec![MenuLink::new("My Decks", "/mydecks")]),
            ],
            ..Self::default()
        }
    }

    /// The word-management screen: table of rows plus the add/edit form.
    pub fn words_screen(sidebar_width: u16, languages: &[Language], rows: Vec<WordRow>) -> Self {
        Self {
            show_form: Some(Trigger::new("+ Add Word")),
            word_form: Some(WordFormElement::for_languages(languages)),
            rows,
            ..Self::with_layout(sidebar_width)
        }
    }

    /// The decks screen: collapsible new-deck form.
    pub fn decks_screen(sidebar_width: u16) -> Self {
        Self {
            show_deck_form: Some(Trigger::new("+ New Deck")),
            deck_form: Some(DeckFormElement::default()),
            ..Self::with_layout(sidebar_width)
        }
    }
}

pub(crate) fn hidden_offset(width: u16) -> i16 {
    -(i16::try_from(width).unwrap_or(i16::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_screen_has_one_field_per_language() {
        let languages = vec![
            Language {
                id: LangId(1),
                title: "English".into(),
            },
            Language {
                id: LangId(2),
                title: "Deutsch".into(),
            },
        ];
        let page = PageView::words_screen(24, &languages, Vec::new());
        let form = page.word_form.expect("form rendered");
        assert_eq!(form.fields.len(), 2);
        assert_eq!(form.field(LangId(2)).map(|f| f.label.as_str()), Some("Deutsch"));
        assert!(!form.display.is_visible());
        assert!(page.deck_form.is_none());
    }

    #[test]
    fn layout_starts_with_sidebar_out_of_view() {
        let page = PageView::with_layout(30);
        let sidebar = page.sidebar.expect("sidebar");
        assert!(!sidebar.active);
        assert_eq!(sidebar.left, -30);
        assert!(page.submenus.iter().all(|s| !s.is_open()));
    }

    #[test]
    fn blank_field_ignores_whitespace() {
        let mut field = TranslationField::new(LangId(1), "English");
        assert!(field.is_blank());
        field.value = "  \t".into();
        assert!(field.is_blank());
        field.value = " x ".into();
        assert!(!field.is_blank());
    }
}
