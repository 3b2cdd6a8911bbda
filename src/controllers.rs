//! One-time binding of controllers to a freshly rendered page.

use crate::form::FormController;
use crate::model::WordRow;
use crate::toggle::{PanelToggle, SidebarToggle, SubmenuGroup, SubmenuPolicy};
use crate::view::{
    DeckFormElement, PageView, DECK_FORM_ID, MENU_TOGGLE_ID, SHOW_DECK_FORM_ID, SHOW_FORM_ID,
    SIDEBAR_ID, WORD_FORM_ID,
};
use std::fmt;

/// An expected element was absent when handlers were bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingElement {
    pub id: &'static str,
    pub needed_by: &'static str,
}

impl fmt::Display for MissingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} missing; {} not bound", self.id, self.needed_by)
    }
}

impl std::error::Error for MissingElement {}

/// Handlers bound to one page. Each is `None` when its elements were missing.
pub struct Controllers {
    pub sidebar: Option<SidebarToggle>,
    pub submenus: SubmenuGroup,
    pub word_form: Option<FormController>,
    pub deck_form: Option<PanelToggle<DeckFormElement>>,
    pub rows: Vec<WordRow>,
    missing: Vec<MissingElement>,
}

impl Controllers {
    /// Bind every handler the page supports. A missing element skips only the
    /// controller that needs it.
    pub fn bind(page: PageView, policy: SubmenuPolicy, sidebar_width: u16) -> Self {
        let mut missing = Vec::new();

        let sidebar = match (page.menu_toggle, page.sidebar) {
            (Some(toggle), Some(sidebar)) => {
                Some(SidebarToggle::new(toggle, sidebar, sidebar_width))
            }
            (toggle, _) => {
                let id = if toggle.is_none() {
                    MENU_TOGGLE_ID
                } else {
                    SIDEBAR_ID
                };
                missing.push(MissingElement {
                    id,
                    needed_by: "sidebar toggle",
                });
                None
            }
        };

        let word_form = match (page.show_form, page.word_form) {
            (Some(trigger), Some(form)) => Some(FormController::new(trigger, form)),
            (None, None) => None,
            (trigger, _) => {
                let id = if trigger.is_none() {
                    SHOW_FORM_ID
                } else {
                    WORD_FORM_ID
                };
                missing.push(MissingElement {
                    id,
                    needed_by: "word form",
                });
                None
            }
        };

        let deck_form = match (page.show_deck_form, page.deck_form) {
            (Some(trigger), Some(panel)) => Some(PanelToggle::new(trigger, panel)),
            (None, None) => None,
            (trigger, _) => {
                let id = if trigger.is_none() {
                    SHOW_DECK_FORM_ID
                } else {
                    DECK_FORM_ID
                };
                missing.push(MissingElement {
                    id,
                    needed_by: "deck form toggle",
                });
                None
            }
        };

        for element in &missing {
            tracing::warn!(target: "wordpanel::bind", id = element.id, needed_by = element.needed_by, "element missing");
        }

        Self {
            sidebar,
            submenus: SubmenuGroup::new(policy, page.submenus),
            word_form,
            deck_form,
            rows: page.rows,
            missing,
        }
    }

    pub fn missing(&self) -> &[MissingElement] {
        &self.missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LangId, Language};
    use crate::view::{Trigger, WordFormElement};

    fn languages() -> Vec<Language> {
        vec![Language {
            id: LangId(1),
            title: "English".into(),
        }]
    }

    #[test]
    fn words_screen_binds_form_and_layout() {
        let page = PageView::words_screen(24, &languages(), Vec::new());
        let controllers = Controllers::bind(page, SubmenuPolicy::Exclusive, 24);
        assert!(controllers.sidebar.is_some());
        assert!(controllers.word_form.is_some());
        assert!(controllers.deck_form.is_none());
        assert!(controllers.missing().is_empty());
        assert_eq!(controllers.submenus.submenus().len(), 2);
    }

    #[test]
    fn missing_form_skips_only_the_form() {
        let mut page = PageView::words_screen(24, &languages(), Vec::new());
        page.word_form = None;
        let mut controllers = Controllers::bind(page, SubmenuPolicy::Independent, 24);
        assert!(controllers.word_form.is_none());
        assert_eq!(
            controllers.missing(),
            [MissingElement {
                id: WORD_FORM_ID,
                needed_by: "word form",
            }]
        );

        let sidebar = controllers.sidebar.as_mut().expect("sidebar still bound");
        sidebar.toggle();
        assert!(sidebar.is_shown());
        controllers.submenus.activate(0);
        assert!(controllers.submenus.is_open(0));
    }

    #[test]
    fn missing_sidebar_and_trigger_are_reported() {
        let mut page = PageView::words_screen(24, &languages(), Vec::new());
        page.sidebar = None;
        page.show_form = None;
        let controllers = Controllers::bind(page, SubmenuPolicy::Exclusive, 24);
        let ids: Vec<&str> = controllers.missing().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![SIDEBAR_ID, SHOW_FORM_ID]);
        assert!(controllers.sidebar.is_none());
        assert!(controllers.word_form.is_none());
    }

    #[test]
    fn deck_panel_without_trigger_is_reported() {
        let mut page = PageView::decks_screen(24);
        page.show_deck_form = None;
        let controllers = Controllers::bind(page, SubmenuPolicy::Exclusive, 24);
        assert!(controllers.deck_form.is_none());
        assert_eq!(controllers.missing()[0].id, SHOW_DECK_FORM_ID);
        assert!(controllers.missing()[0].to_string().contains("deck form toggle"));
    }

    #[test]
    fn bare_page_reports_missing_layout() {
        let page = PageView {
            show_form: Some(Trigger::new("+")),
            word_form: Some(WordFormElement::for_languages(&languages())),
            ..PageView::default()
        };
        let controllers = Controllers::bind(page, SubmenuPolicy::Exclusive, 24);
        assert!(controllers.word_form.is_some());
        assert_eq!(controllers.missing()[0].id, MENU_TOGGLE_ID);
    }
}
