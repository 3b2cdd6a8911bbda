//! Application state shared between the event loop and the renderer.

use crate::config::{AppConfig, StartScreen};
use crate::confirm::{Confirm, PendingNavigation};
use crate::controllers::Controllers;
use crate::form::{FormController, SubmitEvent};
use crate::model::{Deck, DeckId, Language, WordId, WordRow};
use crate::route::{parse_route, Route};
use crate::source::{DeckView, Saved, StoreError, WordSource, WordStore};
use crate::telemetry::content_logging_enabled;
use crate::toggle::{PanelToggle, SidebarToggle, SubmenuGroup};
use crate::view::{DeckFormElement, PageView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Words,
    Decks,
    Deck(DeckId),
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Words => "My Words",
            Screen::Decks => "My Decks",
            Screen::Deck(_) => "View Deck",
        }
    }
}

/// Column of the deck screen that has the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeckPane {
    Languages,
    #[default]
    Words,
    Available,
}

impl DeckPane {
    pub fn next(self) -> Self {
        match self {
            DeckPane::Languages => DeckPane::Words,
            DeckPane::Words => DeckPane::Available,
            DeckPane::Available => DeckPane::Languages,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DeckPane::Languages => DeckPane::Available,
            DeckPane::Words => DeckPane::Languages,
            DeckPane::Available => DeckPane::Words,
        }
    }
}

impl From<StartScreen> for Screen {
    fn from(value: StartScreen) -> Self {
        match value {
            StartScreen::Words => Screen::Words,
            StartScreen::Decks => Screen::Decks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

/// One selectable line of the sidebar: a submenu trigger or a link inside an open panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEntry {
    Trigger(usize),
    Link { submenu: usize, link: usize },
}

pub struct App {
    config: AppConfig,
    store: WordStore,
    screen: Screen,
    controllers: Controllers,
    focus: Focus,
    sidebar_selected: usize,
    row_selected: usize,
    field_selected: usize,
    deck_selected: usize,
    deck_pane: DeckPane,
    deck_item_selected: usize,
    status: String,
    redraw: bool,
}

impl App {
    /// Build the app and bind handlers for the configured start screen.
    pub fn new(config: AppConfig, store: WordStore) -> Self {
        let screen = Screen::from(config.start_screen);
        let controllers = bind_screen(&config, &store, screen);
        Self {
            config,
            store,
            screen,
            controllers,
            focus: Focus::Content,
            sidebar_selected: 0,
            row_selected: 0,
            field_selected: 0,
            deck_selected: 0,
            deck_pane: DeckPane::default(),
            deck_item_selected: 0,
            status: "Ready. Ctrl+B menu · n new · e edit · d delete · q quit".into(),
            redraw: true,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn status_text(&self) -> &str {
        &self.status
    }

    pub fn languages(&self) -> &[Language] {
        self.store.languages()
    }

    pub fn decks(&self) -> &[Deck] {
        self.store.decks()
    }

    pub fn rows(&self) -> &[WordRow] {
        &self.controllers.rows
    }

    pub fn row_selected(&self) -> usize {
        self.row_selected
    }

    pub fn field_selected(&self) -> usize {
        self.field_selected
    }

    pub fn sidebar_selected(&self) -> usize {
        self.sidebar_selected
    }

    pub fn deck_selected(&self) -> usize {
        self.deck_selected
    }

    pub fn deck_pane(&self) -> DeckPane {
        self.deck_pane
    }

    pub fn deck_item_selected(&self) -> usize {
        self.deck_item_selected
    }

    /// The open deck, resolved against the store; `None` off the deck screen.
    pub fn deck_view(&self) -> Option<DeckView<'_>> {
        match self.screen {
            Screen::Deck(id) => self.store.deck_view(id),
            _ => None,
        }
    }

    pub fn sidebar(&self) -> Option<&SidebarToggle> {
        self.controllers.sidebar.as_ref()
    }

    pub fn submenus(&self) -> &SubmenuGroup {
        &self.controllers.submenus
    }

    pub fn word_form(&self) -> Option<&FormController> {
        self.controllers.word_form.as_ref()
    }

    pub fn deck_form(&self) -> Option<&PanelToggle<DeckFormElement>> {
        self.controllers.deck_form.as_ref()
    }

    pub fn word_form_open(&self) -> bool {
        self.word_form().is_some_and(FormController::is_visible)
    }

    pub fn deck_form_open(&self) -> bool {
        self.deck_form().is_some_and(PanelToggle::is_open)
    }

    pub fn sidebar_shown(&self) -> bool {
        self.sidebar().is_some_and(SidebarToggle::is_shown)
    }

    /// Whether the UI needs to be drawn again; clears the request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    fn request_redraw(&mut self) {
        self.redraw = true;
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.request_redraw();
    }

    /// Full navigation: resolve the path and rebuild the target screen from scratch.
    pub fn navigate(&mut self, path: &str) {
        let Some(route) = parse_route(path) else {
            tracing::warn!(target: "wordpanel::nav", path, "no route");
            self.set_status(format!("Nothing is served at {path}."));
            return;
        };
        tracing::info!(target: "wordpanel::nav", path, "navigate");
        match route {
            Route::Words => self.load_screen(Screen::Words),
            Route::Decks => self.load_screen(Screen::Decks),
            Route::Deck(id) => self.open_deck(id),
            Route::DeleteWord(id) => {
                let outcome = self.store.delete(id);
                if outcome.is_ok() {
                    tracing::info!(target: "wordpanel::store", word_id = %id, "word deleted");
                }
                self.load_screen(Screen::Words);
                self.report(outcome.map(|()| format!("Deleted word {id}.")));
            }
            Route::AddWordToDeck { deck, word } => {
                let outcome = self.store.add_word_to_deck(deck, word).map(|added| {
                    if added {
                        format!("Added word {word} to the deck.")
                    } else {
                        format!("Word {word} is already in the deck.")
                    }
                });
                self.reload_deck(deck, outcome);
            }
            Route::RemoveWordFromDeck { deck, word } => {
                let outcome = self.store.remove_word_from_deck(deck, word).map(|removed| {
                    if removed {
                        format!("Removed word {word} from the deck.")
                    } else {
                        format!("Word {word} is not in the deck.")
                    }
                });
                self.reload_deck(deck, outcome);
            }
            Route::AddLangToDeck { deck, lang } => {
                let outcome = self
                    .store
                    .add_lang_to_deck(deck, lang)
                    .map(|_| format!("Language {lang} is on for the deck."));
                self.reload_deck(deck, outcome);
            }
            Route::RemoveLangFromDeck { deck, lang } => {
                let outcome = self
                    .store
                    .remove_lang_from_deck(deck, lang)
                    .map(|_| format!("Language {lang} is off for the deck."));
                self.reload_deck(deck, outcome);
            }
        }
    }

    fn load_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.controllers = bind_screen(&self.config, &self.store, screen);
        self.focus = Focus::Content;
        self.sidebar_selected = 0;
        self.row_selected = self
            .row_selected
            .min(self.controllers.rows.len().saturating_sub(1));
        self.field_selected = 0;
        self.deck_selected = self
            .deck_selected
            .min(self.store.decks().len().saturating_sub(1));
        self.deck_pane = DeckPane::default();
        self.deck_item_selected = 0;
        self.status = screen.title().to_string();
        self.request_redraw();
    }

    fn open_deck(&mut self, id: DeckId) {
        if self.store.deck(id).is_some() {
            self.load_screen(Screen::Deck(id));
        } else {
            self.load_screen(Screen::Decks);
            self.report(Err(StoreError::UnknownDeck(id)));
        }
    }

    /// Rebuild the deck screen after a membership change, keeping the pane.
    fn reload_deck(&mut self, id: DeckId, outcome: Result<String, StoreError>) {
        if self.store.deck(id).is_none() {
            self.open_deck(id);
            return;
        }
        let pane = self.deck_pane;
        let item = self.deck_item_selected;
        self.load_screen(Screen::Deck(id));
        self.deck_pane = pane;
        self.deck_item_selected = item.min(self.deck_item_count().saturating_sub(1));
        self.report(outcome);
    }

    fn report(&mut self, outcome: Result<String, StoreError>) {
        match outcome {
            Ok(message) => self.set_status(message),
            Err(err) => {
                tracing::warn!(target: "wordpanel::store", error = %err, "store rejected change");
                self.set_status(err.to_string());
            }
        }
    }

    // --- layout ------------------------------------------------------------

    pub fn toggle_menu(&mut self) {
        let Some(sidebar) = self.controllers.sidebar.as_mut() else {
            return;
        };
        sidebar.toggle();
        self.focus = if sidebar.is_shown() {
            Focus::Sidebar
        } else {
            Focus::Content
        };
        self.request_redraw();
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Content if self.sidebar_shown() => Focus::Sidebar,
            _ => Focus::Content,
        };
        self.request_redraw();
    }

    pub fn sidebar_entries(&self) -> Vec<SidebarEntry> {
        let mut entries = Vec::new();
        for (index, submenu) in self.controllers.submenus.submenus().iter().enumerate() {
            entries.push(SidebarEntry::Trigger(index));
            if submenu.is_open() {
                entries.extend((0..submenu.links.len()).map(|link| SidebarEntry::Link {
                    submenu: index,
                    link,
                }));
            }
        }
        entries
    }

    pub fn sidebar_up(&mut self) {
        let len = self.sidebar_entries().len();
        if len == 0 {
            return;
        }
        self.sidebar_selected = if self.sidebar_selected == 0 {
            len - 1
        } else {
            self.sidebar_selected.min(len) - 1
        };
        self.request_redraw();
    }

    pub fn sidebar_down(&mut self) {
        let len = self.sidebar_entries().len();
        if len == 0 {
            return;
        }
        self.sidebar_selected = (self.sidebar_selected + 1) % len;
        self.request_redraw();
    }

    /// Activate the selected sidebar line: toggle a submenu or follow a link.
    pub fn activate_sidebar_entry(&mut self) {
        let entries = self.sidebar_entries();
        let Some(entry) = entries.get(self.sidebar_selected).copied() else {
            return;
        };
        match entry {
            SidebarEntry::Trigger(index) => {
                self.controllers.submenus.activate(index);
                let entries = self.sidebar_entries();
                self.sidebar_selected = entries
                    .iter()
                    .position(|candidate| *candidate == SidebarEntry::Trigger(index))
                    .unwrap_or(0);
                self.request_redraw();
            }
            SidebarEntry::Link { submenu, link } => {
                let href = self
                    .controllers
                    .submenus
                    .submenus()
                    .get(submenu)
                    .and_then(|s| s.links.get(link))
                    .map(|l| l.href.clone());
                if let Some(href) = href {
                    self.navigate(&href);
                }
            }
        }
    }

    // --- words screen ------------------------------------------------------

    pub fn select_next_row(&mut self) {
        let len = self.controllers.rows.len();
        if len > 0 {
            self.row_selected = (self.row_selected + 1).min(len - 1);
            self.request_redraw();
        }
    }

    pub fn select_prev_row(&mut self) {
        self.row_selected = self.row_selected.saturating_sub(1);
        self.request_redraw();
    }

    fn selected_row_id(&self) -> Option<WordId> {
        self.controllers.rows.get(self.row_selected).map(|row| row.id)
    }

    pub fn show_word_form(&mut self) {
        let Some(form) = self.controllers.word_form.as_mut() else {
            return;
        };
        form.enter_add_mode();
        self.field_selected = 0;
        self.request_redraw();
    }

    pub fn edit_selected(&mut self) {
        let Some(id) = self.selected_row_id() else {
            return;
        };
        let Some(form) = self.controllers.word_form.as_mut() else {
            return;
        };
        if form.enter_edit_mode_from(&self.store, id) {
            self.field_selected = 0;
            self.set_status(format!("Editing word {id}."));
        } else {
            self.set_status(format!("Word {id} no longer exists."));
        }
    }

    /// Confirm, then issue the delete navigation for the selected row.
    pub fn delete_selected(&mut self, confirm: &mut dyn Confirm) {
        let Some(id) = self.selected_row_id() else {
            return;
        };
        let Some(form) = self.controllers.word_form.as_ref() else {
            return;
        };
        let mut navigation = PendingNavigation::new();
        if !form.confirm_delete(id, confirm, &mut navigation) {
            self.set_status("Delete cancelled.");
            return;
        }
        for path in navigation.take() {
            self.navigate(&path);
        }
    }

    pub fn cancel_word_form(&mut self) {
        if let Some(form) = self.controllers.word_form.as_mut() {
            form.cancel();
            self.field_selected = 0;
            self.request_redraw();
        }
    }

    pub fn next_field(&mut self) {
        let len = self.field_count();
        if len > 0 {
            self.field_selected = (self.field_selected + 1) % len;
            self.request_redraw();
        }
    }

    pub fn prev_field(&mut self) {
        let len = self.field_count();
        if len > 0 {
            self.field_selected = (self.field_selected + len - 1) % len;
            self.request_redraw();
        }
    }

    fn field_count(&self) -> usize {
        self.word_form().map_or(0, |form| form.form().fields.len())
    }

    fn selected_field_value(&mut self) -> Option<&mut String> {
        let index = self.field_selected;
        let form = self.controllers.word_form.as_mut()?;
        let lang = form.form().fields.get(index)?.lang;
        form.field_value_mut(lang)
    }

    pub fn push_field_char(&mut self, ch: char) {
        if let Some(value) = self.selected_field_value() {
            value.push(ch);
            self.request_redraw();
        }
    }

    pub fn backspace_field(&mut self) {
        if let Some(value) = self.selected_field_value() {
            value.pop();
            self.request_redraw();
        }
    }

    /// Validate, then perform the form's default submission against the store.
    pub fn submit_word_form(&mut self) {
        let Some(form) = self.controllers.word_form.as_mut() else {
            return;
        };
        let mut event = SubmitEvent::new();
        if !form.validate_on_submit(&mut event) || event.default_prevented() {
            self.request_redraw();
            return;
        }
        let submission = form.submission();
        if content_logging_enabled() {
            tracing::debug!(target: "wordpanel::store", translations = ?submission.translations, "submission content");
        }
        match self.store.apply(&submission) {
            Ok(saved) => {
                self.load_screen(Screen::Words);
                let (id, verb, outcome) = match saved {
                    Saved::Created(id) => (id, "Added", "created"),
                    Saved::Updated(id) => (id, "Updated", "updated"),
                };
                tracing::info!(
                    target: "wordpanel::store",
                    word_id = %id,
                    outcome,
                    filled = submission.translations.values().filter(|t| !t.trim().is_empty()).count(),
                    "word saved"
                );
                if let Some(position) = self.controllers.rows.iter().position(|r| r.id == id) {
                    self.row_selected = position;
                }
                self.set_status(format!("{verb} word {id}."));
            }
            Err(err) => self.report(Err(err)),
        }
    }

    // --- decks screen ------------------------------------------------------

    pub fn toggle_deck_form(&mut self) {
        if let Some(panel) = self.controllers.deck_form.as_mut() {
            panel.toggle();
            self.request_redraw();
        }
    }

    pub fn push_deck_char(&mut self, ch: char) {
        if let Some(panel) = self.controllers.deck_form.as_mut() {
            panel.panel_mut().title_input.push(ch);
            self.request_redraw();
        }
    }

    pub fn backspace_deck(&mut self) {
        if let Some(panel) = self.controllers.deck_form.as_mut() {
            panel.panel_mut().title_input.pop();
            self.request_redraw();
        }
    }

    pub fn submit_deck_form(&mut self) {
        let Some(panel) = self.controllers.deck_form.as_ref() else {
            return;
        };
        let title = panel.panel().title_input.clone();
        match self.store.add_deck(&title) {
            Ok(id) => {
                if content_logging_enabled() {
                    tracing::info!(target: "wordpanel::store", deck_id = %id, title = %title.trim(), "deck created");
                } else {
                    tracing::info!(target: "wordpanel::store", deck_id = %id, "deck created");
                }
                self.deck_selected = self.store.decks().len().saturating_sub(1);
                self.load_screen(Screen::Decks);
                self.set_status(format!("Created deck {id}."));
            }
            Err(err) => self.report(Err(err)),
        }
    }

    pub fn select_next_deck(&mut self) {
        let len = self.store.decks().len();
        if len > 0 {
            self.deck_selected = (self.deck_selected + 1).min(len - 1);
            self.request_redraw();
        }
    }

    pub fn select_prev_deck(&mut self) {
        self.deck_selected = self.deck_selected.saturating_sub(1);
        self.request_redraw();
    }

    pub fn open_selected_deck(&mut self) {
        if let Some(id) = self.store.decks().get(self.deck_selected).map(|deck| deck.id) {
            self.navigate(&Route::Deck(id).path());
        }
    }

    // --- deck screen -------------------------------------------------------

    fn deck_item_count(&self) -> usize {
        self.deck_view().map_or(0, |view| match self.deck_pane {
            DeckPane::Languages => view.languages.len(),
            DeckPane::Words => view.words.len(),
            DeckPane::Available => view.available.len(),
        })
    }

    pub fn next_deck_pane(&mut self) {
        self.deck_pane = self.deck_pane.next();
        self.deck_item_selected = 0;
        self.request_redraw();
    }

    pub fn prev_deck_pane(&mut self) {
        self.deck_pane = self.deck_pane.prev();
        self.deck_item_selected = 0;
        self.request_redraw();
    }

    pub fn select_next_deck_item(&mut self) {
        let len = self.deck_item_count();
        if len > 0 {
            self.deck_item_selected = (self.deck_item_selected + 1).min(len - 1);
            self.request_redraw();
        }
    }

    pub fn select_prev_deck_item(&mut self) {
        self.deck_item_selected = self.deck_item_selected.saturating_sub(1);
        self.request_redraw();
    }

    /// Toggle membership of the selected item through its deck route.
    pub fn activate_deck_item(&mut self) {
        let Some(view) = self.deck_view() else {
            return;
        };
        let deck = view.deck.id;
        let index = self.deck_item_selected;
        let route = match self.deck_pane {
            DeckPane::Languages => view.languages.get(index).map(|(lang, member)| {
                if *member {
                    Route::RemoveLangFromDeck { deck, lang: lang.id }
                } else {
                    Route::AddLangToDeck { deck, lang: lang.id }
                }
            }),
            DeckPane::Words => view
                .words
                .get(index)
                .map(|row| Route::RemoveWordFromDeck { deck, word: row.id }),
            DeckPane::Available => view
                .available
                .get(index)
                .map(|row| Route::AddWordToDeck { deck, word: row.id }),
        };
        if let Some(route) = route {
            self.navigate(&route.path());
        }
    }

    pub fn leave_deck(&mut self) {
        self.navigate(&Route::Decks.path());
    }
}

fn bind_screen(config: &AppConfig, store: &WordStore, screen: Screen) -> Controllers {
    let page = match screen {
        Screen::Words => {
            PageView::words_screen(config.sidebar_width, store.languages(), store.rows())
        }
        Screen::Decks => PageView::decks_screen(config.sidebar_width),
        Screen::Deck(_) => PageView::with_layout(config.sidebar_width),
    };
    Controllers::bind(page, config.submenu_policy, config.sidebar_width)
}
