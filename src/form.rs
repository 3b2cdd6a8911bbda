//! Add/edit entry form controller for the word-management screen.
//!
//! The controller owns the show-form trigger and the form element it was bound
//! to. Every handler runs to completion synchronously and leaves the form in a
//! state that is fully re-derivable from its fields.

use crate::confirm::{delete_path, Confirm, Navigator};
use crate::model::{FormSubmission, LangId, Mode, WordId};
use crate::source::WordSource;
use crate::view::{Display, Trigger, WordFormElement};
use std::collections::BTreeMap;

pub const ADD_TITLE: &str = "Add New Word";
pub const EDIT_TITLE: &str = "Edit Word";
pub const EMPTY_FORM_MESSAGE: &str = "Please enter at least one translation";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this word?";
pub const WORDS_RESOURCE: &str = "mywords";

/// Submit event handed to `validate_on_submit`; mirrors a cancellable default action.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub struct FormController {
    trigger: Trigger,
    form: WordFormElement,
    mode: Mode,
}

impl FormController {
    /// Bind the controller to its two required elements. State starts as {Add, hidden}.
    pub fn new(trigger: Trigger, form: WordFormElement) -> Self {
        let mut controller = Self {
            trigger,
            form,
            mode: Mode::Add,
        };
        controller.reset();
        controller
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn form(&self) -> &WordFormElement {
        &self.form
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub fn is_visible(&self) -> bool {
        self.form.display.is_visible()
    }

    /// Show the empty form for a new word. Does nothing while the form is
    /// already open in Add mode, so typed values survive a repeated activation.
    pub fn enter_add_mode(&mut self) {
        if self.mode == Mode::Add && self.is_visible() {
            return;
        }
        self.reset();
        self.set_visible(true);
        tracing::debug!(target: "wordpanel::form", "entered add mode");
    }

    /// Hide the form and return it to a pristine Add state, whatever mode was active.
    pub fn cancel(&mut self) {
        let exiting = self.mode;
        self.reset();
        self.set_visible(false);
        tracing::debug!(target: "wordpanel::form", exiting = exiting.label(), "form cancelled");
    }

    /// Seed the form from one row: clear every field, then fill only the languages
    /// present in `translations`. Languages with no field are ignored.
    pub fn enter_edit_mode<'a, I>(&mut self, row: WordId, translations: I)
    where
        I: IntoIterator<Item = (LangId, &'a str)>,
    {
        self.mode = Mode::Edit;
        self.form.title = EDIT_TITLE.to_string();
        self.form.word_id = row.to_string();
        self.clear_fields();
        self.clear_validation();
        let mut seeded = 0usize;
        for (lang, text) in translations {
            if let Some(field) = self.form.field_mut(lang) {
                field.value = text.to_string();
                seeded += 1;
            }
        }
        self.set_visible(true);
        tracing::debug!(target: "wordpanel::form", word_id = row.0, seeded, "entered edit mode");
    }

    /// Fetch the row's canonical translations from `source` and enter edit mode.
    /// Returns false (and leaves the form untouched) when the row is unknown.
    pub fn enter_edit_mode_from(&mut self, source: &dyn WordSource, row: WordId) -> bool {
        let Some(word) = source.row(row) else {
            tracing::warn!(target: "wordpanel::form", word_id = row.0, "edit requested for unknown word");
            return false;
        };
        self.enter_edit_mode(
            row,
            word.translations
                .iter()
                .map(|(lang, text)| (*lang, text.as_str())),
        );
        true
    }

    /// Ask before deleting; navigate to the delete endpoint only on a yes.
    pub fn confirm_delete(
        &self,
        row: WordId,
        confirm: &mut dyn Confirm,
        navigator: &mut dyn Navigator,
    ) -> bool {
        if !confirm.confirm(DELETE_PROMPT) {
            tracing::debug!(target: "wordpanel::form", word_id = row.0, "delete declined");
            return false;
        }
        let path = delete_path(WORDS_RESOURCE, &row.to_string());
        tracing::info!(target: "wordpanel::form", word_id = row.0, path = %path, "delete confirmed");
        navigator.navigate(&path);
        true
    }

    /// Gate submission on at least one non-blank translation.
    /// Returns true when the submission may proceed.
    pub fn validate_on_submit(&mut self, event: &mut SubmitEvent) -> bool {
        let all_blank = self.form.fields.iter().all(|field| field.is_blank());
        if all_blank {
            event.prevent_default();
            self.form.error = Some(EMPTY_FORM_MESSAGE.to_string());
            for field in &mut self.form.fields {
                field.invalid = true;
            }
            tracing::debug!(target: "wordpanel::form", "submission blocked: no translations");
            return false;
        }
        self.clear_validation();
        true
    }

    /// What the default submission carries: the identifier field and every field value.
    pub fn submission(&self) -> FormSubmission {
        let translations: BTreeMap<LangId, String> = self
            .form
            .fields
            .iter()
            .map(|field| (field.lang, field.value.clone()))
            .collect();
        FormSubmission {
            word_id: self.form.word_id.parse().ok(),
            translations,
        }
    }

    /// Replace the text of one field, as typing into it would.
    pub fn set_field_value(&mut self, lang: LangId, value: impl Into<String>) -> bool {
        match self.form.field_mut(lang) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn field_value_mut(&mut self, lang: LangId) -> Option<&mut String> {
        self.form.field_mut(lang).map(|field| &mut field.value)
    }

    fn reset(&mut self) {
        self.mode = Mode::Add;
        self.form.title = ADD_TITLE.to_string();
        self.form.word_id.clear();
        self.clear_fields();
        self.clear_validation();
    }

    fn clear_fields(&mut self) {
        for field in &mut self.form.fields {
            field.value.clear();
        }
    }

    fn clear_validation(&mut self) {
        self.form.error = None;
        for field in &mut self.form.fields {
            field.invalid = false;
        }
    }

    fn set_visible(&mut self, visible: bool) {
        if visible {
            self.form.display = Display::Block;
            self.trigger.display = Display::None;
        } else {
            self.form.display = Display::None;
            self.trigger.display = Display::InlineBlock;
        }
    }
}
