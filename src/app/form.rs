//! Draft editor shared by both resources.
//!
//! The form is in create mode until an edit target is supplied. Focus walks
//! the fields, then the submit button, then (edit mode only) the cancel button.
//!
use crate::error::ApiError;

use super::Command;
use super::fields::{Editable, FieldKind, FieldValue, FormMode};

/// Notification for the page after a submit completes or the edit is cancelled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    Saved,
    Cancelled,
}

/// What currently has focus inside the form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormFocus {
    Field(usize),
    Submit,
    Cancel,
}

#[derive(Clone, Debug)]
pub struct FormView<E: Editable> {
    pub values: Vec<FieldValue>,
    pub target: Option<E>,
    pub focus: FormFocus,
    pub loading: bool,
    pub error: Option<String>,
    /// Mode of the in-flight submit, so a late result reports the verb it was sent with.
    submitted_as: Option<FormMode>,
}

impl<E: Editable> Default for FormView<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Editable> FormView<E> {
    pub fn new() -> Self {
        Self {
            values: E::blank_values(),
            target: None,
            focus: FormFocus::Field(0),
            loading: false,
            error: None,
            submitted_as: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        if self.target.is_some() { FormMode::Edit } else { FormMode::Create }
    }

    /// Title shown above the fields.
    pub fn title(&self) -> String {
        match self.mode() {
            FormMode::Create => format!("Create New {}", capitalize(E::NOUN)),
            FormMode::Edit => format!("Edit {}", capitalize(E::NOUN)),
        }
    }

    pub fn submit_label(&self) -> String {
        if self.loading {
            return "Saving...".to_string();
        }
        match self.mode() {
            FormMode::Create => format!("Create {}", capitalize(E::NOUN)),
            FormMode::Edit => format!("Update {}", capitalize(E::NOUN)),
        }
    }

    /// Switch to edit mode pre-filled from `target`, or back to create mode on `None`.
    /// Going back to create mode leaves the current field text alone.
    pub fn set_target(&mut self, target: Option<E>) {
        if let Some(t) = &target {
            self.values = t.fill_values();
            self.focus = FormFocus::Field(0);
        }
        self.target = target;
        if self.focus == FormFocus::Cancel && self.target.is_none() {
            self.focus = FormFocus::Submit;
        }
    }

    pub fn focus_next(&mut self) {
        let n = E::FIELDS.len();
        self.focus = match self.focus {
            FormFocus::Field(i) if i + 1 < n => FormFocus::Field(i + 1),
            FormFocus::Field(_) => FormFocus::Submit,
            FormFocus::Submit if self.mode() == FormMode::Edit => FormFocus::Cancel,
            FormFocus::Submit | FormFocus::Cancel => FormFocus::Field(0),
        };
    }

    pub fn focus_prev(&mut self) {
        let n = E::FIELDS.len();
        self.focus = match self.focus {
            FormFocus::Field(0) if self.mode() == FormMode::Edit => FormFocus::Cancel,
            FormFocus::Field(0) => FormFocus::Submit,
            FormFocus::Field(i) => FormFocus::Field(i - 1),
            FormFocus::Submit => FormFocus::Field(n.saturating_sub(1)),
            FormFocus::Cancel => FormFocus::Submit,
        };
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        let FormFocus::Field(i) = self.focus else {
            return None;
        };
        match (E::FIELDS.get(i).map(|f| f.kind), self.values.get_mut(i)) {
            (Some(FieldKind::Text | FieldKind::Secret), Some(FieldValue::Text(s))) => Some(s),
            _ => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(s) = self.focused_text() {
            s.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(s) = self.focused_text() {
            s.pop();
        }
    }

    /// Flip the focused checkbox. Returns false when the focus is not on a toggle.
    pub fn toggle(&mut self) -> bool {
        if let FormFocus::Field(i) = self.focus {
            if let Some(FieldValue::Flag(b)) = self.values.get_mut(i) {
                *b = !*b;
                return true;
            }
        }
        false
    }

    /// Validate and build the create or update command.
    ///
    /// Returns `None` while a previous submit is in flight or when validation fails;
    /// in the latter case `error` says why.
    pub fn submit(&mut self) -> Option<Command<E>> {
        if self.loading {
            return None;
        }
        let mode = self.mode();
        for (spec, value) in E::FIELDS.iter().zip(&self.values) {
            if spec.is_required(mode) && spec.kind != FieldKind::Toggle && value.as_text().trim().is_empty() {
                self.error = Some(format!("{} is required", spec.label));
                return None;
            }
        }
        let draft = match E::draft_from(&self.values, mode) {
            Ok(d) => d,
            Err(msg) => {
                self.error = Some(msg);
                return None;
            }
        };
        self.loading = true;
        self.error = None;
        self.submitted_as = Some(mode);
        Some(match &self.target {
            Some(t) => Command::Update(t.id().clone(), draft),
            None => Command::Create(draft),
        })
    }

    /// Apply the result of a create or update.
    pub fn on_saved(&mut self, result: Result<E, ApiError>) -> Option<FormEvent> {
        self.loading = false;
        let mode = self.submitted_as.take().unwrap_or_else(|| self.mode());
        match result {
            Ok(_) => {
                self.reset();
                Some(FormEvent::Saved)
            }
            Err(err) => {
                tracing::error!(error = %err, resource = E::COLLECTION, verb = mode.verb(), "save failed");
                self.error = Some(format!("Failed to {} {}", mode.verb(), E::NOUN));
                None
            }
        }
    }

    /// Leave edit mode without touching the backend. No-op in create mode.
    pub fn cancel(&mut self) -> Option<FormEvent> {
        if self.mode() != FormMode::Edit {
            return None;
        }
        self.reset();
        Some(FormEvent::Cancelled)
    }

    fn reset(&mut self) {
        self.values = E::blank_values();
        self.focus = FormFocus::Field(0);
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
