//! Collection view: fetch on mount, confirm before delete, refetch after delete.

use crate::api::Entity;
use crate::error::ApiError;

use super::Command;

/// Loading state of a mounted list.
#[derive(Clone, Debug, PartialEq)]
pub enum ListState<E> {
    Loading,
    Loaded(Vec<E>),
    Errored(String),
}

#[derive(Clone, Debug)]
pub struct ListView<E: Entity> {
    pub state: ListState<E>,
    pub selected: usize,
    /// Entity awaiting the delete confirmation, and whether "Yes" is highlighted.
    pub pending_delete: Option<(E, bool)>,
    /// Refresh counter value this list was mounted with.
    pub refresh: u64,
}

impl<E: Entity> ListView<E> {
    /// Mount a fresh list. The returned command fetches the collection.
    pub fn mount(refresh: u64) -> (Self, Command<E>) {
        let list = Self {
            state: ListState::Loading,
            selected: 0,
            pending_delete: None,
            refresh,
        };
        (list, Command::Fetch)
    }

    pub fn items(&self) -> &[E] {
        match &self.state {
            ListState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn selected_item(&self) -> Option<&E> {
        self.items().get(self.selected)
    }

    pub fn on_fetched(&mut self, result: Result<Vec<E>, ApiError>) {
        match result {
            Ok(items) => {
                self.selected = self.selected.min(items.len().saturating_sub(1));
                self.state = ListState::Loaded(items);
            }
            Err(err) => {
                tracing::error!(error = %err, resource = E::COLLECTION, "fetch failed");
                self.state = ListState::Errored(format!("Failed to fetch {}s", E::NOUN));
            }
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items().len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// The selected entity, for the parent to edit. Leaves this list untouched.
    pub fn edit_selected(&self) -> Option<E> {
        self.selected_item().cloned()
    }

    /// Ask for confirmation before deleting the selected entity. Issues nothing.
    pub fn request_delete(&mut self) -> bool {
        match self.selected_item().cloned() {
            Some(item) => {
                self.pending_delete = Some((item, false));
                true
            }
            None => false,
        }
    }

    pub fn confirm_delete(&mut self) -> Option<Command<E>> {
        self.pending_delete
            .take()
            .map(|(item, _)| Command::Delete(item.id().clone()))
    }

    pub fn decline_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Toggle the highlighted button of the confirmation prompt.
    pub fn toggle_confirm_choice(&mut self) {
        if let Some((_, yes)) = self.pending_delete.as_mut() {
            *yes = !*yes;
        }
    }

    /// After a delete the list goes back to loading and refetches; nothing is removed locally.
    pub fn on_deleted(&mut self, result: Result<(), ApiError>) -> Option<Command<E>> {
        match result {
            Ok(()) => {
                self.state = ListState::Loading;
                Some(Command::Fetch)
            }
            Err(err) => {
                tracing::error!(error = %err, resource = E::COLLECTION, "delete failed");
                self.state = ListState::Errored(format!("Failed to delete {}", E::NOUN));
                None
            }
        }
    }
}
