//! Page container: owns the edit target and the refresh counter, and wires
//! the form and the list of one resource together.
//!
use super::fields::Editable;
use super::form::{FormEvent, FormView};
use super::list::ListView;
use super::{Command, Outcome, Request, Response, Ticket};

/// Which half of the page receives keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PaneFocus {
    Form,
    List,
}

#[derive(Clone, Debug)]
pub struct Page<E: Editable> {
    /// Identity of this mount; responses for other mounts are dropped.
    pub mount: u64,
    pub edit_target: Option<E>,
    pub refresh: u64,
    pub form: FormView<E>,
    pub list: ListView<E>,
    pub focus: PaneFocus,
}

impl<E: Editable> Page<E> {
    /// Mount the page. The returned request is the list's initial fetch.
    pub fn mount(mount: u64) -> (Self, Request<E>) {
        let (list, fetch) = ListView::mount(0);
        let page = Self {
            mount,
            edit_target: None,
            refresh: 0,
            form: FormView::new(),
            list,
            focus: PaneFocus::List,
        };
        let req = page.request(fetch);
        (page, req)
    }

    pub fn request(&self, command: Command<E>) -> Request<E> {
        Request {
            ticket: Ticket { page: self.mount, refresh: self.refresh },
            command,
        }
    }

    /// The list asked to edit `entity`.
    pub fn on_edit(&mut self, entity: E) {
        self.form.set_target(Some(entity.clone()));
        self.edit_target = Some(entity);
        self.focus = PaneFocus::Form;
    }

    /// Edit the entity selected in the list, if any.
    pub fn edit_selected(&mut self) {
        if let Some(entity) = self.list.edit_selected() {
            self.on_edit(entity);
        }
    }

    /// Throw the list away and mount a new one. This is the only way lists are invalidated.
    pub fn remount_list(&mut self) -> Request<E> {
        self.refresh += 1;
        let (list, fetch) = ListView::mount(self.refresh);
        self.list = list;
        self.request(fetch)
    }

    pub fn on_form_event(&mut self, event: FormEvent) -> Option<Request<E>> {
        self.edit_target = None;
        self.form.set_target(None);
        match event {
            FormEvent::Saved => Some(self.remount_list()),
            FormEvent::Cancelled => None,
        }
    }

    pub fn submit(&mut self) -> Option<Request<E>> {
        self.form.submit().map(|cmd| self.request(cmd))
    }

    pub fn cancel_edit(&mut self) -> Option<Request<E>> {
        let event = self.form.cancel()?;
        self.on_form_event(event)
    }

    pub fn confirm_delete(&mut self) -> Option<Request<E>> {
        self.list.confirm_delete().map(|cmd| self.request(cmd))
    }

    /// Route a completed request back to the form or the list that issued it.
    pub fn apply(&mut self, response: Response<E>) -> Option<Request<E>> {
        let Response { ticket, outcome } = response;
        if ticket.page != self.mount {
            tracing::debug!(page = ticket.page, current = self.mount, "dropping response for unmounted page");
            return None;
        }
        match outcome {
            Outcome::Created(result) | Outcome::Updated(result) => {
                let event = self.form.on_saved(result)?;
                self.on_form_event(event)
            }
            Outcome::Fetched(result) => {
                if ticket.refresh == self.list.refresh {
                    self.list.on_fetched(result);
                }
                None
            }
            Outcome::Deleted(result) => {
                if ticket.refresh != self.list.refresh {
                    return None;
                }
                self.list.on_deleted(result).map(|cmd| self.request(cmd))
            }
        }
    }
}
