//! # Session
//!
//! Holds the active [`DocumentState`] and the view rendered from it, and is
//! the only place where the two are changed together.
//!
//! ## Render Generations
//!
//! Every render takes a [`RenderTicket`] first. Committing a view checks the
//! ticket against the session: if another render began later, or a different
//! document (or revision) was loaded meanwhile, the view is dropped. A slow
//! render can therefore never overwrite a newer one.
//!
//! ## Toggles
//!
//! Toggling changes the view's states and writes them into the source through
//! [`reconcile`]. The result is a new revision of the document; the view is
//! kept (its structure did not change) and marked as describing that revision.
//! Persisting the new source is up to the caller.

use crate::aggregate::Summary;
use crate::checklist::{reconcile, SyncOutcome};
use crate::error::{CheckpadError, Result};
use crate::model::{CheckboxState, DocumentState, ItemId};
use crate::source::DocumentSource;
use crate::view::{render, ViewModel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTicket {
    generation: u64,
    name: String,
    revision: u64,
}

impl RenderTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct Session {
    document: Option<DocumentState>,
    view: Option<ViewModel>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the active document. Any existing view is discarded.
    pub fn load(&mut self, document: DocumentState) {
        log::debug!("loading {} (revision {})", document.name, document.revision);
        self.document = Some(document);
        self.view = None;
    }

    pub fn document(&self) -> Option<&DocumentState> {
        self.document.as_ref()
    }

    pub fn view(&self) -> Option<&ViewModel> {
        self.view.as_ref()
    }

    fn active_document(&self) -> Result<&DocumentState> {
        self.document
            .as_ref()
            .ok_or_else(|| CheckpadError::Api("No document loaded".to_string()))
    }

    fn active_view(&self) -> Result<&ViewModel> {
        self.view
            .as_ref()
            .ok_or_else(|| CheckpadError::Api("Document has not been rendered".to_string()))
    }

    pub fn begin_render(&mut self) -> Result<RenderTicket> {
        let document = self.active_document()?;
        let ticket = RenderTicket {
            generation: self.generation + 1,
            name: document.name.clone(),
            revision: document.revision,
        };
        self.generation = ticket.generation;
        log::debug!(
            "render generation {} for {} (revision {})",
            ticket.generation,
            ticket.name,
            ticket.revision
        );
        Ok(ticket)
    }

    /// Installs `view` if `ticket` is still current. Returns whether it was.
    pub fn commit(&mut self, ticket: RenderTicket, view: ViewModel) -> bool {
        let current = self.document.as_ref().is_some_and(|doc| {
            doc.name == ticket.name && doc.revision == ticket.revision
        });
        if ticket.generation != self.generation || !current {
            log::debug!(
                "discarding render generation {} (latest {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.view = Some(view);
        true
    }

    /// Renders the active document through `docs` and installs the result.
    pub fn render_with<S: DocumentSource + ?Sized>(&mut self, docs: &S) -> Result<&ViewModel> {
        let ticket = self.begin_render()?;
        let view = render(self.active_document()?, docs);
        if !self.commit(ticket, view) {
            return Err(CheckpadError::Api("Render was superseded".to_string()));
        }
        self.active_view()
    }

    /// Applies UI states to the view and writes them into the source.
    pub fn set_states(&mut self, states: &[CheckboxState]) -> Result<SyncOutcome> {
        let document = self.active_document()?;
        let view = self.active_view()?;
        let outcome = reconcile(document, view, states)?;

        let revision = outcome.document.revision;
        if let Some(view) = self.view.as_mut() {
            for state in states {
                if let Some(index) = view.items.iter().position(|item| item.id == Some(state.id)) {
                    view.set_checked(index, state.checked);
                }
            }
            view.revision = revision;
        }
        self.document = Some(outcome.document.clone());
        Ok(outcome)
    }

    /// Sets every listed item to `checked`.
    pub fn set_checked(&mut self, ids: &[ItemId], checked: bool) -> Result<SyncOutcome> {
        let states: Vec<CheckboxState> = ids
            .iter()
            .map(|&id| CheckboxState::new(id, checked))
            .collect();
        self.set_states(&states)
    }

    /// Flips every listed item.
    pub fn toggle(&mut self, ids: &[ItemId]) -> Result<SyncOutcome> {
        let view = self.active_view()?;
        let states: Vec<CheckboxState> = ids
            .iter()
            .map(|&id| {
                let checked = view.item(id).map(|item| !item.checked).unwrap_or(true);
                CheckboxState::new(id, checked)
            })
            .collect();
        self.set_states(&states)
    }

    /// Checks everything, or unchecks everything when all items are checked.
    pub fn toggle_all(&mut self) -> Result<SyncOutcome> {
        let view = self.active_view()?;
        let target = !view.all_checked();
        let unnumbered: Vec<usize> = view
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.id.is_none())
            .map(|(index, _)| index)
            .collect();
        let states: Vec<CheckboxState> = view
            .checkbox_states()
            .into_iter()
            .map(|state| CheckboxState::new(state.id, target))
            .collect();

        let outcome = self.set_states(&states)?;
        if let Some(view) = self.view.as_mut() {
            for index in unnumbered {
                view.set_checked(index, target);
            }
        }
        Ok(outcome)
    }

    pub fn summary(&self) -> Result<Summary> {
        Ok(Summary::of(self.active_view()?))
    }
}
