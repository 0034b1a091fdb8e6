use taskai_ai::{Gateway, prompts};
use taskai_core::{Note, View, Workspace, note};
use tracing::info;
use uuid::Uuid;

use crate::error::ControllerError;
use crate::pending::{CallTracker, Completed, PendingCall, Phase};

pub struct NotesController {
    gateway: Gateway,
    calls: CallTracker,
    summary: Option<String>,
}

impl NotesController {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            calls: CallTracker::default(),
            summary: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.calls.phase()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn dismiss_summary(&mut self) {
        self.summary = None;
    }

    /// Stores a new note at the top of the list. Both fields must have text.
    pub fn save(
        &mut self,
        workspace: &mut Workspace,
        title: &str,
        content: &str,
    ) -> Result<Uuid, ControllerError> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(ControllerError::EmptyInput);
        }
        let note = Note::new(title, content);
        let id = note.id;
        workspace.notes = note::prepend(&workspace.notes, note);
        info!(%id, total = workspace.notes.len(), "note saved");
        Ok(id)
    }

    pub fn delete(&mut self, workspace: &mut Workspace, id: Uuid) -> bool {
        let before = workspace.notes.len();
        workspace.notes = note::remove(&workspace.notes, id);
        before != workspace.notes.len()
    }

    pub fn summarize_all(&mut self, workspace: &Workspace) -> Result<PendingCall, ControllerError> {
        if workspace.notes.is_empty() {
            return Err(ControllerError::NoNotes);
        }
        let ticket = self.calls.begin()?;
        let digest = note::digest(&workspace.notes);
        info!(notes = workspace.notes.len(), "summarizing notes");

        let gateway = self.gateway.clone();
        Ok(PendingCall::spawn(
            View::Notes,
            ticket,
            prompts::SUMMARY_FAILURE,
            async move { gateway.summarize(&digest).await },
        ))
    }

    pub fn apply(&mut self, done: Completed) -> bool {
        if !self.calls.finish(done.ticket) {
            return false;
        }
        self.summary = Some(done.text);
        true
    }

    pub fn abandon(&mut self) -> bool {
        self.calls.abandon()
    }
}
