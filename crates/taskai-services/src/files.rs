use std::fs;
use std::path::Path;

use taskai_ai::{Gateway, prompts};
use taskai_core::{UploadedFile, View, Workspace, truncate_chars};
use tracing::info;

use crate::error::ControllerError;
use crate::pending::{CallTracker, Completed, PendingCall, Phase};

pub struct FilesController {
    gateway: Gateway,
    calls: CallTracker,
    summary_chars: usize,
    summary: Option<String>,
}

impl FilesController {
    pub fn new(gateway: Gateway, summary_chars: usize) -> Self {
        Self {
            gateway,
            calls: CallTracker::default(),
            summary_chars,
            summary: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.calls.phase()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Makes `file` the active file. Any summary of the previous file is dropped.
    pub fn upload(&mut self, workspace: &mut Workspace, file: UploadedFile) {
        info!(name = %file.name, size = file.size_bytes, mime = %file.mime_type, "file uploaded");
        self.reset();
        workspace.replace_file(file);
    }

    pub fn upload_path(
        &mut self,
        workspace: &mut Workspace,
        path: impl AsRef<Path>,
    ) -> Result<(), ControllerError> {
        let file = read_text_file(path.as_ref())?;
        self.upload(workspace, file);
        Ok(())
    }

    pub fn remove(&mut self, workspace: &mut Workspace) {
        self.reset();
        workspace.clear_file();
    }

    pub fn summarize(&mut self, workspace: &Workspace) -> Result<PendingCall, ControllerError> {
        let file = workspace
            .active_file
            .as_ref()
            .ok_or(ControllerError::NoActiveFile)?;
        let ticket = self.calls.begin()?;

        let excerpt = truncate_chars(&file.content, self.summary_chars).to_owned();
        info!(name = %file.name, chars = excerpt.chars().count(), "summarizing file");

        let gateway = self.gateway.clone();
        Ok(PendingCall::spawn(
            View::Files,
            ticket,
            prompts::SUMMARY_FAILURE,
            async move { gateway.summarize(&excerpt).await },
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

    fn reset(&mut self) {
        self.calls.abandon();
        self.summary = None;
    }
}

fn read_text_file(path: &Path) -> Result<UploadedFile, ControllerError> {
    let bytes = fs::read(path).map_err(|source| ControllerError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| ControllerError::NotUtf8 {
        path: path.to_path_buf(),
    })?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_guess::from_path(path).first_or_text_plain();

    Ok(UploadedFile::new(name, content, mime_type.essence_str()))
}
