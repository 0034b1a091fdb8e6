use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use taskai_ai::{Gateway, GeminiClient, GenerativeModel};
use taskai_config::{AppConfig, Limits};
use taskai_core::{UploadedFile, View, Workspace};
use tracing::{debug, info};
use uuid::Uuid;

use crate::chat::ChatController;
use crate::error::ControllerError;
use crate::files::FilesController;
use crate::notes::NotesController;
use crate::pending::{Completed, PendingCall, Phase};
use crate::tasks::TasksController;

pub struct AppBuilder {
    config: AppConfig,
    api_key: Option<String>,
    model: Option<Arc<dyn GenerativeModel>>,
}

impl AppBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            api_key: None,
            model: None,
        }
    }

    pub fn api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Replaces the HTTP client with another model implementation.
    pub fn with_model(mut self, model: Arc<dyn GenerativeModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn build(self) -> Result<App> {
        let model = match self.model {
            Some(model) => model,
            None => {
                let timeout = self.config.request_timeout_secs.map(Duration::from_secs);
                let client = GeminiClient::new(&self.config.base_url, self.api_key, timeout)
                    .context("failed to build the model client")?;
                Arc::new(client)
            }
        };

        let limits = self.config.limits;
        let gateway =
            Gateway::new(model, &self.config.model).with_history_window(limits.history_window);
        info!(model = %self.config.model, base_url = %self.config.base_url, "app ready");

        Ok(App {
            workspace: Workspace::default(),
            view: View::default(),
            limits,
            chat: ChatController::new(gateway.clone(), limits.chat_context_chars),
            files: FilesController::new(gateway.clone(), limits.summary_input_chars),
            notes: NotesController::new(gateway.clone()),
            tasks: TasksController::new(gateway),
        })
    }
}

/// Root controller: the workspace, the visible view and one controller per view.
///
/// Switching views never cancels a call; its result is applied to the view
/// that started it.
pub struct App {
    workspace: Workspace,
    view: View,
    limits: Limits,
    chat: ChatController,
    files: FilesController,
    notes: NotesController,
    tasks: TasksController,
}

impl App {
    pub fn view(&self) -> View {
        self.view
    }

    pub fn navigate(&mut self, view: View) {
        if self.view != view {
            debug!(from = ?self.view, to = ?view, "navigate");
            self.view = view;
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn chat(&self) -> &ChatController {
        &self.chat
    }

    pub fn files(&self) -> &FilesController {
        &self.files
    }

    pub fn notes(&self) -> &NotesController {
        &self.notes
    }

    pub fn tasks(&self) -> &TasksController {
        &self.tasks
    }

    pub fn phase(&self, view: View) -> Phase {
        match view {
            View::Chat => self.chat.phase(),
            View::Files => self.files.phase(),
            View::Notes => self.notes.phase(),
            View::Tasks => self.tasks.phase(),
        }
    }

    /// Hands a finished call back to the controller that started it.
    pub fn apply(&mut self, done: Completed) -> bool {
        match done.origin {
            View::Chat => self.chat.apply(&mut self.workspace, done),
            View::Files => self.files.apply(done),
            View::Notes => self.notes.apply(done),
            View::Tasks => self.tasks.apply(done),
        }
    }

    /// Stops waiting on `view`'s call. Returns false when nothing was in flight.
    pub fn abandon(&mut self, view: View) -> bool {
        let abandoned = match view {
            View::Chat => self.chat.abandon(),
            View::Files => self.files.abandon(),
            View::Notes => self.notes.abandon(),
            View::Tasks => self.tasks.abandon(),
        };
        if abandoned {
            info!(?view, "call abandoned");
        }
        abandoned
    }

    pub fn send_message(&mut self, input: &str) -> Result<PendingCall, ControllerError> {
        self.chat.send(&mut self.workspace, input)
    }

    pub fn clear_chat(&mut self) {
        self.chat.clear(&mut self.workspace);
    }

    pub fn upload_file(&mut self, file: UploadedFile) {
        self.files.upload(&mut self.workspace, file);
    }

    pub fn upload_path(&mut self, path: impl AsRef<Path>) -> Result<(), ControllerError> {
        self.files.upload_path(&mut self.workspace, path)
    }

    pub fn remove_file(&mut self) {
        self.files.remove(&mut self.workspace);
    }

    pub fn summarize_file(&mut self) -> Result<PendingCall, ControllerError> {
        self.files.summarize(&self.workspace)
    }

    pub fn save_note(&mut self, title: &str, content: &str) -> Result<Uuid, ControllerError> {
        self.notes.save(&mut self.workspace, title, content)
    }

    pub fn delete_note(&mut self, id: Uuid) -> bool {
        self.notes.delete(&mut self.workspace, id)
    }

    pub fn summarize_notes(&mut self) -> Result<PendingCall, ControllerError> {
        self.notes.summarize_all(&self.workspace)
    }

    pub fn dismiss_notes_summary(&mut self) {
        self.notes.dismiss_summary();
    }

    pub fn add_task(&mut self, title: &str) -> Result<Uuid, ControllerError> {
        self.tasks.add(&mut self.workspace, title)
    }

    pub fn toggle_task(&mut self, id: Uuid) {
        self.tasks.toggle(&mut self.workspace, id);
    }

    pub fn remove_task(&mut self, id: Uuid) -> bool {
        self.tasks.remove(&mut self.workspace, id)
    }

    pub fn generate_plan(&mut self, goal: &str) -> Result<PendingCall, ControllerError> {
        self.tasks.generate_plan(goal)
    }

    pub fn accept_plan(&mut self) -> Result<usize, ControllerError> {
        self.tasks.accept_plan(&mut self.workspace)
    }

    pub fn discard_plan(&mut self) {
        self.tasks.discard_plan();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubModel;

    fn app_with(model: Arc<StubModel>) -> App {
        AppBuilder::new(AppConfig::default())
            .with_model(model)
            .build()
            .expect("build app")
    }

    #[test]
    fn builds_without_api_key() {
        let app = AppBuilder::new(AppConfig::default())
            .build()
            .expect("build app");
        assert_eq!(app.view(), View::Chat);
        assert!(app.workspace().messages.is_empty());
        assert_eq!(app.limits().preview_chars, 5_000);
    }

    #[tokio::test]
    async fn navigation_keeps_in_flight_call() {
        let mut app = app_with(StubModel::replying("answer"));

        let call = app.send_message("hi").expect("send");
        app.navigate(View::Tasks);
        assert_eq!(app.phase(View::Chat), Phase::Awaiting);

        let done = call.await;
        assert_eq!(done.origin, View::Chat);
        assert!(app.apply(done));
        assert_eq!(app.view(), View::Tasks);
        assert_eq!(app.workspace().messages.len(), 2);
    }

    #[tokio::test]
    async fn views_wait_independently() {
        let mut app = app_with(StubModel::replying("- step"));
        app.upload_file(UploadedFile::new("a.txt", "text", "text/plain"));
        app.add_task("seed").expect("add");

        let summary = app.summarize_file().expect("summarize");
        let plan = app.generate_plan("goal").expect("plan");
        assert_eq!(app.phase(View::Files), Phase::Awaiting);
        assert_eq!(app.phase(View::Tasks), Phase::Awaiting);
        assert_eq!(app.phase(View::Notes), Phase::Idle);

        assert!(app.apply(plan.await));
        assert!(app.apply(summary.await));
        assert_eq!(app.files().summary(), Some("- step"));
        assert_eq!(app.accept_plan().expect("accept"), 1);
        assert_eq!(app.workspace().tasks[0].title, "step");
    }

    #[tokio::test]
    async fn abandoned_call_is_not_applied() {
        let mut app = app_with(StubModel::replying("late"));
        app.save_note("t", "c").expect("save");

        let call = app.summarize_notes().expect("summarize");
        assert!(app.abandon(View::Notes));
        assert!(!app.abandon(View::Notes));

        assert!(!app.apply(call.await));
        assert!(app.notes().summary().is_none());
    }
}
