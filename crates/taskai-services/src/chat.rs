use taskai_ai::{Gateway, prompts};
use taskai_core::{Message, View, Workspace, message, truncate_chars};
use tracing::info;

use crate::error::ControllerError;
use crate::pending::{CallTracker, Completed, PendingCall, Phase};

pub struct ChatController {
    gateway: Gateway,
    calls: CallTracker,
    context_chars: usize,
}

impl ChatController {
    pub fn new(gateway: Gateway, context_chars: usize) -> Self {
        Self {
            gateway,
            calls: CallTracker::default(),
            context_chars,
        }
    }

    pub fn phase(&self) -> Phase {
        self.calls.phase()
    }

    /// Records the user's message and asks the model for a reply.
    ///
    /// The model sees the history as it was before this message, plus the
    /// active file (cut to the context budget) when one is loaded.
    pub fn send(
        &mut self,
        workspace: &mut Workspace,
        input: &str,
    ) -> Result<PendingCall, ControllerError> {
        if input.trim().is_empty() {
            return Err(ControllerError::EmptyInput);
        }
        let ticket = self.calls.begin()?;

        let history = workspace.messages.clone();
        workspace.messages = message::append(&workspace.messages, Message::user(input));

        let file_context = workspace.active_file.as_ref().map(|file| {
            format!(
                "Active File Content ({}):\n{}...",
                file.name,
                truncate_chars(&file.content, self.context_chars)
            )
        });

        info!(
            history = history.len(),
            with_file = file_context.is_some(),
            "sending chat message"
        );

        let gateway = self.gateway.clone();
        let prompt = input.to_owned();
        Ok(PendingCall::spawn(
            View::Chat,
            ticket,
            prompts::CHAT_FAILURE,
            async move {
                gateway
                    .chat_reply(&history, &prompt, file_context.as_deref())
                    .await
            },
        ))
    }

    /// Appends the model's reply unless the call was abandoned or superseded.
    pub fn apply(&mut self, workspace: &mut Workspace, done: Completed) -> bool {
        if !self.calls.finish(done.ticket) {
            return false;
        }
        workspace.messages = message::append(&workspace.messages, Message::model(done.text));
        true
    }

    pub fn abandon(&mut self) -> bool {
        self.calls.abandon()
    }

    /// Clears the conversation. A reply still in flight belongs to the old
    /// conversation and is dropped when it arrives.
    pub fn clear(&mut self, workspace: &mut Workspace) {
        self.calls.abandon();
        workspace.messages = Vec::new();
    }
}
