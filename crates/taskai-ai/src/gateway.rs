use std::sync::Arc;

use taskai_core::{Message, message};
use tracing::{error, info};

use crate::error::GatewayError;
use crate::model::{Content, GenerateRequest, GenerativeModel};
use crate::prompts;

pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// The three request shapes the application sends to the model service.
///
/// Every operation returns display text: failures are logged and replaced with
/// a fixed message, so callers never see an error.
#[derive(Clone)]
pub struct Gateway {
    model: Arc<dyn GenerativeModel>,
    model_name: String,
    history_window: usize,
}

impl Gateway {
    pub fn new(model: Arc<dyn GenerativeModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }

    pub fn with_history_window(mut self, history_window: usize) -> Self {
        self.history_window = history_window;
        self
    }

    pub async fn chat_reply(
        &self,
        history: &[Message],
        new_message: &str,
        file_context: Option<&str>,
    ) -> String {
        let mut contents = message::recent(history, self.history_window)
            .iter()
            .map(|entry| Content {
                role: entry.role.into(),
                text: entry.content.clone(),
            })
            .collect::<Vec<_>>();
        contents.push(Content::user(prompts::chat_prompt(
            new_message,
            file_context,
        )));

        let request = GenerateRequest {
            model: self.model_name.clone(),
            system_instruction: Some(prompts::ASSISTANT_SYSTEM_INSTRUCTION.to_owned()),
            contents,
        };
        self.run("chat", request, prompts::CHAT_EMPTY, prompts::CHAT_FAILURE)
            .await
    }

    /// Callers truncate `text` to their own budget first.
    pub async fn summarize(&self, text: &str) -> String {
        let request = self.single_shot(prompts::summary_prompt(text));
        self.run(
            "summarize",
            request,
            prompts::SUMMARY_EMPTY,
            prompts::SUMMARY_FAILURE,
        )
        .await
    }

    pub async fn plan_from_goal(&self, goal: &str) -> String {
        let request = self.single_shot(prompts::plan_prompt(goal));
        self.run("plan", request, prompts::PLAN_EMPTY, prompts::PLAN_FAILURE)
            .await
    }

    fn single_shot(&self, prompt: String) -> GenerateRequest {
        GenerateRequest {
            model: self.model_name.clone(),
            system_instruction: None,
            contents: vec![Content::user(prompt)],
        }
    }

    async fn run(
        &self,
        operation: &'static str,
        request: GenerateRequest,
        empty: &str,
        failure: &str,
    ) -> String {
        match self.model.generate(&request).await {
            Ok(Some(text)) => {
                info!(operation, model = %self.model_name, chars = text.len(), "gateway call succeeded");
                text
            }
            Ok(None) => empty.to_owned(),
            Err(err) => {
                log_failure(operation, &err);
                failure.to_owned()
            }
        }
    }
}

fn log_failure(operation: &str, err: &GatewayError) {
    error!(operation, kind = err.kind(), error = %err, "gateway call failed");
}
