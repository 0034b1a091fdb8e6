use async_trait::async_trait;
use taskai_core::MessageRole;

use crate::error::GatewayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRole {
    User,
    Model,
}

impl From<MessageRole> for ContentRole {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => ContentRole::User,
            MessageRole::Model => ContentRole::Model,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub role: ContentRole,
    pub text: String,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ContentRole::User,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub system_instruction: Option<String>,
    pub contents: Vec<Content>,
}

/// One request/response exchange with a generative-language service.
///
/// `Ok(None)` means the service answered but produced no text.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, GatewayError>;
}
