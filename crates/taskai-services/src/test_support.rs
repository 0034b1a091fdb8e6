use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use taskai_ai::{Gateway, GatewayError, GenerateRequest, GenerativeModel};

/// In-process model: echoes a canned reply, fails, or never answers.
pub(crate) struct StubModel {
    behavior: Behavior,
    pub(crate) requests: Mutex<Vec<GenerateRequest>>,
}

enum Behavior {
    Reply(String),
    Fail,
    Hang,
}

impl StubModel {
    pub(crate) fn replying(text: &str) -> Arc<Self> {
        Self::with(Behavior::Reply(text.to_owned()))
    }

    pub(crate) fn failing() -> Arc<Self> {
        Self::with(Behavior::Fail)
    }

    pub(crate) fn hanging() -> Arc<Self> {
        Self::with(Behavior::Hang)
    }

    fn with(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn last_prompt(&self) -> String {
        self.requests
            .lock()
            .expect("lock")
            .last()
            .and_then(|request| request.contents.last())
            .map(|content| content.text.clone())
            .expect("a request was sent")
    }
}

pub(crate) fn gateway_for(model: &Arc<StubModel>) -> Gateway {
    Gateway::new(model.clone(), "stub-model")
}

#[async_trait]
impl GenerativeModel for StubModel {
    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, GatewayError> {
        self.requests.lock().expect("lock").push(request.clone());
        match &self.behavior {
            Behavior::Reply(text) => Ok(Some(text.clone())),
            Behavior::Fail => Err(GatewayError::Api {
                code: 503,
                message: "unavailable".to_owned(),
            }),
            Behavior::Hang => std::future::pending().await,
        }
    }
}
