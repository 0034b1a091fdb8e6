mod error;
mod gateway;
mod gemini;
mod model;
pub mod prompts;

pub use error::GatewayError;
pub use gateway::{DEFAULT_HISTORY_WINDOW, Gateway};
pub use gemini::GeminiClient;
pub use model::{Content, ContentRole, GenerateRequest, GenerativeModel};
