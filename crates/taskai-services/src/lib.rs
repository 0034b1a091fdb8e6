mod app;
mod chat;
mod error;
mod files;
mod notes;
mod pending;
mod tasks;
#[cfg(test)]
mod test_support;

pub use app::{App, AppBuilder};
pub use chat::ChatController;
pub use error::ControllerError;
pub use files::FilesController;
pub use notes::NotesController;
pub use pending::{Completed, PendingCall, Phase, Ticket};
pub use tasks::TasksController;
