use serde::{Deserialize, Serialize};

use crate::{Message, Note, Task, UploadedFile};

/// Root application state. Lives in memory only.
///
/// Controllers receive it by reference and replace whole collections with the
/// output of the pure functions in [`crate::message`], [`crate::note`] and
/// [`crate::task`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    pub messages: Vec<Message>,
    pub active_file: Option<UploadedFile>,
    pub notes: Vec<Note>,
    pub tasks: Vec<Task>,
}

impl Workspace {
    /// Single slot: the previous file, if any, is returned and dropped from state.
    pub fn replace_file(&mut self, file: UploadedFile) -> Option<UploadedFile> {
        self.active_file.replace(file)
    }

    pub fn clear_file(&mut self) -> Option<UploadedFile> {
        self.active_file.take()
    }

    pub fn open_task_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }
}
