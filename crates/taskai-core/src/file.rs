use serde::{Deserialize, Serialize};

use crate::text::truncate_chars;

/// A text file the user made available as context. Only one is active at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub content: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl UploadedFile {
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            size_bytes: content.len() as u64,
            content,
            mime_type: mime_type.into(),
        }
    }

    pub fn preview(&self, max_chars: usize) -> String {
        let head = truncate_chars(&self.content, max_chars);
        if head.len() < self.content.len() {
            format!("{head}...")
        } else {
            head.to_owned()
        }
    }
}
