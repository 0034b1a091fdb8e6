use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Chat,
    Files,
    Notes,
    Tasks,
}

impl View {
    pub const ALL: [View; 4] = [View::Chat, View::Files, View::Notes, View::Tasks];

    pub fn title(self) -> &'static str {
        match self {
            View::Chat => "Chat Assistant",
            View::Files => "File Reader",
            View::Notes => "Notes Manager",
            View::Tasks => "Task Automation",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "chat" => Some(View::Chat),
            "files" | "file" => Some(View::Files),
            "notes" | "note" => Some(View::Notes),
            "tasks" | "task" => Some(View::Tasks),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_case_insensitively() {
        assert_eq!(View::from_name("Tasks"), Some(View::Tasks));
        assert_eq!(View::from_name(" file "), Some(View::Files));
        assert_eq!(View::from_name("settings"), None);
    }

    #[test]
    fn chat_is_the_default_view() {
        assert_eq!(View::default(), View::Chat);
    }
}
