pub mod file;
pub mod message;
pub mod note;
pub mod plan;
pub mod task;
pub mod text;
pub mod view;
pub mod workspace;

pub use file::UploadedFile;
pub use message::{Message, MessageRole};
pub use note::Note;
pub use plan::{ListMarker, PlanStep, parse_plan, plan_titles};
pub use task::Task;
pub use text::truncate_chars;
pub use view::View;
pub use workspace::Workspace;
