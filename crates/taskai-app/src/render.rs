use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use taskai_core::{MessageRole, View};
use taskai_services::{App, Phase};

/// Reduces model markdown to plain terminal text. List items keep a dash and
/// their nesting; emphasis and code markers are dropped.
pub fn flatten_markdown(markdown: &str) -> String {
    let mut output = String::new();
    let mut depth = 0usize;
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => output.push_str(&text),
            Event::SoftBreak | Event::HardBreak => output.push('\n'),
            Event::Start(Tag::List(_)) => depth += 1,
            Event::End(TagEnd::List(_)) => depth = depth.saturating_sub(1),
            Event::Start(Tag::Item) => {
                end_line(&mut output);
                output.push_str(&"  ".repeat(depth.saturating_sub(1)));
                output.push_str("- ");
            }
            Event::End(TagEnd::Item | TagEnd::Paragraph | TagEnd::Heading(_)) => {
                end_line(&mut output);
            }
            _ => {}
        }
    }
    output.trim_end().to_owned()
}

fn end_line(output: &mut String) {
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
}

pub fn prompt(app: &App) -> String {
    let view = app.view();
    format!("{}> ", view_name(view))
}

fn view_name(view: View) -> &'static str {
    match view {
        View::Chat => "chat",
        View::Files => "files",
        View::Notes => "notes",
        View::Tasks => "tasks",
    }
}

pub fn view(app: &App) -> String {
    let current = app.view();
    let mut out = format!("== {} ==\n", current.title());
    let body = match current {
        View::Chat => chat(app),
        View::Files => files(app),
        View::Notes => notes(app),
        View::Tasks => tasks(app),
    };
    out.push_str(&body);

    let busy = View::ALL
        .iter()
        .filter(|view| **view != current && app.phase(**view) == Phase::Awaiting)
        .map(|view| view_name(*view))
        .collect::<Vec<_>>();
    if !busy.is_empty() {
        out.push_str(&format!("\n(still waiting in: {})", busy.join(", ")));
    }
    out
}

fn chat(app: &App) -> String {
    let messages = &app.workspace().messages;
    if messages.is_empty() {
        return "Ask anything about your day. Load a file in :files to chat about it.".to_owned();
    }
    messages
        .iter()
        .map(|message| {
            let speaker = match message.role {
                MessageRole::User => "you",
                MessageRole::Model => "assistant",
            };
            format!(
                "[{}] {speaker}: {}",
                message.timestamp.format("%H:%M"),
                flatten_markdown(&message.content)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn files(app: &App) -> String {
    let Some(file) = app.workspace().active_file.as_ref() else {
        return "No file loaded. Use /open <path> to read a text file.".to_owned();
    };
    let mut out = format!(
        "{} ({}, {:.1} KB)\n\n{}",
        file.name,
        file.mime_type,
        file.size_bytes as f64 / 1024.0,
        file.preview(app.limits().preview_chars)
    );
    if let Some(summary) = app.files().summary() {
        out.push_str("\n\n-- Summary --\n");
        out.push_str(&flatten_markdown(summary));
    }
    out
}

fn notes(app: &App) -> String {
    let notes = &app.workspace().notes;
    let mut out = if notes.is_empty() {
        "No notes yet. Use /save <title> | <content>.".to_owned()
    } else {
        notes
            .iter()
            .enumerate()
            .map(|(index, note)| {
                format!(
                    "{}. {} ({})\n   {}",
                    index + 1,
                    note.title,
                    note.created_at.format("%Y-%m-%d"),
                    note.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    if let Some(summary) = app.notes().summary() {
        out.push_str("\n\n-- Summary of all notes --\n");
        out.push_str(&flatten_markdown(summary));
    }
    out
}

fn tasks(app: &App) -> String {
    let workspace = app.workspace();
    let mut out = if workspace.tasks.is_empty() {
        "No tasks. Use /add <title> or /plan <goal>.".to_owned()
    } else {
        let lines = workspace
            .tasks
            .iter()
            .enumerate()
            .map(|(index, task)| {
                let mark = if task.completed { 'x' } else { ' ' };
                match &task.category {
                    Some(category) => format!("{}. [{mark}] {} #{category}", index + 1, task.title),
                    None => format!("{}. [{mark}] {}", index + 1, task.title),
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("{lines}\n{} open", workspace.open_task_count())
    };

    if let Some(plan) = app.tasks().plan() {
        let goal = app.tasks().goal().unwrap_or_default();
        out.push_str(&format!(
            "\n\n-- Proposed plan for \"{goal}\" --\n{}\n/accept to add these tasks, /discard to drop them",
            flatten_markdown(plan)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use taskai_config::AppConfig;
    use taskai_services::AppBuilder;

    use super::*;

    fn app() -> App {
        AppBuilder::new(AppConfig::default())
            .build()
            .expect("build app")
    }

    #[test]
    fn flattens_headings_lists_and_emphasis() {
        let markdown = "# Plan\n\n- **Buy** milk\n- `cargo` run\n  - nested step\n\nDone.";
        assert_eq!(
            flatten_markdown(markdown),
            "Plan\n- Buy milk\n- cargo run\n  - nested step\nDone."
        );
    }

    #[test]
    fn tasks_view_numbers_and_marks() {
        let mut app = app();
        app.navigate(View::Tasks);
        let first = app.add_task("water plants").expect("add");
        app.add_task("stretch").expect("add");
        app.toggle_task(first);

        let text = view(&app);
        assert!(text.starts_with("== Task Automation ==\n"));
        assert!(text.contains("1. [ ] stretch\n2. [x] water plants\n1 open"));
    }

    #[test]
    fn empty_views_show_hints() {
        let mut app = app();
        assert!(view(&app).contains("Ask anything"));
        app.navigate(View::Files);
        assert!(view(&app).contains("/open <path>"));
        assert_eq!(prompt(&app), "files> ");
    }
}
