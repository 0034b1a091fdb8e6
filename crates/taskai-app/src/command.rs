use std::path::PathBuf;

use taskai_core::View;
use thiserror::Error;

/// One line of user input, resolved against the view it was typed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Navigate(View),
    Help,
    Quit,
    Send(String),
    ClearChat,
    OpenFile(PathBuf),
    SummarizeFile,
    RemoveFile,
    SaveNote { title: String, content: String },
    DeleteNote(usize),
    SummarizeNotes,
    DismissSummary,
    AddTask(String),
    ToggleTask(usize),
    RemoveTask(usize),
    Plan(String),
    AcceptPlan,
    DiscardPlan,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}`, type :help")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("`{0}` is not a list number")]
    BadIndex(String),
    #[error("plain text only works in the chat view, type :help")]
    TextOutsideChat,
}

pub const HELP: &str = "\
Views:  :chat  :files  :notes  :tasks      Other:  :help  :quit
Chat:   type a message to send it, /clear to start over
Files:  /open <path>  /summarize  /remove
Notes:  /save <title> | <content>  /delete <n>  /summarize  /dismiss
Tasks:  /add <title>  /toggle <n>  /remove <n>  /plan <goal>  /accept  /discard
Ctrl-C stops waiting for the model, or clears the line at the prompt. Ctrl-D quits.";

pub const VIEW_SWITCHES: [&str; 6] = [":chat", ":files", ":notes", ":tasks", ":help", ":quit"];

/// Slash commands accepted in `view`.
pub fn slash_commands(view: View) -> &'static [&'static str] {
    match view {
        View::Chat => &["/clear"],
        View::Files => &["/open", "/summarize", "/remove"],
        View::Notes => &["/save", "/delete", "/summarize", "/dismiss"],
        View::Tasks => &["/add", "/toggle", "/remove", "/plan", "/accept", "/discard"],
    }
}

pub fn parse(view: View, line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Show);
    }

    if let Some(name) = line.strip_prefix(':') {
        return match name.trim() {
            "help" | "h" => Ok(Command::Help),
            "quit" | "q" => Ok(Command::Quit),
            other => View::from_name(other)
                .map(Command::Navigate)
                .ok_or_else(|| ParseError::Unknown(line.to_owned())),
        };
    }

    let Some(body) = line.strip_prefix('/') else {
        return match view {
            View::Chat => Ok(Command::Send(line.to_owned())),
            _ => Err(ParseError::TextOutsideChat),
        };
    };

    let (name, arg) = match body.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (body, ""),
    };

    match (view, name) {
        (View::Chat, "clear") => Ok(Command::ClearChat),
        (View::Files, "open") => required(arg, "/open <path>").map(|arg| Command::OpenFile(arg.into())),
        (View::Files, "summarize") => Ok(Command::SummarizeFile),
        (View::Files, "remove") => Ok(Command::RemoveFile),
        (View::Notes, "save") => {
            let (title, content) = arg
                .split_once('|')
                .ok_or(ParseError::Usage("/save <title> | <content>"))?;
            Ok(Command::SaveNote {
                title: title.trim().to_owned(),
                content: content.trim().to_owned(),
            })
        }
        (View::Notes, "delete") => index(arg, "/delete <n>").map(Command::DeleteNote),
        (View::Notes, "summarize") => Ok(Command::SummarizeNotes),
        (View::Notes, "dismiss") => Ok(Command::DismissSummary),
        (View::Tasks, "add") => required(arg, "/add <title>").map(Command::AddTask),
        (View::Tasks, "toggle") => index(arg, "/toggle <n>").map(Command::ToggleTask),
        (View::Tasks, "remove") => index(arg, "/remove <n>").map(Command::RemoveTask),
        (View::Tasks, "plan") => required(arg, "/plan <goal>").map(Command::Plan),
        (View::Tasks, "accept") => Ok(Command::AcceptPlan),
        (View::Tasks, "discard") => Ok(Command::DiscardPlan),
        _ => Err(ParseError::Unknown(format!("/{name}"))),
    }
}

fn required(arg: &str, usage: &'static str) -> Result<String, ParseError> {
    if arg.is_empty() {
        Err(ParseError::Usage(usage))
    } else {
        Ok(arg.to_owned())
    }
}

/// List numbers are 1-based as displayed; the result is a 0-based position.
fn index(arg: &str, usage: &'static str) -> Result<usize, ParseError> {
    let arg = required(arg, usage)?;
    match arg.parse::<usize>() {
        Ok(number) if number > 0 => Ok(number - 1),
        _ => Err(ParseError::BadIndex(arg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_commands_work_everywhere() {
        assert_eq!(parse(View::Tasks, ":chat"), Ok(Command::Navigate(View::Chat)));
        assert_eq!(parse(View::Chat, " :Notes "), Ok(Command::Navigate(View::Notes)));
        assert_eq!(parse(View::Files, ":q"), Ok(Command::Quit));
        assert_eq!(
            parse(View::Chat, ":settings"),
            Err(ParseError::Unknown(":settings".to_owned()))
        );
    }

    #[test]
    fn plain_text_sends_only_in_chat() {
        assert_eq!(
            parse(View::Chat, "what's on today?"),
            Ok(Command::Send("what's on today?".to_owned()))
        );
        assert_eq!(parse(View::Notes, "hello"), Err(ParseError::TextOutsideChat));
        assert_eq!(parse(View::Notes, "   "), Ok(Command::Show));
    }

    #[test]
    fn note_save_splits_on_pipe() {
        assert_eq!(
            parse(View::Notes, "/save Groceries | milk, eggs | bread"),
            Ok(Command::SaveNote {
                title: "Groceries".to_owned(),
                content: "milk, eggs | bread".to_owned(),
            })
        );
        assert_eq!(
            parse(View::Notes, "/save no separator"),
            Err(ParseError::Usage("/save <title> | <content>"))
        );
    }

    #[test]
    fn list_numbers_are_one_based() {
        assert_eq!(parse(View::Tasks, "/toggle 1"), Ok(Command::ToggleTask(0)));
        assert_eq!(parse(View::Notes, "/delete 3"), Ok(Command::DeleteNote(2)));
        assert_eq!(
            parse(View::Tasks, "/remove 0"),
            Err(ParseError::BadIndex("0".to_owned()))
        );
        assert_eq!(
            parse(View::Tasks, "/toggle"),
            Err(ParseError::Usage("/toggle <n>"))
        );
    }

    #[test]
    fn listed_commands_all_parse() {
        for view in View::ALL {
            for name in slash_commands(view) {
                let line = format!("{name} 1 | x");
                assert!(
                    !matches!(parse(view, &line), Err(ParseError::Unknown(_))),
                    "{line} in {view:?}"
                );
            }
        }
        for name in VIEW_SWITCHES {
            assert!(parse(View::Chat, name).is_ok(), "{name}");
        }
    }

    #[test]
    fn slash_commands_belong_to_their_view() {
        assert_eq!(
            parse(View::Files, "/open ./notes/today.txt"),
            Ok(Command::OpenFile(PathBuf::from("./notes/today.txt")))
        );
        assert_eq!(
            parse(View::Tasks, "/plan Learn Rust in a month"),
            Ok(Command::Plan("Learn Rust in a month".to_owned()))
        );
        assert_eq!(
            parse(View::Chat, "/accept"),
            Err(ParseError::Unknown("/accept".to_owned()))
        );
    }
}
