use taskai_services::{App, ControllerError, PendingCall};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::command::{Command, HELP};

pub enum Outcome {
    Render,
    Say(String),
    Wait(PendingCall),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waited {
    Applied,
    Discarded,
    Abandoned,
}

/// Waits for `call` unless an interrupt arrives first, in which case the call
/// is aborted and its view returns to idle.
///
/// Interrupts that were queued before the wait started are dropped.
pub async fn wait_for(
    app: &mut App,
    mut call: PendingCall,
    interrupts: &mut UnboundedReceiver<()>,
) -> Waited {
    while interrupts.try_recv().is_ok() {}
    let origin = call.origin();

    let finished = tokio::select! {
        done = &mut call => Some(done),
        Some(()) = interrupts.recv() => None,
    };

    match finished {
        Some(done) => {
            if app.apply(done) {
                Waited::Applied
            } else {
                Waited::Discarded
            }
        }
        None => {
            call.abandon();
            app.abandon(origin);
            Waited::Abandoned
        }
    }
}

pub fn execute(app: &mut App, command: Command) -> Result<Outcome, ControllerError> {
    let outcome = match command {
        Command::Show => Outcome::Render,
        Command::Help => Outcome::Say(HELP.to_owned()),
        Command::Quit => Outcome::Quit,
        Command::Navigate(view) => {
            app.navigate(view);
            Outcome::Render
        }
        Command::Send(text) => Outcome::Wait(app.send_message(&text)?),
        Command::ClearChat => {
            app.clear_chat();
            Outcome::Render
        }
        Command::OpenFile(path) => {
            app.upload_path(&path)?;
            Outcome::Render
        }
        Command::SummarizeFile => Outcome::Wait(app.summarize_file()?),
        Command::RemoveFile => {
            app.remove_file();
            Outcome::Render
        }
        Command::SaveNote { title, content } => {
            app.save_note(&title, &content)?;
            Outcome::Render
        }
        Command::DeleteNote(index) => match app.workspace().notes.get(index).map(|note| note.id) {
            Some(id) => {
                app.delete_note(id);
                Outcome::Render
            }
            None => missing("note", index),
        },
        Command::SummarizeNotes => Outcome::Wait(app.summarize_notes()?),
        Command::DismissSummary => {
            app.dismiss_notes_summary();
            Outcome::Render
        }
        Command::AddTask(title) => {
            app.add_task(&title)?;
            Outcome::Render
        }
        Command::ToggleTask(index) => match task_id(app, index) {
            Some(id) => {
                app.toggle_task(id);
                Outcome::Render
            }
            None => missing("task", index),
        },
        Command::RemoveTask(index) => match task_id(app, index) {
            Some(id) => {
                app.remove_task(id);
                Outcome::Render
            }
            None => missing("task", index),
        },
        Command::Plan(goal) => Outcome::Wait(app.generate_plan(&goal)?),
        Command::AcceptPlan => {
            let added = app.accept_plan()?;
            if added == 0 {
                Outcome::Say("The plan had no list items, nothing was added.".to_owned())
            } else {
                Outcome::Render
            }
        }
        Command::DiscardPlan => {
            app.discard_plan();
            Outcome::Render
        }
    };
    Ok(outcome)
}

fn task_id(app: &App, index: usize) -> Option<uuid::Uuid> {
    app.workspace().tasks.get(index).map(|task| task.id)
}

fn missing(kind: &str, index: usize) -> Outcome {
    Outcome::Say(format!("There is no {kind} #{}.", index + 1))
}
