use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use taskai_core::View;

use crate::command::{VIEW_SWITCHES, slash_commands};

/// Line-editor helper: completes and hints `:view` switches and the slash
/// commands of the current view.
pub struct CommandHelper {
    view: View,
}

impl CommandHelper {
    pub fn new(view: View) -> Self {
        Self { view }
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    fn candidates(&self, typed: &str) -> Vec<&'static str> {
        let names: &[&'static str] = if typed.starts_with(':') {
            &VIEW_SWITCHES
        } else if typed.starts_with('/') {
            slash_commands(self.view)
        } else {
            &[]
        };
        names
            .iter()
            .copied()
            .filter(|name| name.starts_with(typed))
            .collect()
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let typed = &line[..pos];
        if typed.contains(char::is_whitespace) {
            return Ok((0, Vec::new()));
        }
        let pairs = self
            .candidates(typed)
            .into_iter()
            .map(|name| Pair {
                display: name.to_owned(),
                replacement: name.to_owned(),
            })
            .collect();
        Ok((0, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let typed = &line[..pos];
        if typed.len() < 2 || pos < line.len() || typed.contains(char::is_whitespace) {
            return None;
        }
        self.candidates(typed)
            .into_iter()
            .find(|name| name.len() > typed.len())
            .map(|name| name[typed.len()..].to_owned())
    }
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}
