mod command;
mod editor;
mod render;
mod shell;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use rustyline::{Editor, error::ReadlineError, history::DefaultHistory};
use taskai_config::{AppConfig, ConfigStore, api_key_from_env};
use taskai_services::{App, AppBuilder};
use tokio::{
    runtime::Runtime,
    sync::mpsc::{self, UnboundedReceiver},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::editor::CommandHelper;
use crate::shell::{Outcome, Waited};

fn main() {
    let mut data_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    data_dir.push("taskai");
    if let Err(err) = fs::create_dir_all(&data_dir) {
        eprintln!("failed to prepare data dir: {err}");
    }

    let (config, config_error) = match load_config() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    let _log_guard = init_local_logger(&data_dir.join("logs"), &config.log_filter);
    if let Some(err) = config_error {
        error!("failed to load config, using defaults: {err:#}");
    }

    let api_key = api_key_from_env();
    if api_key.is_none() {
        warn!("no GEMINI_API_KEY or API_KEY set, model requests will fail");
        eprintln!("warning: set GEMINI_API_KEY to talk to the model");
    }

    let app = match AppBuilder::new(config).api_key(api_key).build() {
        Ok(app) => app,
        Err(err) => {
            eprintln!("failed to start: {err:#}");
            return;
        }
    };

    let runtime = match Runtime::new() {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("failed to create tokio runtime: {err}");
            return;
        }
    };

    let _runtime_guard = runtime.enter();
    let interrupts = listen_for_interrupts(&runtime);

    if let Err(err) = run(&runtime, app, interrupts) {
        error!("session ended with error: {err:#}");
        eprintln!("{err:#}");
    }
}

fn load_config() -> Result<AppConfig> {
    let store = ConfigStore::from_default_location()?;
    store
        .load_or_init()
        .with_context(|| format!("config at {}", store.path().display()))
}

/// Forwards every SIGINT for the whole session. The prompt never sees these
/// because the line editor reads Ctrl-C as a key; only `wait_for` consumes them.
fn listen_for_interrupts(runtime: &Runtime) -> UnboundedReceiver<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    runtime.spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if tx.send(()).is_err() {
                break;
            }
        }
        warn!("interrupt listener stopped");
    });
    rx
}

fn run(runtime: &Runtime, mut app: App, mut interrupts: UnboundedReceiver<()>) -> Result<()> {
    let mut editor: Editor<CommandHelper, DefaultHistory> =
        Editor::new().context("failed to open the line editor")?;
    editor.set_helper(Some(CommandHelper::new(app.view())));

    println!("{}\n", command::HELP);
    println!("{}", render::view(&app));
    info!("session started");

    loop {
        if let Some(helper) = editor.helper_mut() {
            helper.set_view(app.view());
        }

        let line = match editor.readline(&render::prompt(&app)) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => bail!("failed to read input: {err}"),
        };
        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }

        let command = match command::parse(app.view(), &line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match shell::execute(&mut app, command) {
            Ok(Outcome::Render) => println!("{}", render::view(&app)),
            Ok(Outcome::Say(text)) => println!("{text}"),
            Ok(Outcome::Wait(call)) => {
                println!("waiting for the model... (Ctrl-C to stop waiting)");
                let waited = runtime.block_on(shell::wait_for(&mut app, call, &mut interrupts));
                if waited == Waited::Abandoned {
                    println!("stopped waiting.");
                }
                println!("{}", render::view(&app));
            }
            Ok(Outcome::Quit) => break,
            Err(err) => println!("{err}"),
        }
    }

    info!("session ended");
    Ok(())
}

fn init_local_logger(log_dir: &Path, default_filter: &str) -> tracing_appender::non_blocking::WorkerGuard {
    if let Err(err) = fs::create_dir_all(log_dir) {
        eprintln!("failed to create log dir `{}`: {err}", log_dir.display());
    }
    let file_appender = tracing_appender::rolling::daily(log_dir, "taskai.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_writer(writer)
        .init();

    guard
}
