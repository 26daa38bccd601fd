use std::io::BufRead;
use std::path::Path;
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context};
use engine_logging::{engine_debug, engine_warn};
use summarizer_core::{update, AppState, AppViewModel, Msg, RequestPhase, Selection};
use summarizer_engine::{load_file, write_atomic, LoadedFile};

use super::commands::{self, Command, HELP};
use super::effects::EffectRunner;
use super::ui::render;
use crate::cli::Cli;
use crate::config::AppConfig;

/// Everything the app thread reacts to, in arrival order.
pub(crate) enum AppEvent {
    Core(Msg),
    Command(Command),
    InputClosed,
}

enum Flow {
    Continue,
    Quit,
}

/// Owns the controller state; the only place it is mutated.
struct Session {
    state: AppState,
    runner: EffectRunner,
    last_phase: RequestPhase,
}

impl Session {
    fn new(config: &AppConfig, runner: EffectRunner) -> Self {
        Self {
            state: AppState::new().with_progress_reset_delay(config.progress_reset_delay()),
            runner,
            last_phase: RequestPhase::Idle,
        }
    }

    /// Applies `msg`, runs its effects, and returns the view if anything changed.
    fn dispatch(&mut self, msg: Msg) -> Option<AppViewModel> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;
        was_dirty.then_some(view)
    }

    fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Pumps engine messages until the current request reaches a terminal state.
    fn wait_until_settled(&mut self, rx: &mpsc::Receiver<AppEvent>) -> anyhow::Result<()> {
        while self.state.request().is_in_flight() {
            match rx.recv() {
                Ok(AppEvent::Core(msg)) => {
                    if let Some(view) = self.dispatch(msg) {
                        eprintln!("{}", render::status_line(&view));
                    }
                }
                Ok(_) => {}
                Err(_) => bail!("upload engine stopped before the request finished"),
            }
        }
        Ok(())
    }

    fn print_update(&mut self, view: &AppViewModel) {
        if view.phase != self.last_phase {
            self.last_phase = view.phase;
            print_frame(view);
        } else {
            println!("{}", render::status_line(view));
        }
    }

    fn select(&mut self, loaded: LoadedFile) {
        if let Some(view) = self.dispatch(Msg::FileSelected(Some(to_selection(loaded)))) {
            self.last_phase = view.phase;
            print_frame(&view);
        }
    }

    fn handle_command(&mut self, command: Command) -> Flow {
        match command {
            Command::Open(path) => match load_file(&path) {
                Ok(loaded) => self.select(loaded),
                Err(err) => eprintln!("Error: {err}"),
            },
            Command::Close => {
                if let Some(view) = self.dispatch(Msg::FileSelected(None)) {
                    self.last_phase = view.phase;
                    print_frame(&view);
                }
            }
            Command::Submit => {
                let view = self.view();
                if view.selection.is_none() {
                    println!("No file selected. Use: open <path>");
                } else if view.phase == RequestPhase::InFlight {
                    println!("A request is already running.");
                }
                if let Some(view) = self.dispatch(Msg::SubmitClicked) {
                    self.print_update(&view);
                }
            }
            Command::Copy => {
                if self.view().can_copy {
                    println!("Copying summary to clipboard.");
                } else {
                    println!("Nothing to copy yet.");
                }
                self.dispatch(Msg::CopyClicked);
            }
            Command::Save(path) => save_summary(&self.view(), &path),
            Command::Status => print_frame(&self.view()),
            Command::Help => println!("{HELP}"),
            Command::Unknown(line) => println!("Unknown command: {line} (type 'help')"),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn finish(self) {
        self.runner.finish();
    }
}

/// Unusual extensions are only warned about; the service has the final say.
fn to_selection(loaded: LoadedFile) -> Selection {
    let selection = Selection::new(loaded.name, loaded.bytes);
    if !selection.has_accepted_extension() {
        engine_warn!(
            "{} is not a .pdf or .txt file; the service may reject it",
            selection.name()
        );
    }
    selection
}

fn print_frame(view: &AppViewModel) {
    for line in render::frame(view) {
        println!("{line}");
    }
}

fn save_summary(view: &AppViewModel, path: &Path) {
    if view.summary.is_empty() {
        println!("Nothing to save yet.");
        return;
    }
    match write_atomic(path, view.summary.as_bytes()) {
        Ok(written) => println!("Saved summary to {}", written.display()),
        Err(err) => eprintln!("Error: could not save summary: {err}"),
    }
}

/// Select `path`, submit it, wait for the outcome and print it.
pub(crate) fn run_once(path: &Path, cli: &Cli, config: &AppConfig) -> anyhow::Result<ExitCode> {
    let loaded = load_file(path).with_context(|| format!("cannot open {}", path.display()))?;

    let (tx, rx) = mpsc::channel();
    let runner = EffectRunner::new(config, tx)?;
    let mut session = Session::new(config, runner);

    session.dispatch(Msg::FileSelected(Some(to_selection(loaded))));
    if let Some(view) = session.dispatch(Msg::SubmitClicked) {
        eprintln!("{}", render::status_line(&view));
    }
    session.wait_until_settled(&rx)?;
    conclude(session, cli)
}

/// Prints the outcome, then copies and saves as requested. Clipboard writes
/// are joined before returning, whether or not the save worked.
fn conclude(mut session: Session, cli: &Cli) -> anyhow::Result<ExitCode> {
    let view = session.view();
    if view.phase != RequestPhase::Succeeded {
        eprintln!("Error: {}", view.error.unwrap_or_default());
        session.finish();
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", view.summary);
    if cli.copy {
        session.dispatch(Msg::CopyClicked);
    }
    let saved = match &cli.save {
        Some(save) => write_atomic(save, view.summary.as_bytes())
            .with_context(|| format!("could not save summary to {}", save.display()))
            .map(|written| eprintln!("Saved summary to {}", written.display())),
        None => Ok(()),
    };
    session.finish();
    saved.map(|()| ExitCode::SUCCESS)
}

/// Line-driven prompt: `open`, `submit`, `copy`, `save`, `status`, `quit`.
pub(crate) fn run_interactive(config: &AppConfig) -> anyhow::Result<ExitCode> {
    let (tx, rx) = mpsc::channel();
    let runner = EffectRunner::new(config, tx.clone())?;
    let mut session = Session::new(config, runner);

    spawn_input_reader(tx)?;
    println!("{HELP}");
    print_frame(&session.view());

    let mut quit_when_settled = false;
    while let Ok(event) = rx.recv() {
        match event {
            AppEvent::Core(msg) => {
                if let Some(view) = session.dispatch(msg) {
                    session.print_update(&view);
                }
            }
            AppEvent::Command(command) => {
                if let Flow::Quit = session.handle_command(command) {
                    break;
                }
            }
            AppEvent::InputClosed => {
                // Piped input: let a running request finish before exiting.
                if !session.state.request().is_in_flight() {
                    break;
                }
                quit_when_settled = true;
            }
        }
        if quit_when_settled && !session.state.request().is_in_flight() {
            break;
        }
    }

    session.finish();
    Ok(ExitCode::SUCCESS)
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        engine_debug!("stdin read failed: {}", err);
                        break;
                    }
                };
                if let Some(command) = commands::parse(&line) {
                    if tx.send(AppEvent::Command(command)).is_err() {
                        return;
                    }
                }
            }
            let _ = tx.send(AppEvent::InputClosed);
        })
        .context("failed to spawn input reader")?;
    Ok(())
}
