//! Greeter - stage-and-commit greeting TUI
//!
//! Events go through `GreeterUi::map_event` to actions, the runtime dispatches
//! them to the reducer, and each new snapshot is rendered.
//!
//! Keys: type to stage, Enter or Ctrl+S to commit, Tab to focus the button,
//! Esc to quit.
//!
//! `--headless` skips the terminal and prints the final state as JSON, which
//! together with `--actions` makes the reducer scriptable:
//!
//! ```text
//! greeter --headless --actions script.json
//! ```
//!
//! A `{"type": "QUIT"}` entry ends the script there; without `--headless` the
//! UI is then skipped.

use std::cell::RefCell;
use std::io;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use greeter::action::Action;
use greeter::config::{Args, Config};
use greeter::logging::init_tracing;
use greeter::reducer::reducer;
use greeter::script::{self, ScriptEnd};
use greeter::state::GreetingState;
use greeter::ui::GreeterUi;
use greeter_core::{DispatchRuntime, LoggingMiddleware, StoreWithMiddleware};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};

type GreeterStore = StoreWithMiddleware<GreetingState, Action, LoggingMiddleware>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(args.log_file.as_deref()).context("Failed to open log file")?;

    let config = args.load().context("Failed to load configuration")?;
    info!(
        greeting = %config.initial.greeting,
        script_len = config.script.len(),
        headless = config.headless,
        "Starting greeter"
    );

    let mut store = GreeterStore::new(config.initial.clone(), reducer, LoggingMiddleware::new());
    store.subscribe(|state: &GreetingState| {
        debug!(
            greeting = %state.greeting,
            proposed = %state.proposed_greeting,
            "State changed"
        );
    });

    let script_end = script::play(&mut store, config.script.iter().cloned());

    if config.headless {
        let json = serde_json::to_string_pretty(store.state())
            .context("Failed to serialize state")?;
        println!("{json}");
        return Ok(());
    }

    if script_end == ScriptEnd::Quit {
        info!(greeting = %store.state().greeting, "Script quit before the UI started");
        return Ok(());
    }

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, store, &config).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    let store = result.context("Terminal UI failed")?;
    info!(greeting = %store.state().greeting, "Exiting");
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    store: GreeterStore,
    config: &Config,
) -> io::Result<GreeterStore> {
    let ui = RefCell::new(GreeterUi::new(store.state(), config.keybindings.clone()));
    let mut runtime = DispatchRuntime::from_store(store);

    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
        )
        .await?;

    Ok(runtime.into_store())
}
