//! livepanel — live data from public APIs in the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐  PanelMsg  ┌──────────┐  draw()  ┌──────────┐
//! │  poll.rs │ ─────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (thread) │  (channel) │ (state)  │          │ (render) │
//! └──────────┘            └──────────┘          └──────────┘
//!      ▲ Refresher             ▲
//!      └──── 'r' ──────────────┤ handle_key_event()
//!                         ┌──────────┐
//!                         │ input.rs │
//!                         └──────────┘
//! ```
//!
//! * **`source/`** — the `Provider` trait and the six concrete providers.
//! * **`registry`** — category id → ordered provider chain.
//! * **`chain`** — walks one chain until a provider succeeds.
//! * **`aggregate`** — runs every chain concurrently, keeps registration
//!   order.
//! * **`fallback`** / **`panel`** — static dataset and the presentable
//!   result of a run.
//! * **`poll`** — background worker that runs aggregations and tags them
//!   with run tokens.
//! * **`app`**, **`ui`**, **`input`** — state, rendering, key handling.
//! * **`main`** — wires everything together.

mod aggregate;
mod app;
mod chain;
mod config;
mod error;
mod fallback;
mod input;
mod logging;
mod panel;
mod poll;
mod registry;
mod source;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use aggregate::aggregate_all;
use app::App;
use config::Config;
use panel::Panel;
use poll::RunSequence;
use registry::CategoryRegistry;

// ---------------------------------------------------------------------------
// RAII terminal guard
// ---------------------------------------------------------------------------

/// Enters raw mode + alternate screen on construction and restores the
/// terminal on [`Drop`], including during unwinding.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before the panic message is printed.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    if config.once {
        logging::init_stderr(&config.log_level)?;
        return run_once(&config);
    }

    let _log_guard = logging::init_file(&config.log_file, &config.log_level)?;
    install_panic_hook();

    let client = source::http::client()?;
    let registry = Arc::new(CategoryRegistry::reference(&client, config.location())?);

    // -- start background refresh worker (queues the startup run) ------------
    let sequence = RunSequence::default();
    let (refresher, rx) = poll::spawn(
        registry,
        config.deadlines(),
        config.interval(),
        sequence.clone(),
    )?;

    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(sequence);

    // -- main event loop -----------------------------------------------------
    // ~10 fps: drain worker messages, render, poll input, forward refreshes.
    let tick_rate = Duration::from_millis(100);

    loop {
        while let Ok(msg) = rx.try_recv() {
            app.apply(msg);
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.take_refresh_request() {
            refresher.request();
        }

        if app.quit {
            break;
        }
    }

    // `guard` is dropped here, restoring the terminal.
    Ok(())
}

/// Single aggregation run, printed as plain text.
fn run_once(config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let client = source::http::client()?;
    let registry = CategoryRegistry::reference(&client, config.location())?;

    let panel = runtime.block_on(async {
        Panel::settle(aggregate_all(&registry, config.deadlines()).await)
    });
    print!("{}", panel.render_plain());
    Ok(())
}
