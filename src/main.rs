use std::{
    io::{self, Write},
    panic,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    execute,
    style::ResetColor,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};
use tuirealm::{
    PollStrategy,
    terminal::{CrosstermTerminalAdapter, TerminalBridge},
};

use checkboard::{
    app::{App, StartPage},
    logging::{init_logging, print_log_location},
    realm::{RootId, apply_message, init_application, should_quit},
    settings::Settings,
    types::CheckId,
};

#[derive(Parser, Debug)]
#[command(
    name = "checkboard",
    about = "Terminal console for administering monitoring checks",
    long_about = "A TUI for the monitoring-checks server: list checks, add new ones, and edit existing ones with type-dependent fields.",
    version = env!("CHECKBOARD_BUILD_VERSION"),
    author
)]
struct Cli {
    /// Base URL of the checks server, overriding the settings file.
    #[arg(short, long, value_name = "URL")]
    server: Option<String>,

    /// Open directly on the edit page for this check id.
    #[arg(long, value_name = "ID", conflicts_with = "add")]
    edit: Option<i64>,

    /// Open directly on the add page.
    #[arg(long)]
    add: bool,
}

static TERMINAL_RESTORED: AtomicBool = AtomicBool::new(false);

fn main() -> Result<()> {
    let log_path = match init_logging() {
        Ok(path) => Some(path),
        Err(err) => {
            eprintln!("warning: failed to initialize logging: {err}");
            None
        }
    };
    if let Some(path) = log_path.as_ref() {
        install_panic_hook_with_log(path.clone());
    }

    let result = run_app();
    if let Some(path) = log_path.as_ref() {
        print_log_location(path);
    }
    result
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load();
    if let Some(server) = cli.server {
        settings.server_url = server;
    }
    settings.validate();

    let start = if let Some(id) = cli.edit {
        StartPage::Edit(CheckId(id))
    } else if cli.add {
        StartPage::Add
    } else {
        StartPage::List
    };

    let _guard = TerminalGuard;
    let mut terminal = setup_terminal()?;

    let app = Arc::new(Mutex::new(App::new(settings, start)?));
    let mut realm = init_application(Arc::clone(&app))?;

    let mut redraw = true;
    while !should_quit(&app)? {
        if redraw {
            terminal
                .draw(|frame| realm.view(&RootId::Root, frame, frame.area()))
                .context("failed to render frame")?;
            redraw = false;
        }

        let messages = realm
            .tick(PollStrategy::Once)
            .context("failed to process tui-realm tick")?;

        if !messages.is_empty() {
            redraw = true;
        }

        for message in messages {
            apply_message(&app, message)?;
        }
    }

    let _ = terminal.disable_raw_mode();
    let _ = terminal.leave_alternate_screen();
    let _ = terminal.clear_screen();
    TERMINAL_RESTORED.store(true, Ordering::SeqCst);

    Ok(())
}

fn setup_terminal() -> Result<TerminalBridge<CrosstermTerminalAdapter>> {
    TERMINAL_RESTORED.store(false, Ordering::SeqCst);

    let mut terminal =
        TerminalBridge::new_crossterm().context("failed to initialize terminal bridge")?;

    terminal
        .enable_raw_mode()
        .context("failed to enable raw mode")?;
    terminal
        .enter_alternate_screen()
        .context("failed to enter alternate screen")?;

    Ok(terminal)
}

fn install_panic_hook_with_log(log_path: std::path::PathBuf) {
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        eprintln!();
        eprintln!("═══════════════════════════════════════════════════════════════");
        eprintln!("  📝 Log file: {}", log_path.display());
        eprintln!("═══════════════════════════════════════════════════════════════");
        eprintln!();
        previous_hook(panic_info);
    }));
}

fn restore_terminal() -> Result<()> {
    if TERMINAL_RESTORED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let _ = disable_raw_mode();

    let mut stderr = io::stderr();
    let _ = execute!(stderr, LeaveAlternateScreen, Show, ResetColor);
    let _ = stderr.write_all(
        b"\x1b[?1049l\x1b[?1000l\x1b[?1002l\x1b[?1003l\x1b[?1004l\x1b[?1006l\x1b[?1015l\x1b[?2004l\x1b[?7h\x1b[?25h\x1b[0m\x1b[2J\x1b[H",
    );
    let _ = stderr.flush();

    Ok(())
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}
