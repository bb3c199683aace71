//! whisperterm - a password-gated mock terminal
//!
//! whisperterm renders a self-contained "hacker terminal": a visitor types a
//! gate-phrase, then pseudo-shell commands (`help`, `about`, `projects`, ...)
//! that print canned content from a JSON configuration file.
//!
//! Nothing here is real. There is no shell, no filesystem, and no
//! authentication; the gate is a plain string comparison kept for flavor.
//!
//! # Quick Start
//!
//! ```text
//! whisperterm                    # Load ./config.json (fallback defaults if absent)
//! whisperterm -c persona.json    # Load a specific configuration
//! ```
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | Enter | Submit gate-phrase / command |
//! | Up / Down | Browse command history |
//! | Tab | Auto-complete commands |
//! | Esc | Clear the input line |
//! | Ctrl+C | Quit immediately |

mod commands;
mod config;
mod effect;
mod history;
mod session;
mod ui;

use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::commands::OutputLine;
use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::effect::{Effect, Scheduler, SCROLL_DELAY, TERMINATE_DELAY};
use crate::session::Session;
use crate::ui::{InputAction, KeyMapper, Renderer};

/// Event loop tick
const TICK: Duration = Duration::from_millis(33);

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command-line options
struct CliArgs {
    /// Configuration file path
    config_path: PathBuf,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

fn print_version() {
    eprintln!("whisperterm {}", VERSION);
}

fn print_help() {
    eprintln!("whisperterm {} - a password-gated mock terminal", VERSION);
    eprintln!();
    eprintln!("Usage: whisperterm [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <PATH>   Configuration file (default: ./config.json)");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  Enter                 Submit gate-phrase / command");
    eprintln!("  Up/Down               Browse command history");
    eprintln!("  Tab                   Auto-complete commands");
    eprintln!("  Esc                   Clear input line");
    eprintln!("  Ctrl+C                Quit immediately");
    eprintln!();
    eprintln!("Type 'exit' at the prompt to end the session in-band.");
}

fn parse_args() -> Result<CliArgs, String> {
    let args: Vec<String> = env::args().collect();
    let mut cli = CliArgs::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-c" | "--config" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing config path argument".to_string());
                }
                cli.config_path = PathBuf::from(&args[i]);
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(cli)
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}

/// Initialize file logging; stderr is unusable once raw mode is on
fn init_logging() {
    let log_path = home_dir()
        .map(|h| h.join(".whisperterm").join("whisperterm.log"))
        .unwrap_or_else(|| PathBuf::from("whisperterm.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::INFO)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = match parse_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    init_logging();
    info!("whisperterm starting...");

    let config = Config::load_or_fallback(&cli.config_path);
    let theme = config.theme();
    let title = config.title().to_string();

    let mut session = Session::new(config);
    let mut renderer = Renderer::new(theme);
    let mut scheduler = Scheduler::new();

    renderer.init(&title)?;
    let result = event_loop(&mut session, &mut renderer, &mut scheduler);
    renderer.cleanup()?;

    info!("whisperterm exited");
    result
}

/// Main event loop: poll input, feed the session, pump due effects
fn event_loop(
    session: &mut Session,
    renderer: &mut Renderer,
    scheduler: &mut Scheduler,
) -> anyhow::Result<()> {
    loop {
        renderer.render(session)?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(action) = KeyMapper::map(&key) {
                        if !apply_action(session, renderer, scheduler, action) {
                            info!("quit requested");
                            return Ok(());
                        }
                    }
                }
                Event::Resize(cols, rows) => renderer.resize(cols, rows),
                _ => {}
            }
        }

        renderer.tick_scroll();

        for effect in scheduler.take_due(Instant::now()) {
            match effect {
                Effect::ScrollToBottom => renderer.scroll_to_bottom(),
                Effect::Terminate => {
                    info!("session terminated");
                    return Ok(());
                }
                Effect::ClearScreen => renderer.clear(),
            }
        }
    }
}

/// Apply one input action. Returns false when the loop should end.
fn apply_action(
    session: &mut Session,
    renderer: &mut Renderer,
    scheduler: &mut Scheduler,
    action: InputAction,
) -> bool {
    let now = Instant::now();
    match action {
        InputAction::Quit => return false,
        InputAction::Insert(ch) => session.insert_char(ch),
        InputAction::Backspace => session.backspace(),
        InputAction::HistoryPrevious => session.history_previous(),
        InputAction::HistoryNext => session.history_next(),
        InputAction::Cancel => session.cancel(),
        InputAction::Complete => {
            let lines = session.complete();
            push_output(renderer, scheduler, &lines, now);
        }
        InputAction::Submit => {
            let output = session.submit();
            push_output(renderer, scheduler, &output.lines, now);
            for effect in output.effects {
                match effect {
                    Effect::ClearScreen => renderer.clear(),
                    Effect::Terminate => scheduler.schedule(Effect::Terminate, TERMINATE_DELAY, now),
                    Effect::ScrollToBottom => scheduler.schedule(Effect::ScrollToBottom, SCROLL_DELAY, now),
                }
            }
        }
    }
    true
}

/// Append output and schedule the delayed scroll that follows every append
fn push_output(
    renderer: &mut Renderer,
    scheduler: &mut Scheduler,
    lines: &[OutputLine],
    now: Instant,
) {
    if lines.is_empty() {
        return;
    }
    renderer.append(lines);
    scheduler.cancel(Effect::ScrollToBottom);
    scheduler.schedule(Effect::ScrollToBottom, SCROLL_DELAY, now);
}
