/// Shell — interactive terminal client running a tiny built-in engine.
///
/// Usage: shell <narrative-file> [--config <path>] [--log-dir <path>]
///
/// The built-in echo engine only understands GO, TAKE, HELP and
/// inventory; it exists to exercise the shell end to end. Esc or
/// Ctrl-C quits.

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::execute;
use narrative_shell::core::config::ShellConfig;
use narrative_shell::core::engine::{GameState, NarrativeEngine};
use narrative_shell::core::loader::{load_config, load_lines, LoadError, ResourceLoader};
use narrative_shell::core::session::Session;
use narrative_shell::core::terminal::paint_frame;
use narrative_shell::schema::command::Key;
use std::convert::Infallible;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Loaded startup assets.
enum Asset {
    Config(ShellConfig),
    Lines(Vec<String>),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return Ok(());
    }

    let narrative_path = PathBuf::from(&args[1]);
    let mut config_path = None;
    let mut log_dir = PathBuf::from(".");

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(PathBuf::from(&args[i]));
            }
            "--log-dir" if i + 1 < args.len() => {
                i += 1;
                log_dir = PathBuf::from(&args[i]);
            }
            _ => {
                print_usage();
                bail!("unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    let _guard = setup_logging(&log_dir)?;

    let mut loader = ResourceLoader::new();
    loader.load_to("narrative", async move {
        Ok::<_, LoadError>(Asset::Lines(load_lines(narrative_path).await?))
    });
    if let Some(path) = config_path {
        loader.load_to("config", async move {
            Ok::<_, LoadError>(Asset::Config(load_config(path).await?))
        });
    }
    let mut readiness = loader.readiness();
    let loading = tokio::spawn(loader.start_logged());

    let mut stdout = std::io::stdout();
    terminal::enable_raw_mode().context("enabling raw mode")?;
    execute!(stdout, EnterAlternateScreen)?;

    // Nothing is drawn until every asset is in.
    let result = if readiness.wait().await {
        match loading.await.context("joining loader task")? {
            Some(mut resources) => {
                let config = match resources.take("config") {
                    Some(Asset::Config(c)) => c,
                    _ => ShellConfig::default(),
                };
                let lines = match resources.take("narrative") {
                    Some(Asset::Lines(l)) => l,
                    _ => Vec::new(),
                };
                match Session::<EchoEngine>::bootstrap(&lines, config) {
                    Ok(session) => run(session, &mut stdout),
                    Err(e) => Err(e.into()),
                }
            }
            None => wait_for_quit(&mut stdout),
        }
    } else {
        // Loading failed: nothing to play, but stay up until the player quits.
        wait_for_quit(&mut stdout)
    };

    execute!(stdout, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn setup_logging(log_dir: &std::path::Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(log_dir, "shell.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    // File only: stderr would draw over the raw-mode screen
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}/shell.log", log_dir.display());
    Ok(guard)
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    code == KeyCode::Esc || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

fn run<W: Write>(mut session: Session<EchoEngine>, out: &mut W) -> Result<()> {
    loop {
        paint_frame(out, &session.frame())?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if is_quit(key.code, key.modifiers) {
            return Ok(());
        }
        match session.handle_key(&Key::from(key)) {
            Ok(true) => tracing::debug!("command dispatched"),
            Ok(false) => {}
            // Already logged by the session; the old text stays up.
            Err(_) => {}
        }
    }
}

fn wait_for_quit<W: Write>(out: &mut W) -> Result<()> {
    execute!(out, terminal::Clear(terminal::ClearType::All))?;
    loop {
        if let Event::Key(key) = event::read()? {
            if is_quit(key.code, key.modifiers) {
                return Ok(());
            }
        }
    }
}

fn print_usage() {
    println!("Usage: shell <narrative-file> [--config <path>] [--log-dir <path>]");
    println!();
    println!("Commands: examine, use, talk to <who>, go, take, help, inventory");
    println!("Press Enter on an empty line to look around; Esc quits.");
}

// ---------------------------------------------------------------------------
// Echo engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
struct EchoState {
    turn: u32,
    room: String,
    carrying: Vec<String>,
}

/// Shows the narrative as the opening room and answers every query with
/// a short acknowledgement.
struct EchoEngine {
    opening: String,
}

impl EchoEngine {
    fn room_text(&self, state: &EchoState) -> String {
        if state.room.is_empty() {
            self.opening.clone()
        } else {
            format!("You are #{}#. The way back is behind you.", state.room)
        }
    }
}

impl NarrativeEngine for EchoEngine {
    type State = EchoState;
    type Error = Infallible;

    fn compile(narrative: &str) -> Result<Self, Infallible> {
        Ok(Self {
            opening: narrative.to_string(),
        })
    }

    fn start(&self) -> Result<GameState<EchoState>, Infallible> {
        let state = EchoState::default();
        Ok(GameState::new(self.room_text(&state), state))
    }

    fn query(
        &self,
        verb: &str,
        arg: &str,
        state: &EchoState,
    ) -> Result<GameState<EchoState>, Infallible> {
        let mut next = state.clone();
        next.turn += 1;
        let text = match (verb, arg) {
            ("GO", "") => "Go where?".to_string(),
            ("GO", dir) => {
                next.room = format!("{} of where you were", dir);
                self.room_text(&next)
            }
            ("TAKE", "") => "Take what?".to_string(),
            ("TAKE", item) => {
                next.carrying.push(item.to_string());
                format!("You take the ~{}~.", item)
            }
            ("MISC", word) => format!("You try to {}. @888888Nothing happens.@", word),
            ("HELP", _) => "Try #go#, #take#, #examine#, #talk to#, #inventory#.".to_string(),
            (verb, "") => format!("You {} nothing in particular.", verb.to_lowercase()),
            (verb, arg) => format!("You {} the {}. @888888Nothing happens.@", verb.to_lowercase(), arg),
        };
        Ok(GameState::new(text, next))
    }

    fn print_current_room(&self, state: &EchoState) -> Result<GameState<EchoState>, Infallible> {
        Ok(GameState::new(self.room_text(state), state.clone()))
    }

    fn print_inventory(&self, state: &EchoState) -> Result<GameState<EchoState>, Infallible> {
        let text = if state.carrying.is_empty() {
            "You carry nothing.".to_string()
        } else {
            format!("#Personal#: [ {} ]", state.carrying.join(" "))
        };
        let text = format!("{}\n@888888Turns taken: {}@", text, state.turn);
        Ok(GameState::new(text, state.clone()))
    }
}
